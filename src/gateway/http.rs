//! HTTP gateway implementations backed by reqwest.
//!
//! All three gateways share one connection-pooled client built from
//! [`GatewayConfig`]. Requests are plain async request/response: failures map
//! into the crate's error taxonomy at this boundary and nothing is retried.

use super::{BillingGateway, CustomerGateway, ProductGateway};
use crate::envelope::ListBody;
use crate::error::{Error, Result, GENERIC_FAILURE_MESSAGE};
use crate::model::{Bill, Customer, NewBill, NewCustomer, NewProduct, Product};
use crate::observability::{GatewayMetrics, NoOpMetrics};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default per-request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the HTTP gateways.
///
/// Defaults target a local edge gateway fronting the three services:
/// `http://localhost:8888` with the standard service base paths.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: String,
    pub products_path: String,
    pub customers_path: String,
    pub bills_path: String,
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            base_url: "http://localhost:8888".to_string(),
            products_path: "/inventory-service/api/products".to_string(),
            customers_path: "/customer-service/api/customers".to_string(),
            bills_path: "/billing-service/bills".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Full URL of the product collection.
    pub fn products_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.products_path)
    }

    /// Full URL of the customer collection.
    pub fn customers_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.customers_path)
    }

    /// Full URL of the bill collection.
    pub fn bills_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.bills_path)
    }
}

// ============================================================================
// Shared transport
// ============================================================================

/// Error responses are JSON objects optionally carrying a `message` field.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Map a non-2xx response into the error taxonomy.
///
/// The server-provided `message` is surfaced verbatim when present; a body
/// without one falls back to [`GENERIC_FAILURE_MESSAGE`].
fn failure_from(status: StatusCode, message: Option<String>) -> Error {
    if status == StatusCode::NOT_FOUND {
        Error::NotFound(
            message.unwrap_or_else(|| "The requested resource was not found.".to_string()),
        )
    } else {
        Error::Submission(message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()))
    }
}

/// Shared reqwest client plus the metrics sink.
#[derive(Clone)]
struct Transport {
    client: Client,
    metrics: Arc<dyn GatewayMetrics>,
}

impl Transport {
    fn new(config: &GatewayConfig, metrics: Arc<dyn GatewayMetrics>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Transport { client, metrics })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send_json(url, self.client.get(url)).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> Result<T> {
        self.send_json(url, self.client.post(url).json(body)).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> Result<T> {
        self.send_json(url, self.client.put(url).json(body)).await
    }

    /// DELETE with a status check only; backends answer with an empty body.
    async fn delete(&self, url: &str) -> Result<()> {
        let started = Instant::now();
        let outcome = async {
            let response = self.client.delete(url).send().await?;
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(failure_from(status, read_message(response).await))
            }
        }
        .await;
        self.record(url, started, &outcome.as_ref().err());
        outcome
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let started = Instant::now();
        let outcome = async {
            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                Ok(response.json::<T>().await?)
            } else {
                Err(failure_from(status, read_message(response).await))
            }
        }
        .await;
        self.record(url, started, &outcome.as_ref().err());
        outcome
    }

    fn record(&self, url: &str, started: Instant, failure: &Option<&Error>) {
        match failure {
            None => self.metrics.record_request(url, started.elapsed()),
            Some(err) => self.metrics.record_failure(url, &err.to_string()),
        }
    }
}

async fn read_message(response: Response) -> Option<String> {
    response.json::<ErrorBody>().await.ok().and_then(|body| body.message)
}

// ============================================================================
// Gateways
// ============================================================================

/// Product gateway over the inventory service.
#[derive(Clone)]
pub struct HttpProductGateway {
    transport: Transport,
    base: String,
}

impl ProductGateway for HttpProductGateway {
    async fn list(&self) -> Result<Vec<Product>> {
        let body: ListBody<Product> = self.transport.get_json(&self.base).await?;
        let products = body.into_items("products");
        debug!("✓ GET {} -> {} products", self.base, products.len());
        Ok(products)
    }

    async fn get(&self, id: &str) -> Result<Product> {
        self.transport.get_json(&format!("{}/{}", self.base, id)).await
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        product.validate()?;
        self.transport.post_json(&self.base, product).await
    }

    async fn update(&self, id: &str, product: &NewProduct) -> Result<Product> {
        product.validate()?;
        self.transport
            .put_json(&format!("{}/{}", self.base, id), product)
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.transport.delete(&format!("{}/{}", self.base, id)).await
    }
}

/// Customer gateway over the customer service.
#[derive(Clone)]
pub struct HttpCustomerGateway {
    transport: Transport,
    base: String,
}

impl CustomerGateway for HttpCustomerGateway {
    async fn list(&self) -> Result<Vec<Customer>> {
        let body: ListBody<Customer> = self.transport.get_json(&self.base).await?;
        let customers = body.into_items("customers");
        debug!("✓ GET {} -> {} customers", self.base, customers.len());
        Ok(customers)
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer> {
        self.transport.post_json(&self.base, customer).await
    }
}

/// Billing gateway over the billing service.
///
/// The billing service answers list requests with a bare array, so no
/// envelope handling is needed here.
#[derive(Clone)]
pub struct HttpBillingGateway {
    transport: Transport,
    base: String,
}

impl BillingGateway for HttpBillingGateway {
    async fn list(&self) -> Result<Vec<Bill>> {
        let bills: Vec<Bill> = self.transport.get_json(&self.base).await?;
        debug!("✓ GET {} -> {} bills", self.base, bills.len());
        Ok(bills)
    }

    async fn get(&self, id: i64) -> Result<Bill> {
        self.transport.get_json(&format!("{}/{}", self.base, id)).await
    }

    async fn create(&self, bill: &NewBill) -> Result<Bill> {
        self.transport.post_json(&self.base, bill).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.transport.delete(&format!("{}/{}", self.base, id)).await
    }
}

/// The three HTTP gateways over one shared client.
///
/// Construct once per process and pass by reference (or clone: cheap, the
/// client is pooled) to anything needing network access.
///
/// # Example
///
/// ```no_run
/// use backoffice_kit::gateway::http::{GatewayConfig, HttpGateways};
///
/// # fn example() -> backoffice_kit::Result<()> {
/// let gateways = HttpGateways::new(GatewayConfig::default())?;
/// let _products = &gateways.products;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpGateways {
    pub products: HttpProductGateway,
    pub customers: HttpCustomerGateway,
    pub billing: HttpBillingGateway,
}

impl HttpGateways {
    /// Build the gateways from configuration.
    ///
    /// # Errors
    /// Returns `Error::Config` if the HTTP client cannot be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::with_metrics(config, Arc::new(NoOpMetrics))
    }

    /// Build the gateways with a custom metrics sink.
    pub fn with_metrics(config: GatewayConfig, metrics: Arc<dyn GatewayMetrics>) -> Result<Self> {
        let transport = Transport::new(&config, metrics)?;
        info!("✓ HTTP gateways initialized: {}", config.base_url);

        Ok(HttpGateways {
            products: HttpProductGateway {
                transport: transport.clone(),
                base: config.products_url(),
            },
            customers: HttpCustomerGateway {
                transport: transport.clone(),
                base: config.customers_url(),
            },
            billing: HttpBillingGateway {
                transport,
                base: config.bills_url(),
            },
        })
    }
}
