//! High-level back-office facade.
//!
//! Bundles the three gateways behind one handle so views receive a single
//! explicitly constructed dependency instead of an ambient registry. The
//! facade owns no draft state: the caller keeps its `BillDraft` and passes
//! it in per call.

use crate::composer::{BillComposer, BillDraft};
use crate::error::Result;
use crate::gateway::{BillingGateway, CustomerGateway, ProductGateway};
use crate::model::{Bill, Customer, Product};

#[cfg(feature = "http")]
use crate::gateway::http::{GatewayConfig, HttpBillingGateway, HttpCustomerGateway, HttpGateways, HttpProductGateway};
use crate::gateway::inmemory::{InMemoryBillingGateway, InMemoryCustomerGateway, InMemoryProductGateway};

/// Reference data for the back-office views, fetched in one round.
#[derive(Clone, Debug)]
pub struct Overview {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub bills: Vec<Bill>,
}

/// The back-office service facade.
///
/// Generic over the gateway traits so tests and demos can run entirely on
/// the in-memory implementations.
///
/// # Example
///
/// ```ignore
/// let office = Backoffice::over_http(GatewayConfig::default())?;
/// let overview = office.load_overview().await?;
///
/// let mut draft = BillDraft::new();
/// draft.customer_id = Some(overview.customers[0].id);
/// draft.items[0].product_id = overview.products[0].id.clone();
/// let bill = office.submit_bill(&mut draft).await?;
/// ```
pub struct Backoffice<P, C, B>
where
    P: ProductGateway,
    C: CustomerGateway,
    B: BillingGateway,
{
    products: P,
    customers: C,
    composer: BillComposer<B>,
}

impl<P, C, B> Backoffice<P, C, B>
where
    P: ProductGateway,
    C: CustomerGateway,
    B: BillingGateway,
{
    /// Assemble the facade from already-constructed gateways.
    pub fn new(products: P, customers: C, billing: B) -> Self {
        Backoffice {
            products,
            customers,
            composer: BillComposer::new(billing),
        }
    }

    /// The product gateway.
    pub fn products(&self) -> &P {
        &self.products
    }

    /// The customer gateway.
    pub fn customers(&self) -> &C {
        &self.customers
    }

    /// The billing gateway.
    pub fn billing(&self) -> &B {
        self.composer.gateway()
    }

    /// Fetch products, customers, and bills concurrently.
    ///
    /// The three requests are independent; the first failure wins and is
    /// surfaced as-is. Partial results are discarded, matching the
    /// per-widget error handling of the views this backs.
    pub async fn load_overview(&self) -> Result<Overview> {
        let (products, customers, bills) = futures::try_join!(
            self.products.list(),
            self.customers.list(),
            self.composer.gateway().list(),
        )?;

        debug!(
            "✓ Overview loaded: {} products, {} customers, {} bills",
            products.len(),
            customers.len(),
            bills.len()
        );

        Ok(Overview {
            products,
            customers,
            bills,
        })
    }

    /// Validate and submit the caller's draft. See [`BillComposer::submit`].
    pub async fn submit_bill(&self, draft: &mut BillDraft) -> Result<Bill> {
        self.composer.submit(draft).await
    }

    /// Delete a bill. Callers remove it from their displayed list only after
    /// this returns `Ok`.
    pub async fn delete_bill(&self, id: i64) -> Result<()> {
        self.composer.gateway().delete(id).await
    }
}

#[cfg(feature = "http")]
impl Backoffice<HttpProductGateway, HttpCustomerGateway, HttpBillingGateway> {
    /// Build a facade over the HTTP gateways.
    ///
    /// # Errors
    /// Returns `Error::Config` if the HTTP client cannot be constructed.
    pub fn over_http(config: GatewayConfig) -> Result<Self> {
        let gateways = HttpGateways::new(config)?;
        Ok(Backoffice::new(gateways.products, gateways.customers, gateways.billing))
    }
}

impl Backoffice<InMemoryProductGateway, InMemoryCustomerGateway, InMemoryBillingGateway> {
    /// Build a facade over freshly wired in-memory gateways.
    ///
    /// The billing fake shares the product and customer stores, so bills it
    /// creates check and decrement the same inventory the product gateway
    /// serves.
    pub fn in_memory() -> Self {
        let products = InMemoryProductGateway::new();
        let customers = InMemoryCustomerGateway::new();
        let billing = InMemoryBillingGateway::new(products.clone(), customers.clone());
        Backoffice::new(products, customers, billing)
    }
}
