//! Resource gateway traits and implementations.
//!
//! Each gateway wraps one backend REST collection with typed operations and
//! owns no state: every call is an independent, stateless request/response.
//! No request queue, no de-duplication, no retries, no cancellation tokens -
//! callers apply results in completion order.
//!
//! **IMPORTANT:** All methods take `&self` so gateways can be shared across
//! tasks. Implementations are stateless (HTTP) or use interior mutability
//! (in-memory fakes).

use crate::error::Result;
use crate::model::{Bill, Customer, NewBill, NewCustomer, NewProduct, Product};

#[cfg(feature = "http")]
pub mod http;
pub mod inmemory;

#[cfg(feature = "http")]
pub use http::{GatewayConfig, HttpBillingGateway, HttpCustomerGateway, HttpGateways, HttpProductGateway};
pub use inmemory::{InMemoryBillingGateway, InMemoryCustomerGateway, InMemoryProductGateway};

/// Typed operations over the inventory service's product collection.
///
/// List responses may arrive enveloped (`{"_embedded": {"products": [...]}}`)
/// or bare; implementations always return the bare ordered sequence.
#[allow(async_fn_in_trait)]
pub trait ProductGateway: Send + Sync {
    /// Fetch all products as a plain ordered list.
    async fn list(&self) -> Result<Vec<Product>>;

    /// Fetch one product by id.
    ///
    /// # Errors
    /// Returns `Error::NotFound` when the id does not exist.
    async fn get(&self, id: &str) -> Result<Product>;

    /// Create a product; the id is server-assigned.
    async fn create(&self, product: &NewProduct) -> Result<Product>;

    /// Replace the product at `id` with the given fields.
    async fn update(&self, id: &str, product: &NewProduct) -> Result<Product>;

    /// Delete the product at `id`.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Typed operations over the customer service's collection.
///
/// Customers have no client-side edit or delete flow; the backend exposes
/// list and create only.
#[allow(async_fn_in_trait)]
pub trait CustomerGateway: Send + Sync {
    /// Fetch all customers as a plain ordered list.
    async fn list(&self) -> Result<Vec<Customer>>;

    /// Create a customer; the id is server-assigned.
    async fn create(&self, customer: &NewCustomer) -> Result<Customer>;
}

/// Typed operations over the billing service's bill collection.
#[allow(async_fn_in_trait)]
pub trait BillingGateway: Send + Sync {
    /// Fetch all bills. The billing service answers with a bare array.
    async fn list(&self) -> Result<Vec<Bill>>;

    /// Fetch one bill by id.
    ///
    /// # Errors
    /// Returns `Error::NotFound` when the id does not exist.
    async fn get(&self, id: i64) -> Result<Bill>;

    /// Create a bill from `{customerId, items: [{productId, quantity}]}`.
    ///
    /// The server captures unit prices from the catalog at creation time and
    /// assigns item ids; the response is the fully persisted bill.
    ///
    /// # Errors
    /// Returns `Error::Submission` with the server message when the backend
    /// rejects the request (unknown ids, insufficient stock).
    async fn create(&self, bill: &NewBill) -> Result<Bill>;

    /// Delete the bill at `id`. Callers update their displayed list only
    /// after this succeeds.
    async fn delete(&self, id: i64) -> Result<()>;
}
