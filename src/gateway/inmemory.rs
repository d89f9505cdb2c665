//! In-memory gateway implementations (thread-safe, async).
//!
//! These are in-process fakes for tests and demos. They keep their stores in
//! `DashMap` so all methods take `&self` and clones share state, like the
//! HTTP gateways share one client.
//!
//! The billing fake reproduces the real billing service's create semantics:
//! it resolves the customer, checks stock per line, decrements inventory,
//! captures the unit price from the catalog at creation time, and enriches
//! the response with customer and product snapshots.

use super::{BillingGateway, CustomerGateway, ProductGateway};
use crate::error::{Error, Result};
use crate::model::{Bill, Customer, NewBill, NewCustomer, NewProduct, Product, ProductItem};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// In-memory product store.
#[derive(Clone, Default)]
pub struct InMemoryProductGateway {
    store: Arc<DashMap<String, Product>>,
    seq: Arc<AtomicI64>,
}

impl InMemoryProductGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product with a fixed id, bypassing creation. Test helper.
    ///
    /// A seeded `p<n>` id advances the generator past `n`, so later
    /// [`create`](ProductGateway::create) calls never reuse it.
    pub fn seed(&self, product: Product) {
        if let Some(n) = product.id.strip_prefix('p').and_then(|s| s.parse::<i64>().ok()) {
            self.seq.fetch_max(n, Ordering::SeqCst);
        }
        self.store.insert(product.id.clone(), product);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl ProductGateway for InMemoryProductGateway {
    async fn list(&self) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self.store.iter().map(|e| e.value().clone()).collect();
        // DashMap iteration order is arbitrary; keep the list stable
        products.sort_by(|a, b| a.id.cmp(&b.id));
        debug!("✓ InMemory products LIST -> {} items", products.len());
        Ok(products)
    }

    async fn get(&self, id: &str) -> Result<Product> {
        self.store
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Error::NotFound(format!("Product {} not found.", id)))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        product.validate()?;
        let id = format!("p{}", self.seq.fetch_add(1, Ordering::SeqCst) + 1);
        let created = Product {
            id: id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: product.quantity,
        };
        self.store.insert(id, created.clone());
        debug!("✓ InMemory product CREATE {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &str, product: &NewProduct) -> Result<Product> {
        product.validate()?;
        let mut entry = self
            .store
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("Product {} not found.", id)))?;
        entry.name = product.name.clone();
        entry.price = product.price;
        entry.quantity = product.quantity;
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("Product {} not found.", id)))
    }
}

/// In-memory customer store.
#[derive(Clone, Default)]
pub struct InMemoryCustomerGateway {
    store: Arc<DashMap<i64, Customer>>,
    seq: Arc<AtomicI64>,
}

impl InMemoryCustomerGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a customer with a fixed id. Test helper.
    ///
    /// Advances the id generator past the seeded id so later creates never
    /// reuse it.
    pub fn seed(&self, customer: Customer) {
        self.seq.fetch_max(customer.id, Ordering::SeqCst);
        self.store.insert(customer.id, customer);
    }
}

impl CustomerGateway for InMemoryCustomerGateway {
    async fn list(&self) -> Result<Vec<Customer>> {
        let mut customers: Vec<Customer> = self.store.iter().map(|e| e.value().clone()).collect();
        customers.sort_by_key(|c| c.id);
        debug!("✓ InMemory customers LIST -> {} items", customers.len());
        Ok(customers)
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer> {
        let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Customer {
            id,
            name: customer.name.clone(),
            email: customer.email.clone(),
        };
        self.store.insert(id, created.clone());
        Ok(created)
    }
}

/// In-memory billing service.
///
/// Holds handles to the product and customer gateways the way the real
/// billing service holds REST clients to the other two services.
#[derive(Clone)]
pub struct InMemoryBillingGateway {
    products: InMemoryProductGateway,
    customers: InMemoryCustomerGateway,
    bills: Arc<DashMap<i64, Bill>>,
    bill_seq: Arc<AtomicI64>,
    item_seq: Arc<AtomicI64>,
}

impl InMemoryBillingGateway {
    pub fn new(products: InMemoryProductGateway, customers: InMemoryCustomerGateway) -> Self {
        InMemoryBillingGateway {
            products,
            customers,
            bills: Arc::new(DashMap::new()),
            bill_seq: Arc::new(AtomicI64::new(0)),
            item_seq: Arc::new(AtomicI64::new(0)),
        }
    }

    fn resolve_customer(&self, id: i64) -> Result<Customer> {
        self.customers
            .store
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Error::Submission(format!("Unknown customer {}.", id)))
    }
}

impl BillingGateway for InMemoryBillingGateway {
    async fn list(&self) -> Result<Vec<Bill>> {
        let mut bills: Vec<Bill> = self.bills.iter().map(|e| e.value().clone()).collect();
        bills.sort_by_key(|b| b.id);
        debug!("✓ InMemory bills LIST -> {} items", bills.len());
        Ok(bills)
    }

    async fn get(&self, id: i64) -> Result<Bill> {
        self.bills
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Error::NotFound(format!("Bill {} not found.", id)))
    }

    async fn create(&self, bill: &NewBill) -> Result<Bill> {
        if bill.items.is_empty() {
            return Err(Error::Submission(
                "Bill must contain at least one product item.".to_string(),
            ));
        }
        let customer = self.resolve_customer(bill.customer_id)?;

        // Validate every line before mutating any stock. Lines draw from a
        // working balance, so duplicate lines of one product see the stock
        // left by the lines before them.
        let mut working: HashMap<String, Product> = HashMap::new();
        let mut resolved = Vec::with_capacity(bill.items.len());
        for item in &bill.items {
            let product = match working.get(&item.product_id) {
                Some(product) => product.clone(),
                None => self
                    .products
                    .store
                    .get(&item.product_id)
                    .map(|e| e.value().clone())
                    .ok_or_else(|| {
                        Error::Submission(format!("Unknown product {}.", item.product_id))
                    })?,
            };
            if item.quantity <= 0 {
                return Err(Error::Submission(format!(
                    "Quantity must be positive for product {}.",
                    product.name
                )));
            }
            if item.quantity > product.quantity {
                return Err(Error::Submission(format!(
                    "Insufficient stock for {} (requested {}, available {}).",
                    product.name, item.quantity, product.quantity
                )));
            }
            let mut decremented = product;
            decremented.quantity -= item.quantity;
            working.insert(decremented.id.clone(), decremented.clone());
            resolved.push((decremented, item.quantity));
        }

        for (id, product) in working {
            self.products.store.insert(id, product);
        }

        let mut product_items = Vec::with_capacity(resolved.len());
        for (product, quantity) in resolved {
            product_items.push(ProductItem {
                id: self.item_seq.fetch_add(1, Ordering::SeqCst) + 1,
                product_id: product.id.clone(),
                quantity,
                // Price at purchase: captured from the catalog now, stable
                // against later price changes
                unit_price: product.price,
                product: Some(product),
            });
        }

        let id = self.bill_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Bill {
            id,
            billing_date: epoch_seconds(),
            customer_id: customer.id,
            customer: Some(customer),
            product_items,
        };
        self.bills.insert(id, created.clone());
        debug!("✓ InMemory bill CREATE #{}", id);
        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // Idempotent, like the real service's delete-if-present
        self.bills.remove(&id);
        Ok(())
    }
}

fn epoch_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string()
}
