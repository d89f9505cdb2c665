//! # backoffice-kit
//!
//! A typed, async client toolkit for an e-commerce back office.
//!
//! ## Features
//!
//! - **Typed Gateways:** CRUD over the inventory, customer, and billing REST
//!   collections, with hypermedia `_embedded` envelopes normalized into plain lists
//! - **Bill Composer:** draft mutators, a one-item floor invariant, pure
//!   submittability checks, and single-request submission
//! - **Backend Agnostic:** gateways are traits; HTTP (reqwest) and in-memory
//!   implementations are provided
//! - **Price-at-Purchase Totals:** totals derive from persisted unit prices,
//!   never the live catalog
//! - **Production Ready:** built-in logging, metrics hooks, and error handling
//!
//! ## Quick Start
//!
//! ```ignore
//! use backoffice_kit::{Backoffice, BillDraft};
//! use backoffice_kit::gateway::http::GatewayConfig;
//!
//! // 1. Build the gateways once and share them
//! let office = Backoffice::over_http(GatewayConfig::default())?;
//!
//! // 2. Load reference data for the views
//! let overview = office.load_overview().await?;
//!
//! // 3. Compose a draft bill
//! let mut draft = BillDraft::new();
//! draft.customer_id = Some(overview.customers[0].id);
//! draft.items[0].product_id = overview.products[0].id.clone();
//! draft.items[0].quantity = 2;
//!
//! // 4. Submit - on success the draft resets, on failure it is preserved
//! let bill = office.submit_bill(&mut draft).await?;
//! println!("total: {}", bill.total());
//! ```
//!
//! ### Testing Without a Backend
//!
//! The in-memory gateways reproduce the billing service's create semantics
//! (stock checks, unit-price capture) so workflows can be exercised end to end:
//!
//! ```ignore
//! use backoffice_kit::Backoffice;
//!
//! let office = Backoffice::in_memory();
//! office.products().create(&new_product).await?;
//! ```

#[macro_use]
extern crate log;

pub mod composer;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod model;
pub mod observability;
pub mod service;

// Re-exports for convenience
pub use composer::{BillComposer, BillDraft, LineItemDraft};
pub use error::{Error, Result};
pub use gateway::{BillingGateway, CustomerGateway, ProductGateway};
pub use model::{Bill, Customer, NewBill, NewCustomer, NewLineItem, NewProduct, Product, ProductItem};
pub use service::{Backoffice, Overview};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
