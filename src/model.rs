//! Wire and domain types shared by the gateways and the composer.
//!
//! All types map one-to-one onto the backend JSON, which uses camelCase field
//! names (`customerId`, `unitPrice`, `productItems`). Monetary amounts are
//! `rust_decimal::Decimal` and serialize as plain JSON numbers.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer record from the customer service.
///
/// Customers are immutable once fetched; there is no client-side edit flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A catalog product from the inventory service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Payload for creating or updating a product.
///
/// Mirrors the product form: id is server-assigned and never sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl NewProduct {
    /// Validate the payload before it is sent.
    ///
    /// # Errors
    /// Returns `Error::Validation` when the name is empty, the price is
    /// negative, or the quantity is negative.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Product name is required.".to_string()));
        }
        if self.price < Decimal::ZERO {
            return Err(Error::Validation("Product price must not be negative.".to_string()));
        }
        if self.quantity < 0 {
            return Err(Error::Validation(
                "Product quantity must not be negative.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Payload for creating a customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

/// One persisted line item of a bill.
///
/// `unit_price` is captured by the billing service at creation time and is
/// authoritative for totals, decoupled from the live catalog price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub id: i64,
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// Product snapshot, present when the billing service could enrich the
    /// item. Display-only; never used for totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

/// A persisted bill returned by the billing service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    /// Opaque server timestamp. The backend's date format is not part of the
    /// contract, so it is carried as-is for display.
    pub billing_date: String,
    pub customer_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub product_items: Vec<ProductItem>,
}

impl Bill {
    /// Derived total: `Σ quantity × unit_price` over the line items.
    ///
    /// Always computed from the persisted `unit_price` (price-at-purchase),
    /// never stored and never read from the live catalog. An empty item list
    /// totals zero.
    pub fn total(&self) -> Decimal {
        self.product_items
            .iter()
            .map(|item| Decimal::from(item.quantity) * item.unit_price)
            .sum()
    }
}

/// One line of a bill creation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub product_id: String,
    pub quantity: i32,
}

/// Bill creation payload: `{customerId, items: [{productId, quantity}]}`.
///
/// Only product ids and quantities are sent; item ids and unit prices are
/// server-assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub customer_id: i64,
    pub items: Vec<NewLineItem>,
}
