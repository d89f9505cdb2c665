//! Hypermedia list-envelope normalization.
//!
//! Two of the three backend collections (products, customers) answer list
//! requests with a Spring Data REST style envelope:
//!
//! ```text
//! { "_embedded": { "products": [ ... ] } }
//! ```
//!
//! while the billing service returns the bare array. Gateways decode every
//! list body through [`ListBody`] so callers always receive a plain ordered
//! `Vec` and never special-case the backend shape.

use serde::Deserialize;
use std::collections::HashMap;

/// A list response body in either backend shape.
///
/// Deserializes untagged: an object with `_embedded` is the envelope form,
/// an array is the bare form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    /// `{ "_embedded": { "<collection>": [...] } }`
    Enveloped {
        #[serde(rename = "_embedded")]
        embedded: HashMap<String, Vec<T>>,
    },
    /// `[ ... ]`
    Bare(Vec<T>),
}

impl<T> ListBody<T> {
    /// Unwrap into the bare ordered sequence.
    ///
    /// `collection` names the expected key under `_embedded` (`"products"`,
    /// `"customers"`). If the envelope carries a different single collection
    /// name, that collection is used; an envelope with no collections yields
    /// an empty list.
    pub fn into_items(self, collection: &str) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Enveloped { mut embedded } => {
                if let Some(items) = embedded.remove(collection) {
                    return items;
                }
                let fallback_key = embedded.keys().next().cloned();
                fallback_key
                    .and_then(|key| embedded.remove(&key))
                    .unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Customer;

    #[test]
    fn test_enveloped_body_unwraps_to_items() {
        let json = r#"{"_embedded": {"customers": [
            {"id": 1, "name": "Alice", "email": "alice@example.com"}
        ]}}"#;

        let body: ListBody<Customer> = serde_json::from_str(json).expect("Failed to deserialize");
        let customers = body.into_items("customers");
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id, 1);
    }

    #[test]
    fn test_bare_body_passes_through_unchanged() {
        let json = r#"[{"id": 1, "name": "Alice", "email": "alice@example.com"}]"#;

        let body: ListBody<Customer> = serde_json::from_str(json).expect("Failed to deserialize");
        let customers = body.into_items("customers");
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].email, "alice@example.com");
    }

    #[test]
    fn test_envelope_with_unexpected_collection_name_falls_back() {
        let json = r#"{"_embedded": {"customerList": [
            {"id": 2, "name": "Bob", "email": "bob@example.com"}
        ]}}"#;

        let body: ListBody<Customer> = serde_json::from_str(json).expect("Failed to deserialize");
        let customers = body.into_items("customers");
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Bob");
    }

    #[test]
    fn test_envelope_ignores_links_and_page_metadata() {
        // Spring Data REST bodies carry _links and page next to _embedded
        let json = r#"{
            "_embedded": {"customers": [{"id": 1, "name": "Alice", "email": "alice@example.com"}]},
            "_links": {"self": {"href": "http://localhost:8888/customer-service/api/customers"}},
            "page": {"size": 20, "totalElements": 1, "totalPages": 1, "number": 0}
        }"#;

        let body: ListBody<Customer> = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(body.into_items("customers").len(), 1);
    }

    #[test]
    fn test_empty_envelope_yields_empty_list() {
        let json = r#"{"_embedded": {}}"#;

        let body: ListBody<Customer> = serde_json::from_str(json).expect("Failed to deserialize");
        assert!(body.into_items("customers").is_empty());
    }

    #[test]
    fn test_bare_empty_array() {
        let body: ListBody<Customer> = serde_json::from_str("[]").expect("Failed to deserialize");
        assert!(body.into_items("customers").is_empty());
    }

    #[test]
    fn test_item_order_is_preserved() {
        let json = r#"{"_embedded": {"customers": [
            {"id": 3, "name": "C", "email": "c@example.com"},
            {"id": 1, "name": "A", "email": "a@example.com"},
            {"id": 2, "name": "B", "email": "b@example.com"}
        ]}}"#;

        let body: ListBody<Customer> = serde_json::from_str(json).expect("Failed to deserialize");
        let ids: Vec<i64> = body.into_items("customers").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
