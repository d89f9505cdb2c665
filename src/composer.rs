//! Bill composition workflow: the draft model, its mutators, and submission.
//!
//! A [`BillDraft`] is the single in-flight bill a user is composing: one
//! selected customer plus an ordered list of line items. The draft is owned
//! by the caller (typically a view), mutated only through the explicit
//! methods here, and turned into one create request by [`BillComposer`].
//!
//! There is no state machine beyond the draft/submitted duality: a draft
//! stays mutable until a submission succeeds, at which point the persisted
//! [`Bill`] is returned and the draft resets to its initial state. A failed
//! submission leaves the draft untouched so the user can retry without
//! re-entering anything.

use crate::error::{Error, Result};
use crate::gateway::BillingGateway;
use crate::model::{Bill, NewBill, NewLineItem};

/// User-facing text for a draft that fails local validation.
const INCOMPLETE_DRAFT_MESSAGE: &str =
    "Select a customer and at least one product with a positive quantity.";

/// One product+quantity pairing inside an in-progress bill.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItemDraft {
    /// Selected product id; empty is the valid "unselected" sentinel.
    pub product_id: String,
    pub quantity: i32,
}

impl LineItemDraft {
    /// A fresh, unselected line at quantity 1.
    pub fn new() -> Self {
        LineItemDraft {
            product_id: String::new(),
            quantity: 1,
        }
    }

    /// True when the line can be submitted: product selected, quantity > 0.
    pub fn is_complete(&self) -> bool {
        !self.product_id.is_empty() && self.quantity > 0
    }
}

impl Default for LineItemDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-memory, unsaved bill being composed by a user.
///
/// Invariant: `items` always holds at least one line. [`remove_item`] will
/// not remove the last remaining line, so a view bound to the draft never
/// reaches a zero-item state.
///
/// [`remove_item`]: BillDraft::remove_item
#[derive(Clone, Debug, PartialEq)]
pub struct BillDraft {
    pub customer_id: Option<i64>,
    pub items: Vec<LineItemDraft>,
}

impl BillDraft {
    /// The initial draft state: no customer, one empty line at quantity 1.
    pub fn new() -> Self {
        BillDraft {
            customer_id: None,
            items: vec![LineItemDraft::new()],
        }
    }

    /// Append a fresh unselected line at quantity 1.
    ///
    /// Always succeeds; there is no upper bound on the item count.
    pub fn add_item(&mut self) {
        self.items.push(LineItemDraft::new());
    }

    /// Remove the line at `index`.
    ///
    /// A no-op when exactly one line remains: the last line can only be
    /// edited, never removed (floor invariant).
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds and more than one line exists.
    /// That state is unreachable through draft-driven UI mutation, so it is
    /// a caller bug rather than a recoverable error.
    pub fn remove_item(&mut self, index: usize) {
        if self.items.len() == 1 {
            return;
        }
        self.items.remove(index);
    }

    /// Pure submittability predicate.
    ///
    /// True iff a customer is selected and every line has a product and a
    /// positive quantity. Callers re-evaluate this after every mutation to
    /// gate the submit action; it is also re-checked inside
    /// [`BillComposer::submit`].
    pub fn is_submittable(&self) -> bool {
        self.customer_id.is_some() && self.items.iter().all(LineItemDraft::is_complete)
    }

    /// Reset to the initial state (no customer, one empty line).
    pub fn reset(&mut self) {
        *self = BillDraft::new();
    }
}

impl Default for BillDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a submittable [`BillDraft`] into one create request against the
/// billing gateway.
///
/// The composer owns no draft state; it borrows the caller's draft per call.
///
/// # Example
///
/// ```ignore
/// let composer = BillComposer::new(billing_gateway);
/// let mut draft = BillDraft::new();
/// draft.customer_id = Some(3);
/// draft.items[0].product_id = "p1".to_string();
///
/// let bill = composer.submit(&mut draft).await?;
/// assert_eq!(draft, BillDraft::new()); // reset on success
/// ```
pub struct BillComposer<B: BillingGateway> {
    gateway: B,
}

impl<B: BillingGateway> BillComposer<B> {
    /// Create a composer over the given billing gateway.
    pub fn new(gateway: B) -> Self {
        BillComposer { gateway }
    }

    /// Access the underlying billing gateway (list/get/delete pass-through).
    pub fn gateway(&self) -> &B {
        &self.gateway
    }

    /// Validate and submit the draft as a single create request.
    ///
    /// When the draft is not submittable this fails synchronously with
    /// `Error::Validation` and **no network call is issued**. Otherwise the
    /// payload sent is `{customerId, items: [{productId, quantity}]}` only;
    /// item ids and unit prices are server-assigned.
    ///
    /// On success the persisted [`Bill`] is returned and the draft resets to
    /// its initial empty-line state. On failure the draft is left untouched
    /// and the error carries the server-provided message when present.
    ///
    /// # Errors
    ///
    /// - `Error::Validation`: draft incomplete, nothing sent
    /// - `Error::Submission`: backend rejected the bill
    /// - `Error::Network` / `Error::Decode`: transport or contract failure
    pub async fn submit(&self, draft: &mut BillDraft) -> Result<Bill> {
        let Some(customer_id) = draft.customer_id else {
            return Err(Error::Validation(INCOMPLETE_DRAFT_MESSAGE.to_string()));
        };
        if !draft.items.iter().all(LineItemDraft::is_complete) {
            return Err(Error::Validation(INCOMPLETE_DRAFT_MESSAGE.to_string()));
        }

        let request = NewBill {
            customer_id,
            items: draft
                .items
                .iter()
                .map(|item| NewLineItem {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        };

        let bill = self.gateway.create(&request).await?;
        debug!(
            "✓ Bill #{} submitted ({} items, total {})",
            bill.id,
            bill.product_items.len(),
            bill.total()
        );

        draft.reset();
        Ok(bill)
    }
}
