//! Property-based tests for the bill composer.
//!
//! These tests use proptest to verify that the draft invariants hold for
//! randomly generated drafts and mutation sequences, catching edge cases
//! that example-based tests might miss.
//!
//! # Properties Tested
//!
//! 1. **Floor Property**: a draft never reaches zero items
//! 2. **Append Property**: `add_item` grows the draft by exactly one fresh line
//! 3. **Gate Property**: `is_submittable` is exactly the conjunction of its parts
//! 4. **Total Property**: `Bill::total` equals the sum over its line items

use backoffice_kit::model::{Bill, ProductItem};
use backoffice_kit::{BillDraft, LineItemDraft};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Strategies
// ============================================================================

fn arb_line() -> impl Strategy<Value = LineItemDraft> {
    ("[a-z0-9]{0,8}", -3i32..10).prop_map(|(product_id, quantity)| LineItemDraft {
        product_id,
        quantity,
    })
}

fn arb_draft() -> impl Strategy<Value = BillDraft> {
    (
        proptest::option::of(1i64..1000),
        proptest::collection::vec(arb_line(), 1..8),
    )
        .prop_map(|(customer_id, items)| BillDraft { customer_id, items })
}

fn arb_item() -> impl Strategy<Value = ProductItem> {
    (1i64..1000, "[a-z0-9]{1,8}", 1i32..100, 0i64..100_000i64).prop_map(
        |(id, product_id, quantity, cents)| ProductItem {
            id,
            product_id,
            quantity,
            unit_price: Decimal::new(cents, 2),
            product: None,
        },
    )
}

fn arb_bill() -> impl Strategy<Value = Bill> {
    (1i64..1000, proptest::collection::vec(arb_item(), 0..6)).prop_map(|(id, product_items)| {
        Bill {
            id,
            billing_date: "2024-05-14T10:30:00Z".to_string(),
            customer_id: 1,
            customer: None,
            product_items,
        }
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Removing from a single-item draft never changes the item count.
    #[test]
    fn prop_remove_respects_floor(line in arb_line()) {
        let mut draft = BillDraft {
            customer_id: None,
            items: vec![line.clone()],
        };

        draft.remove_item(0);

        prop_assert_eq!(draft.items.len(), 1);
        prop_assert_eq!(&draft.items[0], &line);
    }

    /// No in-bounds removal sequence can empty a draft.
    #[test]
    fn prop_removal_sequences_never_empty_the_draft(
        mut draft in arb_draft(),
        removals in proptest::collection::vec(any::<proptest::sample::Index>(), 0..16),
    ) {
        for index in removals {
            let i = index.index(draft.items.len());
            draft.remove_item(i);
            prop_assert!(!draft.items.is_empty());
        }
    }

    /// `add_item` appends exactly one unselected line at quantity 1.
    #[test]
    fn prop_add_item_appends_one_fresh_line(mut draft in arb_draft()) {
        let before = draft.items.len();

        draft.add_item();

        prop_assert_eq!(draft.items.len(), before + 1);
        let last = draft.items.last().expect("draft cannot be empty");
        prop_assert_eq!(last.product_id.as_str(), "");
        prop_assert_eq!(last.quantity, 1);
    }

    /// A fresh line always blocks submission, whatever the rest looks like.
    #[test]
    fn prop_fresh_line_blocks_submission(mut draft in arb_draft()) {
        draft.add_item();
        prop_assert!(!draft.is_submittable());
    }

    /// `is_submittable` is exactly: customer set AND every line complete.
    #[test]
    fn prop_submittable_matches_definition(draft in arb_draft()) {
        let expected = draft.customer_id.is_some()
            && draft
                .items
                .iter()
                .all(|item| !item.product_id.is_empty() && item.quantity > 0);

        prop_assert_eq!(draft.is_submittable(), expected);
    }

    /// Without a customer, no draft is submittable.
    #[test]
    fn prop_no_customer_never_submittable(mut draft in arb_draft()) {
        draft.customer_id = None;
        prop_assert!(!draft.is_submittable());
    }

    /// The derived total equals the item-wise sum, and is zero iff there are
    /// no items (quantities and prices are non-negative by construction).
    #[test]
    fn prop_total_is_item_sum(bill in arb_bill()) {
        let expected: Decimal = bill
            .product_items
            .iter()
            .map(|item| Decimal::from(item.quantity) * item.unit_price)
            .sum();

        prop_assert_eq!(bill.total(), expected);
        if bill.product_items.is_empty() {
            prop_assert_eq!(bill.total(), Decimal::ZERO);
        }
    }

    /// Resetting from any state restores the initial draft.
    #[test]
    fn prop_reset_restores_initial_state(mut draft in arb_draft()) {
        draft.reset();
        prop_assert_eq!(draft, BillDraft::new());
    }
}
