//! End-to-end bill composition workflow over the in-memory gateways.
//!
//! Exercises the full path a back-office view drives: load reference data,
//! mutate a draft, submit it, derive totals from the persisted bill, and
//! delete bills with confirmation-before-local-removal semantics.

use backoffice_kit::{Backoffice, BillDraft, BillingGateway, CustomerGateway, ProductGateway};
use backoffice_kit::error::Error;
use backoffice_kit::model::{NewCustomer, NewLineItem, NewProduct};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().expect("Failed to parse decimal")
}

async fn seeded_office() -> Backoffice<
    backoffice_kit::gateway::InMemoryProductGateway,
    backoffice_kit::gateway::InMemoryCustomerGateway,
    backoffice_kit::gateway::InMemoryBillingGateway,
> {
    let office = Backoffice::in_memory();

    office
        .products()
        .create(&NewProduct {
            name: "Laptop".to_string(),
            price: dec("9.99"),
            quantity: 10,
        })
        .await
        .expect("Failed to create product");
    office
        .products()
        .create(&NewProduct {
            name: "Keyboard".to_string(),
            price: dec("5.5"),
            quantity: 10,
        })
        .await
        .expect("Failed to create product");
    office
        .customers()
        .create(&NewCustomer {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .expect("Failed to create customer");

    office
}

#[tokio::test]
async fn test_round_trip_submission_totals_and_resets() {
    let office = seeded_office().await;
    let overview = office.load_overview().await.expect("Failed to load overview");

    let mut draft = BillDraft::new();
    draft.customer_id = Some(overview.customers[0].id);
    draft.items[0].product_id = overview.products[0].id.clone();
    draft.items[0].quantity = 2;
    assert!(draft.is_submittable());

    let bill = office.submit_bill(&mut draft).await.expect("Failed to submit");

    // Total derives from the persisted unit price
    assert_eq!(bill.product_items[0].unit_price, dec("9.99"));
    assert_eq!(bill.total(), dec("19.98"));

    // Draft is back to its initial state
    assert_eq!(draft, BillDraft::new());

    // The persisted bill shows up in the list
    let bills = office.billing().list().await.expect("Failed to list bills");
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].id, bill.id);
}

#[tokio::test]
async fn test_multi_line_bill_totals_across_items() {
    let office = seeded_office().await;
    let overview = office.load_overview().await.expect("Failed to load overview");

    let mut draft = BillDraft::new();
    draft.customer_id = Some(overview.customers[0].id);
    draft.items[0].product_id = overview.products[0].id.clone(); // 9.99
    draft.items[0].quantity = 2;
    draft.add_item();
    draft.items[1].product_id = overview.products[1].id.clone(); // 5.5
    draft.items[1].quantity = 1;

    let bill = office.submit_bill(&mut draft).await.expect("Failed to submit");
    assert_eq!(bill.product_items.len(), 2);
    assert_eq!(bill.total(), dec("25.48"));
}

#[tokio::test]
async fn test_rejected_submission_preserves_draft_for_retry() {
    let office = seeded_office().await;
    let overview = office.load_overview().await.expect("Failed to load overview");

    let mut draft = BillDraft::new();
    draft.customer_id = Some(overview.customers[0].id);
    draft.items[0].product_id = overview.products[0].id.clone();
    draft.items[0].quantity = 999; // more than stock

    let before = draft.clone();
    let err = office.submit_bill(&mut draft).await.expect_err("must reject");

    assert!(matches!(err, Error::Submission(_)));
    assert!(err.user_message().contains("Insufficient stock"));
    assert_eq!(draft, before, "draft must survive a failed submission");
    assert!(office.billing().list().await.expect("Failed to list").is_empty());

    // Retry with a valid quantity succeeds without re-entering the draft
    draft.items[0].quantity = 1;
    office.submit_bill(&mut draft).await.expect("Failed to resubmit");
}

#[tokio::test]
async fn test_incomplete_draft_never_reaches_the_gateway() {
    let office = seeded_office().await;

    let mut draft = BillDraft::new(); // no customer, no product
    let err = office.submit_bill(&mut draft).await.expect_err("must reject");

    assert!(matches!(err, Error::Validation(_)));
    assert!(office.billing().list().await.expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_delete_updates_list_only_after_confirmation() {
    let office = seeded_office().await;
    let overview = office.load_overview().await.expect("Failed to load overview");

    let mut draft = BillDraft::new();
    draft.customer_id = Some(overview.customers[0].id);
    draft.items[0].product_id = overview.products[0].id.clone();
    let bill = office.submit_bill(&mut draft).await.expect("Failed to submit");

    office.delete_bill(bill.id).await.expect("Failed to delete");
    assert!(office.billing().list().await.expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_stock_decrements_across_successive_bills() {
    let office = seeded_office().await;
    let overview = office.load_overview().await.expect("Failed to load overview");
    let product_id = overview.products[0].id.clone();
    let customer_id = overview.customers[0].id;

    for _ in 0..2 {
        let mut draft = BillDraft::new();
        draft.customer_id = Some(customer_id);
        draft.items[0].product_id = product_id.clone();
        draft.items[0].quantity = 4;
        office.submit_bill(&mut draft).await.expect("Failed to submit");
    }

    // 10 - 4 - 4 = 2 left; a third bill of 4 must be rejected
    let remaining = office
        .products()
        .get(&product_id)
        .await
        .expect("Failed to get product")
        .quantity;
    assert_eq!(remaining, 2);

    let mut draft = BillDraft::new();
    draft.customer_id = Some(customer_id);
    draft.items[0].product_id = product_id;
    draft.items[0].quantity = 4;
    let err = office.submit_bill(&mut draft).await.expect_err("must reject");
    assert!(err.user_message().contains("Insufficient stock"));
}

#[tokio::test]
async fn test_concurrent_overview_loads_share_gateways() {
    let office = std::sync::Arc::new(seeded_office().await);

    let mut handles = vec![];
    for _ in 0..5 {
        let office = std::sync::Arc::clone(&office);
        handles.push(tokio::spawn(async move {
            office.load_overview().await.expect("Failed to load overview")
        }));
    }

    for handle in handles {
        let overview = handle.await.expect("Task failed");
        assert_eq!(overview.products.len(), 2);
        assert_eq!(overview.customers.len(), 1);
    }
}

#[tokio::test]
async fn test_billing_gateway_create_is_usable_directly() {
    let office = seeded_office().await;
    let overview = office.load_overview().await.expect("Failed to load overview");

    // Views that bypass the composer still get full server semantics
    let bill = office
        .billing()
        .create(&backoffice_kit::NewBill {
            customer_id: overview.customers[0].id,
            items: vec![NewLineItem {
                product_id: overview.products[1].id.clone(),
                quantity: 3,
            }],
        })
        .await
        .expect("Failed to create bill");

    assert_eq!(bill.total(), dec("16.5"));
    let fetched = office.billing().get(bill.id).await.expect("Failed to get bill");
    assert_eq!(fetched, bill);
}
