//! Compose and submit a bill against the in-memory gateways.
//!
//! Run with: cargo run --example compose_and_submit

use backoffice_kit::model::{NewCustomer, NewProduct};
use backoffice_kit::{Backoffice, BillDraft, CustomerGateway, ProductGateway};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> backoffice_kit::Result<()> {
    env_logger::init();

    // No backend needed: the in-memory gateways reproduce the billing
    // service's create semantics (stock checks, unit-price capture).
    let office = Backoffice::in_memory();

    let laptop = office
        .products()
        .create(&NewProduct {
            name: "Laptop".to_string(),
            price: "999.90".parse::<Decimal>().map_err(|e| e.to_string())?,
            quantity: 5,
        })
        .await?;
    let mouse = office
        .products()
        .create(&NewProduct {
            name: "Mouse".to_string(),
            price: "19.50".parse::<Decimal>().map_err(|e| e.to_string())?,
            quantity: 40,
        })
        .await?;
    let alice = office
        .customers()
        .create(&NewCustomer {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await?;

    // Compose: one laptop, two mice
    let mut draft = BillDraft::new();
    draft.customer_id = Some(alice.id);
    draft.items[0].product_id = laptop.id.clone();
    draft.add_item();
    draft.items[1].product_id = mouse.id.clone();
    draft.items[1].quantity = 2;

    println!("draft submittable: {}", draft.is_submittable());

    let bill = office.submit_bill(&mut draft).await?;
    println!("bill #{} created, total {}", bill.id, bill.total());
    for item in &bill.product_items {
        let name = item.product.as_ref().map_or(item.product_id.as_str(), |p| p.name.as_str());
        println!("  {} x {} @ {}", item.quantity, name, item.unit_price);
    }

    // The draft reset after the successful submission
    println!("draft after submit: {:?}", draft);

    // Oversized orders are rejected with the server message, draft preserved
    let mut greedy = BillDraft::new();
    greedy.customer_id = Some(alice.id);
    greedy.items[0].product_id = laptop.id.clone();
    greedy.items[0].quantity = 100;
    match office.submit_bill(&mut greedy).await {
        Ok(_) => unreachable!("stock check should reject this"),
        Err(err) => println!("rejected: {}", err.user_message()),
    }

    let overview = office.load_overview().await?;
    println!(
        "{} products, {} customers, {} bills",
        overview.products.len(),
        overview.customers.len(),
        overview.bills.len()
    );

    Ok(())
}
