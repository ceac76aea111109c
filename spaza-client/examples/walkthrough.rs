// spaza-client/examples/walkthrough.rs
// End-to-end walkthrough over the in-memory store: an applicant becomes a
// driver, a walk-in order is taken at a pickup point, and a delivery runs
// its full lifecycle.

use spaza_client::{
    ApplicationDetails, ApplicationRole, CallerContext, DocumentUpload, DriverDetails,
    MemoryBlobStore, MemoryStore, OrderStatus, PickupOrderCreate, QueryDispatcher, ReviewDecision,
};
use shared::models::{Listing, OrderLine, Retailer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let store = Arc::new(MemoryStore::new());
    store.grant_admin("admin-1");
    store.seed_retailer(Retailer {
        id: "retailer-1".into(),
        name: "Mama Dlamini's Spaza".into(),
        suburb: "Soweto".into(),
    });
    store.seed_listing(Listing {
        id: "listing-1".into(),
        retailer_id: "retailer-1".into(),
        name: "Maize meal 5kg".into(),
        unit_price: 50,
        available: true,
    });

    let dispatcher = QueryDispatcher::new(store.clone(), Arc::new(MemoryBlobStore::new()));

    let admin = CallerContext::admin("admin-1");
    let applicant = CallerContext::new("thabo");

    // 1. Apply to drive
    let application = dispatcher
        .submit_application(
            &applicant,
            ApplicationDetails::Driver(DriverDetails {
                full_name: "Thabo Mokoena".into(),
                phone: "+27 82 000 0000".into(),
                vehicle_registration: "CA 123-456".into(),
                vehicle_description: Some("white bakkie".into()),
            }),
            vec![DocumentUpload::new(
                b"selfie with licence".to_vec(),
                "image/jpeg",
            )],
        )
        .await?;
    tracing::info!("Submitted application {}", application.id);

    // 2. Admin reviews the queue and approves
    for pending in dispatcher.pending_applications(&admin).await? {
        dispatcher
            .review_application(&admin, &pending.id, ReviewDecision::Approve, None)
            .await?;
    }
    let status = dispatcher.my_status(&applicant, ApplicationRole::Driver).await?;
    tracing::info!("Application status: {:?}", status);

    // 3. A walk-in customer orders at the pickup point
    let operator = CallerContext::new("operator-1").with_pickup_point("pp-1");
    let order = dispatcher
        .create_pickup_order(
            &operator,
            &PickupOrderCreate {
                retailer_id: "retailer-1".into(),
                pickup_point_id: "pp-1".into(),
                lines: vec![OrderLine {
                    listing_id: "listing-1".into(),
                    name: "Maize meal 5kg".into(),
                    unit_price: 50,
                    quantity: 2,
                }],
                total: 100,
            },
        )
        .await?;
    tracing::info!("Walk-in order {} for R{}", order.id, order.total);

    // 4. The new driver delivers a confirmed order
    let retailer = CallerContext::new("owner-1").with_retailer("retailer-1");
    let driver = CallerContext::driver("thabo");
    dispatcher
        .update_order_status(&retailer, &order.id, OrderStatus::Confirmed)
        .await?;
    dispatcher
        .update_order_status(&driver, &order.id, OrderStatus::Assigned)
        .await?;
    dispatcher
        .update_order_status(&driver, &order.id, OrderStatus::OutForDelivery)
        .await?;
    let done = dispatcher
        .update_order_status(&driver, &order.id, OrderStatus::Completed)
        .await?;
    tracing::info!("Order {} is {}", done.id, done.status);

    Ok(())
}
