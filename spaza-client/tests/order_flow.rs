// spaza-client/tests/order_flow.rs
// Order lifecycle and role-scoped visibility through the dispatcher

use spaza_client::{
    CallerContext, ClientError, MemoryBlobStore, MemoryStore, OrderStatus, PickupOrderCreate,
    QueryDispatcher, ScopeKey,
};
use shared::models::{Listing, OrderLine, Retailer};
use std::sync::Arc;

fn setup() -> (Arc<MemoryStore>, QueryDispatcher) {
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
    store.seed_listing(Listing {
        id: "listing-2".into(),
        retailer_id: "retailer-1".into(),
        name: "Cooking oil 750ml".into(),
        unit_price: 35,
        available: true,
    });
    let dispatcher = QueryDispatcher::new(store.clone(), Arc::new(MemoryBlobStore::new()));
    (store, dispatcher)
}

fn admin() -> CallerContext {
    CallerContext::admin("admin-1")
}

fn retailer() -> CallerContext {
    CallerContext::new("owner-1").with_retailer("retailer-1")
}

fn driver() -> CallerContext {
    CallerContext::driver("driver-1")
}

fn operator() -> CallerContext {
    CallerContext::new("operator-1").with_pickup_point("pp-1")
}

#[tokio::test]
async fn test_stepwise_delivery_lifecycle() {
    let (store, dispatcher) = setup();
    let order_id = store.seed_placed_order("retailer-1", 100);

    let order = dispatcher
        .update_order_status(&retailer(), &order_id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);

    let order = dispatcher
        .update_order_status(&driver(), &order_id, OrderStatus::Assigned)
        .await
        .unwrap();
    assert_eq!(order.driver_id.as_deref(), Some("driver-1"));

    let order = dispatcher
        .update_order_status(&driver(), &order_id, OrderStatus::OutForDelivery)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::OutForDelivery);

    let order = dispatcher
        .update_order_status(&driver(), &order_id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
}

#[tokio::test]
async fn test_direct_completion_is_an_illegal_transition() {
    let (store, dispatcher) = setup();
    let order_id = store.seed_placed_order("retailer-1", 100);

    let err = dispatcher
        .update_order_status(&admin(), &order_id, OrderStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidTransition(_)));

    // the order is untouched
    let order = dispatcher.order_detail(&admin(), &order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Placed);
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let (_store, dispatcher) = setup();
    let err = dispatcher
        .update_order_status(&admin(), "order-missing", OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_non_admin_all_orders_creates_no_cache_entry() {
    let (_store, dispatcher) = setup();

    // context claims Admin; the store disagrees
    let impostor = CallerContext::admin("user-9");
    let err = dispatcher.all_orders(&impostor).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
    assert!(!dispatcher.cache().contains(&ScopeKey::AllOrders));
}

#[tokio::test]
async fn test_views_are_role_and_identity_scoped() {
    let (store, dispatcher) = setup();
    store.seed_retailer(Retailer {
        id: "retailer-2".into(),
        name: "Bra Joe's Corner".into(),
        suburb: "Tembisa".into(),
    });
    let mine = store.seed_placed_order("retailer-1", 50);
    let theirs = store.seed_placed_order("retailer-2", 70);

    // admin sees both
    let all = dispatcher.all_orders(&admin()).await.unwrap();
    assert_eq!(all.len(), 2);

    // the retailer sees only their own orders
    let own = dispatcher.my_retailer_orders(&retailer()).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, mine);

    // a caller without a retailer binding has no retailer view
    let err = dispatcher.my_retailer_orders(&driver()).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // drivers see confirmed orders only once they are confirmed
    assert!(
        dispatcher
            .eligible_driver_orders(&driver())
            .await
            .unwrap()
            .is_empty()
    );
    dispatcher
        .update_order_status(&admin(), &theirs, OrderStatus::Confirmed)
        .await
        .unwrap();
    let feed = dispatcher.eligible_driver_orders(&driver()).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].id, theirs);
}

#[tokio::test]
async fn test_pickup_order_total_round_trip() {
    let (_store, dispatcher) = setup();

    let order = dispatcher
        .create_pickup_order(
            &operator(),
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
        .await
        .unwrap();
    assert_eq!(order.total, 100);
    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.pickup_point_id.as_deref(), Some("pp-1"));

    // the new order is on the operator's view
    let view = dispatcher.my_pickup_point_orders(&operator()).await.unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, order.id);
}

#[tokio::test]
async fn test_pickup_order_rejects_bad_input() {
    let (_store, dispatcher) = setup();

    // declared total does not match the computed sum
    let err = dispatcher
        .create_pickup_order(
            &operator(),
            &PickupOrderCreate {
                retailer_id: "retailer-1".into(),
                pickup_point_id: "pp-1".into(),
                lines: vec![OrderLine {
                    listing_id: "listing-1".into(),
                    name: "Maize meal 5kg".into(),
                    unit_price: 50,
                    quantity: 2,
                }],
                total: 90,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    // empty line set
    let err = dispatcher
        .create_pickup_order(
            &operator(),
            &PickupOrderCreate {
                retailer_id: "retailer-1".into(),
                pickup_point_id: "pp-1".into(),
                lines: Vec::new(),
                total: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    // zero quantity
    let err = dispatcher
        .create_pickup_order(
            &operator(),
            &PickupOrderCreate {
                retailer_id: "retailer-1".into(),
                pickup_point_id: "pp-1".into(),
                lines: vec![OrderLine {
                    listing_id: "listing-2".into(),
                    name: "Cooking oil 750ml".into(),
                    unit_price: 35,
                    quantity: 0,
                }],
                total: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    // only the bound operator may take walk-ins
    let err = dispatcher
        .create_pickup_order(
            &retailer(),
            &PickupOrderCreate {
                retailer_id: "retailer-1".into(),
                pickup_point_id: "pp-1".into(),
                lines: vec![OrderLine {
                    listing_id: "listing-1".into(),
                    name: "Maize meal 5kg".into(),
                    unit_price: 50,
                    quantity: 1,
                }],
                total: 50,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn test_write_capability_is_scope_checked() {
    let (store, dispatcher) = setup();
    let order_id = store.seed_placed_order("retailer-1", 100);

    // a different retailer cannot confirm this order
    let stranger = CallerContext::new("owner-2").with_retailer("retailer-2");
    let err = dispatcher
        .update_order_status(&stranger, &order_id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // a driver cannot confirm at all
    let err = dispatcher
        .update_order_status(&driver(), &order_id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn test_terminal_orders_are_immutable() {
    let (store, dispatcher) = setup();
    let order_id = store.seed_placed_order("retailer-1", 100);

    dispatcher
        .update_order_status(&retailer(), &order_id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let err = dispatcher
        .update_order_status(&admin(), &order_id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidTransition(_)));
}
