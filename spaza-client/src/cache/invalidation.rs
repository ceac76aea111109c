//! Mutation → affected-scope table
//!
//! Every successful mutation invalidates a deterministic set of cached
//! scopes. The mapping is a static table, not inferred at the call site:
//! a missing entry silently reintroduces staleness bugs, so the table is
//! exhaustive over [`Mutation`] and covered by tests entry-by-entry.

use super::scope::{ScopeKey, ScopeSelector};
use shared::models::ApplicationRole;
use shared::types::{IdentityId, OrderId, PickupPointId, RetailerId};

/// A completed state-changing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    ApplicationSubmitted {
        role: ApplicationRole,
        identity: IdentityId,
    },
    ApplicationReviewed {
        role: ApplicationRole,
        identity: IdentityId,
    },
    OrderStatusChanged {
        order_id: OrderId,
        retailer_id: RetailerId,
        pickup_point_id: Option<PickupPointId>,
    },
    PickupOrderCreated {
        order_id: OrderId,
        retailer_id: RetailerId,
        pickup_point_id: PickupPointId,
    },
}

/// The scopes a mutation dirties
///
/// The `my status` projection reads through the same `Application` scope as
/// `my application`, so one entry covers both views.
pub fn invalidation_set(mutation: &Mutation) -> Vec<ScopeSelector> {
    match mutation {
        Mutation::ApplicationSubmitted { role, identity }
        | Mutation::ApplicationReviewed { role, identity } => vec![
            ScopeSelector::Exact(ScopeKey::Application {
                role: *role,
                identity: identity.clone(),
            }),
            ScopeSelector::Exact(ScopeKey::PendingApplications),
        ],
        Mutation::OrderStatusChanged {
            order_id,
            retailer_id,
            pickup_point_id,
        } => {
            let mut set = vec![
                ScopeSelector::Exact(ScopeKey::AllOrders),
                ScopeSelector::DriverEligibleAny,
                ScopeSelector::Exact(ScopeKey::RetailerOrders(retailer_id.clone())),
                ScopeSelector::Exact(ScopeKey::OrderDetail(order_id.clone())),
            ];
            if let Some(pp) = pickup_point_id {
                set.push(ScopeSelector::Exact(ScopeKey::PickupPointOrders(pp.clone())));
            }
            set
        }
        Mutation::PickupOrderCreated {
            order_id,
            retailer_id,
            pickup_point_id,
        } => vec![
            ScopeSelector::Exact(ScopeKey::AllOrders),
            ScopeSelector::DriverEligibleAny,
            ScopeSelector::Exact(ScopeKey::RetailerOrders(retailer_id.clone())),
            ScopeSelector::Exact(ScopeKey::PickupPointOrders(pickup_point_id.clone())),
            ScopeSelector::Exact(ScopeKey::OrderDetail(order_id.clone())),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_submit() -> Mutation {
        Mutation::ApplicationSubmitted {
            role: ApplicationRole::Driver,
            identity: "user-1".into(),
        }
    }

    #[test]
    fn test_application_submitted_scopes() {
        let set = invalidation_set(&driver_submit());
        assert_eq!(
            set,
            vec![
                ScopeSelector::Exact(ScopeKey::Application {
                    role: ApplicationRole::Driver,
                    identity: "user-1".into()
                }),
                ScopeSelector::Exact(ScopeKey::PendingApplications),
            ]
        );
    }

    #[test]
    fn test_application_reviewed_scopes_match_submit() {
        let reviewed = invalidation_set(&Mutation::ApplicationReviewed {
            role: ApplicationRole::Driver,
            identity: "user-1".into(),
        });
        assert_eq!(reviewed, invalidation_set(&driver_submit()));
    }

    #[test]
    fn test_order_status_changed_scopes() {
        let set = invalidation_set(&Mutation::OrderStatusChanged {
            order_id: "order-5".into(),
            retailer_id: "retailer-2".into(),
            pickup_point_id: None,
        });
        assert_eq!(
            set,
            vec![
                ScopeSelector::Exact(ScopeKey::AllOrders),
                ScopeSelector::DriverEligibleAny,
                ScopeSelector::Exact(ScopeKey::RetailerOrders("retailer-2".into())),
                ScopeSelector::Exact(ScopeKey::OrderDetail("order-5".into())),
            ]
        );
    }

    #[test]
    fn test_order_status_changed_includes_pickup_point_when_bound() {
        let set = invalidation_set(&Mutation::OrderStatusChanged {
            order_id: "order-5".into(),
            retailer_id: "retailer-2".into(),
            pickup_point_id: Some("pp-3".into()),
        });
        assert!(set.contains(&ScopeSelector::Exact(ScopeKey::PickupPointOrders(
            "pp-3".into()
        ))));
    }

    #[test]
    fn test_pickup_order_created_scopes() {
        let set = invalidation_set(&Mutation::PickupOrderCreated {
            order_id: "order-9".into(),
            retailer_id: "retailer-2".into(),
            pickup_point_id: "pp-3".into(),
        });
        assert_eq!(set.len(), 5);
        assert!(set.contains(&ScopeSelector::Exact(ScopeKey::AllOrders)));
        assert!(set.contains(&ScopeSelector::DriverEligibleAny));
        assert!(set.contains(&ScopeSelector::Exact(ScopeKey::OrderDetail("order-9".into()))));
    }

    #[test]
    fn test_application_mutations_leave_order_scopes_alone() {
        let set = invalidation_set(&driver_submit());
        assert!(!set.iter().any(|s| s.matches(&ScopeKey::AllOrders)));
        assert!(
            !set.iter()
                .any(|s| s.matches(&ScopeKey::DriverEligible("user-1".into())))
        );
    }
}
