//! Cache scope keys
//!
//! A scope key names one cached view: an entity kind plus whatever
//! parameters disambiguate it (owner id, order id, applicant identity).

use shared::models::ApplicationRole;
use shared::types::{IdentityId, OrderId, PickupPointId, RetailerId};

/// Key of a cached view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    /// Admin view of every order
    AllOrders,
    /// A driver's eligible-order feed
    DriverEligible(IdentityId),
    /// Orders owned by one retailer
    RetailerOrders(RetailerId),
    /// Orders bound to one pickup point
    PickupPointOrders(PickupPointId),
    /// Single-order detail
    OrderDetail(OrderId),
    /// One identity's application for one role
    Application {
        role: ApplicationRole,
        identity: IdentityId,
    },
    /// Admin review queue (both roles)
    PendingApplications,
}

impl std::fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeKey::AllOrders => write!(f, "orders:all"),
            ScopeKey::DriverEligible(identity) => {
                write!(f, "orders:driver-eligible:{}", identity)
            }
            ScopeKey::RetailerOrders(id) => write!(f, "orders:retailer:{}", id),
            ScopeKey::PickupPointOrders(id) => write!(f, "orders:pickup-point:{}", id),
            ScopeKey::OrderDetail(id) => write!(f, "orders:detail:{}", id),
            ScopeKey::Application { role, identity } => {
                write!(f, "application:{}:{}", role, identity)
            }
            ScopeKey::PendingApplications => write!(f, "applications:pending"),
        }
    }
}

/// Pattern over scope keys, used by the invalidation table
///
/// Most mutations name their affected scopes exactly. Order mutations cannot
/// enumerate every driver whose eligible feed they perturb, so those scopes
/// match by pattern instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSelector {
    Exact(ScopeKey),
    /// Every driver's eligible-order feed
    DriverEligibleAny,
}

impl ScopeSelector {
    /// Whether a concrete cached scope falls under this selector
    pub fn matches(&self, key: &ScopeKey) -> bool {
        match self {
            ScopeSelector::Exact(exact) => exact == key,
            ScopeSelector::DriverEligibleAny => matches!(key, ScopeKey::DriverEligible(_)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keys() {
        assert_eq!(ScopeKey::AllOrders.to_string(), "orders:all");
        assert_eq!(
            ScopeKey::RetailerOrders("retailer-7".into()).to_string(),
            "orders:retailer:retailer-7"
        );
        assert_eq!(
            ScopeKey::Application {
                role: ApplicationRole::Driver,
                identity: "user-1".into()
            }
            .to_string(),
            "application:driver:user-1"
        );
    }

    #[test]
    fn test_selector_matching() {
        let any = ScopeSelector::DriverEligibleAny;
        assert!(any.matches(&ScopeKey::DriverEligible("driver-1".into())));
        assert!(any.matches(&ScopeKey::DriverEligible("driver-2".into())));
        assert!(!any.matches(&ScopeKey::AllOrders));

        let exact = ScopeSelector::Exact(ScopeKey::PendingApplications);
        assert!(exact.matches(&ScopeKey::PendingApplications));
        assert!(!exact.matches(&ScopeKey::AllOrders));
    }
}
