//! Caller context
//!
//! The opaque session capability passed explicitly into every operation.
//! Identity provisioning is external; this value only names the caller and
//! the role bindings granted to them.

use shared::types::{IdentityId, PickupPointId, RetailerId, Role};

/// Explicit per-call session value
///
/// Never held as ambient global state: constructing one is the caller's
/// responsibility, which keeps the core testable without a simulated session.
#[derive(Debug, Clone)]
pub struct CallerContext {
    /// Opaque caller identity issued by the identity provider
    pub identity: IdentityId,
    /// Roles granted to this caller
    pub roles: Vec<Role>,
    /// Retailer binding, when the caller operates a retailer
    pub retailer_id: Option<RetailerId>,
    /// Pickup point binding, when the caller operates a pickup point
    pub pickup_point_id: Option<PickupPointId>,
}

impl CallerContext {
    /// A plain customer session
    pub fn new(identity: impl Into<IdentityId>) -> Self {
        Self {
            identity: identity.into(),
            roles: vec![Role::Customer],
            retailer_id: None,
            pickup_point_id: None,
        }
    }

    /// Grant an additional role
    pub fn with_role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Bind the caller to a retailer they operate
    pub fn with_retailer(mut self, retailer_id: impl Into<RetailerId>) -> Self {
        self.retailer_id = Some(retailer_id.into());
        self.with_role(Role::Retailer)
    }

    /// Bind the caller to a pickup point they operate
    pub fn with_pickup_point(mut self, pickup_point_id: impl Into<PickupPointId>) -> Self {
        self.pickup_point_id = Some(pickup_point_id.into());
        self.with_role(Role::PickupPoint)
    }

    /// An admin session
    pub fn admin(identity: impl Into<IdentityId>) -> Self {
        Self::new(identity).with_role(Role::Admin)
    }

    /// An approved driver session
    pub fn driver(identity: impl Into<IdentityId>) -> Self {
        Self::new(identity).with_role(Role::Driver)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_grants() {
        let ctx = CallerContext::new("user-1").with_retailer("retailer-9");
        assert!(ctx.has_role(Role::Customer));
        assert!(ctx.has_role(Role::Retailer));
        assert!(!ctx.is_admin());
        assert_eq!(ctx.retailer_id.as_deref(), Some("retailer-9"));
    }

    #[test]
    fn test_roles_are_not_duplicated() {
        let ctx = CallerContext::driver("d-1").with_role(Role::Driver);
        assert_eq!(
            ctx.roles.iter().filter(|r| **r == Role::Driver).count(),
            1
        );
    }
}
