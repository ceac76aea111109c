//! Common types for the shared crate
//!
//! Identifier aliases and actor roles used across the platform

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Opaque order identifier
pub type OrderId = String;

/// Opaque retailer identifier
pub type RetailerId = String;

/// Opaque listing identifier
pub type ListingId = String;

/// Opaque pickup point identifier
pub type PickupPointId = String;

/// Opaque role application identifier
pub type ApplicationId = String;

/// Opaque caller identity (issued by the identity provider, never minted here)
pub type IdentityId = String;

/// Actor roles on the platform
///
/// A caller may hold several roles at once (an Admin who also runs a
/// pickup point, a retailer who drives their own deliveries).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Retailer,
    Driver,
    PickupPoint,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Customer => "customer",
            Role::Retailer => "retailer",
            Role::Driver => "driver",
            Role::PickupPoint => "pickup_point",
            Role::Admin => "admin",
        };
        write!(f, "{}", name)
    }
}
