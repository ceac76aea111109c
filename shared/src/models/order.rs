//! Order model and lifecycle state machine
//!
//! An order moves along a fixed transition graph and is never deleted,
//! only status-terminated. Amounts are whole-rand integers.

use crate::types::{IdentityId, ListingId, OrderId, PickupPointId, RetailerId, Timestamp};
use serde::{Deserialize, Serialize};

// =============================================================================
// Order status
// =============================================================================

/// Order lifecycle status
///
/// `PLACED → CONFIRMED → ASSIGNED → OUT_FOR_DELIVERY | READY_FOR_PICKUP →
/// COMPLETED`, with `CANCELLED` reachable from every non-terminal status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Assigned,
    OutForDelivery,
    ReadyForPickup,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Legal successor statuses of this status (the static transition graph)
    pub fn successors(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Placed => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Assigned, OrderStatus::Cancelled],
            OrderStatus::Assigned => &[
                OrderStatus::OutForDelivery,
                OrderStatus::ReadyForPickup,
                OrderStatus::Cancelled,
            ],
            OrderStatus::OutForDelivery => &[OrderStatus::Completed, OrderStatus::Cancelled],
            OrderStatus::ReadyForPickup => &[OrderStatus::Completed, OrderStatus::Cancelled],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }

    /// Whether `next` is an immediate successor of this status
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.successors().contains(&next)
    }

    /// Terminal statuses admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Assigned => "ASSIGNED",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::ReadyForPickup => "READY_FOR_PICKUP",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Order
// =============================================================================

/// One line of an order: a listing at a quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    pub listing_id: ListingId,
    /// Listing name snapshot at checkout time
    pub name: String,
    /// Unit price in whole rand
    pub unit_price: i64,
    pub quantity: i32,
}

impl OrderLine {
    /// Line total in whole rand
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub retailer_id: RetailerId,
    pub lines: Vec<OrderLine>,
    /// Order total in whole rand
    pub total: i64,
    /// Assigned driver, once claimed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<IdentityId>,
    /// Pickup point handling walk-in fulfilment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_point_id: Option<PickupPointId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Sum of line totals in whole rand
    pub fn computed_total(&self) -> i64 {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}

// =============================================================================
// API request types
// =============================================================================

/// Create payload for a walk-in order taken at a pickup point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupOrderCreate {
    pub retailer_id: RetailerId,
    pub pickup_point_id: PickupPointId,
    pub lines: Vec<OrderLine>,
    /// Declared total; must equal the computed line sum
    pub total: i64,
}

impl PickupOrderCreate {
    /// Sum of line totals in whole rand
    pub fn computed_total(&self) -> i64 {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}
