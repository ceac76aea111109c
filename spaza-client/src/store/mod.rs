//! Entity Store seam
//!
//! The authoritative backend holding orders, applications, retailers and
//! listings. The core only ever talks to it through this trait: over HTTP in
//! production ([`RemoteStore`]), in-process for tests and offline development
//! ([`MemoryStore`]). Every semantic failure is typed; only genuine
//! reachability problems surface as [`crate::ClientError::Transport`].

pub mod memory;
pub mod remote;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

use crate::context::CallerContext;
use crate::error::ClientResult;
use async_trait::async_trait;
use shared::models::{
    ApplicationDetails, ApplicationRole, Order, OrderStatus, PickupOrderCreate, ReviewDecision,
    RoleApplication,
};

/// Operations the platform backend exposes to this client
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Every order regardless of status (Admin only)
    async fn list_all_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>>;

    /// Orders the calling driver may pick up: confirmed, or assigned with no
    /// driver yet, or assigned to the caller
    async fn list_eligible_driver_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>>;

    /// Orders referencing one retailer
    async fn retailer_orders(
        &self,
        ctx: &CallerContext,
        retailer_id: &str,
    ) -> ClientResult<Vec<Order>>;

    /// Orders bound to one pickup point
    async fn pickup_point_orders(
        &self,
        ctx: &CallerContext,
        pickup_point_id: &str,
    ) -> ClientResult<Vec<Order>>;

    /// Single-order detail
    async fn get_order(&self, ctx: &CallerContext, order_id: &str) -> ClientResult<Order>;

    /// Move an order to a legal successor status
    async fn update_order_status(
        &self,
        ctx: &CallerContext,
        order_id: &str,
        status: OrderStatus,
    ) -> ClientResult<Order>;

    /// Create a walk-in order at a pickup point
    async fn create_pickup_order(
        &self,
        ctx: &CallerContext,
        input: &PickupOrderCreate,
    ) -> ClientResult<Order>;

    /// Submit a role application for the calling identity
    async fn submit_application(
        &self,
        ctx: &CallerContext,
        details: &ApplicationDetails,
        document_refs: &[String],
    ) -> ClientResult<RoleApplication>;

    /// The caller's current application for a role, if any
    async fn my_application(
        &self,
        ctx: &CallerContext,
        role: ApplicationRole,
    ) -> ClientResult<Option<RoleApplication>>;

    /// The Admin review queue, both roles
    async fn list_pending_applications(
        &self,
        ctx: &CallerContext,
    ) -> ClientResult<Vec<RoleApplication>>;

    /// Approve or reject a pending application (Admin only)
    async fn review_application(
        &self,
        ctx: &CallerContext,
        application_id: &str,
        decision: ReviewDecision,
        reason: Option<&str>,
    ) -> ClientResult<RoleApplication>;

    /// Whether the backend recognizes the caller as an Admin
    async fn is_caller_admin(&self, ctx: &CallerContext) -> ClientResult<bool>;
}
