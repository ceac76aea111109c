//! In-process Entity Store
//!
//! Enforces the same invariants the backend does: duplicate-pending
//! conflicts, pending-only review, legal-successor transitions, admin gates
//! and total checks. Used by tests, demos and offline development. Writes to
//! the same entity are serialized by the store locks, matching the backend's
//! serialization of conflicting writes.

use crate::context::CallerContext;
use crate::error::{ClientError, ClientResult};
use crate::store::EntityStore;
use async_trait::async_trait;
use shared::models::{
    ApplicationDetails, ApplicationRole, ApplicationStatus, Listing, Order, OrderStatus,
    PickupOrderCreate, Retailer, ReviewDecision, RoleApplication,
};
use shared::types::{IdentityId, ListingId, OrderId, RetailerId};
use shared::util::now_millis;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory Entity Store
#[derive(Default)]
pub struct MemoryStore {
    orders: RwLock<HashMap<OrderId, Order>>,
    /// Every application ever submitted; reviewed records are retained for
    /// audit and resubmission history
    applications: RwLock<Vec<RoleApplication>>,
    retailers: RwLock<HashMap<RetailerId, Retailer>>,
    listings: RwLock<HashMap<ListingId, Listing>>,
    admins: RwLock<HashSet<IdentityId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Seeding ====================

    /// Register an identity as Admin
    pub fn grant_admin(&self, identity: impl Into<IdentityId>) {
        self.admins
            .write()
            .expect("store lock poisoned")
            .insert(identity.into());
    }

    pub fn seed_retailer(&self, retailer: Retailer) {
        self.retailers
            .write()
            .expect("store lock poisoned")
            .insert(retailer.id.clone(), retailer);
    }

    pub fn seed_listing(&self, listing: Listing) {
        self.listings
            .write()
            .expect("store lock poisoned")
            .insert(listing.id.clone(), listing);
    }

    pub fn seed_order(&self, order: Order) {
        self.orders
            .write()
            .expect("store lock poisoned")
            .insert(order.id.clone(), order);
    }

    /// Build and seed a placed order, returning its id
    pub fn seed_placed_order(&self, retailer_id: impl Into<RetailerId>, total: i64) -> OrderId {
        let id = format!("order-{}", Uuid::new_v4());
        let now = now_millis();
        self.seed_order(Order {
            id: id.clone(),
            status: OrderStatus::Placed,
            retailer_id: retailer_id.into(),
            lines: Vec::new(),
            total,
            driver_id: None,
            pickup_point_id: None,
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Every application a caller has ever submitted, oldest first.
    /// Reviewed records stay on file for audit.
    pub fn application_history(&self, identity: &str) -> Vec<RoleApplication> {
        let applications = self.applications.read().expect("store lock poisoned");
        let mut history: Vec<RoleApplication> = applications
            .iter()
            .filter(|app| app.identity == identity)
            .cloned()
            .collect();
        history.sort_by_key(|app| app.submitted_at);
        history
    }

    // ==================== Internal helpers ====================

    fn is_admin(&self, ctx: &CallerContext) -> bool {
        self.admins
            .read()
            .expect("store lock poisoned")
            .contains(&ctx.identity)
    }

    fn require_admin(&self, ctx: &CallerContext) -> ClientResult<()> {
        if self.is_admin(ctx) {
            Ok(())
        } else {
            Err(ClientError::Forbidden("Admin capability required".into()))
        }
    }

    fn sorted(mut orders: Vec<Order>) -> Vec<Order> {
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        orders
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn list_all_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>> {
        self.require_admin(ctx)?;
        let orders = self.orders.read().expect("store lock poisoned");
        Ok(Self::sorted(orders.values().cloned().collect()))
    }

    async fn list_eligible_driver_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>> {
        if !ctx.has_role(shared::types::Role::Driver) {
            return Err(ClientError::Forbidden("Driver role required".into()));
        }
        let orders = self.orders.read().expect("store lock poisoned");
        let eligible = orders
            .values()
            .filter(|order| match order.status {
                OrderStatus::Confirmed => order.driver_id.is_none(),
                OrderStatus::Assigned => {
                    order.driver_id.is_none()
                        || order.driver_id.as_deref() == Some(ctx.identity.as_str())
                }
                _ => false,
            })
            .cloned()
            .collect();
        Ok(Self::sorted(eligible))
    }

    async fn retailer_orders(
        &self,
        ctx: &CallerContext,
        retailer_id: &str,
    ) -> ClientResult<Vec<Order>> {
        if !self.is_admin(ctx) && ctx.retailer_id.as_deref() != Some(retailer_id) {
            return Err(ClientError::Forbidden(
                "caller does not operate this retailer".into(),
            ));
        }
        let orders = self.orders.read().expect("store lock poisoned");
        Ok(Self::sorted(
            orders
                .values()
                .filter(|order| order.retailer_id == retailer_id)
                .cloned()
                .collect(),
        ))
    }

    async fn pickup_point_orders(
        &self,
        ctx: &CallerContext,
        pickup_point_id: &str,
    ) -> ClientResult<Vec<Order>> {
        if !self.is_admin(ctx) && ctx.pickup_point_id.as_deref() != Some(pickup_point_id) {
            return Err(ClientError::Forbidden(
                "caller does not operate this pickup point".into(),
            ));
        }
        let orders = self.orders.read().expect("store lock poisoned");
        Ok(Self::sorted(
            orders
                .values()
                .filter(|order| order.pickup_point_id.as_deref() == Some(pickup_point_id))
                .cloned()
                .collect(),
        ))
    }

    async fn get_order(&self, _ctx: &CallerContext, order_id: &str) -> ClientResult<Order> {
        let orders = self.orders.read().expect("store lock poisoned");
        orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("Order {} not found", order_id)))
    }

    async fn update_order_status(
        &self,
        ctx: &CallerContext,
        order_id: &str,
        status: OrderStatus,
    ) -> ClientResult<Order> {
        let mut orders = self.orders.write().expect("store lock poisoned");
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| ClientError::NotFound(format!("Order {} not found", order_id)))?;

        if order.status.is_terminal() {
            return Err(ClientError::InvalidTransition(format!(
                "order {} is already {}",
                order_id, order.status
            )));
        }
        if !order.status.can_transition_to(status) {
            return Err(ClientError::InvalidTransition(format!(
                "{} -> {} is not a legal transition",
                order.status, status
            )));
        }

        // a driver moving an unclaimed order to ASSIGNED claims it
        if status == OrderStatus::Assigned
            && order.driver_id.is_none()
            && ctx.has_role(shared::types::Role::Driver)
        {
            order.driver_id = Some(ctx.identity.clone());
        }
        order.status = status;
        order.updated_at = now_millis();
        Ok(order.clone())
    }

    async fn create_pickup_order(
        &self,
        ctx: &CallerContext,
        input: &PickupOrderCreate,
    ) -> ClientResult<Order> {
        if input.lines.is_empty() {
            return Err(ClientError::Validation("order has no lines".into()));
        }
        for line in &input.lines {
            if line.quantity <= 0 {
                return Err(ClientError::Validation(format!(
                    "quantity for listing {} must be positive",
                    line.listing_id
                )));
            }
        }
        if input.total != input.computed_total() {
            return Err(ClientError::Validation(format!(
                "declared total {} does not match line sum {}",
                input.total,
                input.computed_total()
            )));
        }
        {
            let retailers = self.retailers.read().expect("store lock poisoned");
            if !retailers.contains_key(&input.retailer_id) {
                return Err(ClientError::Validation(format!(
                    "unknown retailer {}",
                    input.retailer_id
                )));
            }
        }
        {
            let listings = self.listings.read().expect("store lock poisoned");
            for line in &input.lines {
                if !listings.contains_key(&line.listing_id) {
                    return Err(ClientError::Validation(format!(
                        "unknown listing {}",
                        line.listing_id
                    )));
                }
            }
        }

        let now = now_millis();
        let order = Order {
            id: format!("order-{}", Uuid::new_v4()),
            status: OrderStatus::Placed,
            retailer_id: input.retailer_id.clone(),
            lines: input.lines.clone(),
            total: input.total,
            driver_id: None,
            pickup_point_id: Some(input.pickup_point_id.clone()),
            created_at: now,
            updated_at: now,
        };
        self.orders
            .write()
            .expect("store lock poisoned")
            .insert(order.id.clone(), order.clone());
        tracing::info!(order = %order.id, pickup_point = %input.pickup_point_id, by = %ctx.identity, "Walk-in order created");
        Ok(order)
    }

    async fn submit_application(
        &self,
        ctx: &CallerContext,
        details: &ApplicationDetails,
        document_refs: &[String],
    ) -> ClientResult<RoleApplication> {
        let role = details.role();
        let mut applications = self.applications.write().expect("store lock poisoned");

        let has_pending = applications
            .iter()
            .any(|app| app.identity == ctx.identity && app.role() == role && app.status.is_pending());
        if has_pending {
            return Err(ClientError::Conflict(format!(
                "a pending {} application already exists",
                role
            )));
        }

        let application = RoleApplication {
            id: format!("app-{}", Uuid::new_v4()),
            identity: ctx.identity.clone(),
            details: details.clone(),
            document_refs: document_refs.to_vec(),
            status: ApplicationStatus::Pending,
            submitted_at: now_millis(),
            reviewed_at: None,
        };
        applications.push(application.clone());
        Ok(application)
    }

    async fn my_application(
        &self,
        ctx: &CallerContext,
        role: ApplicationRole,
    ) -> ClientResult<Option<RoleApplication>> {
        let applications = self.applications.read().expect("store lock poisoned");
        let mine: Vec<&RoleApplication> = applications
            .iter()
            .filter(|app| app.identity == ctx.identity && app.role() == role)
            .collect();
        // the open application wins; otherwise the most recent record
        let current = mine
            .iter()
            .find(|app| app.status.is_pending())
            .or_else(|| mine.iter().max_by_key(|app| app.submitted_at));
        Ok(current.map(|app| (*app).clone()))
    }

    async fn list_pending_applications(
        &self,
        ctx: &CallerContext,
    ) -> ClientResult<Vec<RoleApplication>> {
        self.require_admin(ctx)?;
        let applications = self.applications.read().expect("store lock poisoned");
        let mut pending: Vec<RoleApplication> = applications
            .iter()
            .filter(|app| app.status.is_pending())
            .cloned()
            .collect();
        pending.sort_by_key(|app| app.submitted_at);
        Ok(pending)
    }

    async fn review_application(
        &self,
        ctx: &CallerContext,
        application_id: &str,
        decision: ReviewDecision,
        reason: Option<&str>,
    ) -> ClientResult<RoleApplication> {
        self.require_admin(ctx)?;
        let mut applications = self.applications.write().expect("store lock poisoned");
        let application = applications
            .iter_mut()
            .find(|app| app.id == application_id)
            .ok_or_else(|| {
                ClientError::NotFound(format!("Application {} not found", application_id))
            })?;

        if !application.status.is_pending() {
            return Err(ClientError::InvalidState(format!(
                "application {} is not pending review",
                application_id
            )));
        }

        application.status = match decision {
            ReviewDecision::Approve => ApplicationStatus::Approved,
            ReviewDecision::Reject => {
                let reason = reason
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| {
                        ClientError::Validation("rejection requires a reason".into())
                    })?;
                ApplicationStatus::Rejected {
                    reason: reason.to_string(),
                }
            }
        };
        application.reviewed_at = Some(now_millis());
        Ok(application.clone())
    }

    async fn is_caller_admin(&self, ctx: &CallerContext) -> ClientResult<bool> {
        Ok(self.is_admin(ctx))
    }
}
