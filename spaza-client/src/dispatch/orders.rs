//! Order workflow operations

use super::QueryDispatcher;
use crate::cache::{Mutation, ScopeKey};
use crate::context::CallerContext;
use crate::error::{ClientError, ClientResult};
use shared::models::{Order, OrderStatus, PickupOrderCreate};
use shared::types::Role;

/// Whether a caller may drive an order to `next`
///
/// Admin may drive any legal transition. Otherwise the capability follows
/// the target status: the owning retailer confirms, a driver claims an
/// unclaimed order and moves their own deliveries, the bound pickup point
/// readies and completes walk-in fulfilment, and any owning actor may
/// cancel.
fn may_write(ctx: &CallerContext, admin: bool, order: &Order, next: OrderStatus) -> bool {
    if admin {
        return true;
    }
    let retailer_owner = ctx.retailer_id.as_deref() == Some(order.retailer_id.as_str());
    let pickup_owner = order.pickup_point_id.is_some()
        && ctx.pickup_point_id == order.pickup_point_id;
    let assigned_driver = order.driver_id.as_deref() == Some(ctx.identity.as_str());

    match next {
        OrderStatus::Placed => false,
        OrderStatus::Confirmed => retailer_owner,
        OrderStatus::Assigned => ctx.has_role(Role::Driver) && order.driver_id.is_none(),
        OrderStatus::OutForDelivery => assigned_driver,
        OrderStatus::ReadyForPickup => pickup_owner,
        OrderStatus::Completed => assigned_driver || pickup_owner,
        OrderStatus::Cancelled => retailer_owner || pickup_owner || assigned_driver,
    }
}

impl QueryDispatcher {
    /// Every order regardless of status (Admin only)
    ///
    /// A failed authorization creates no cache entry for the admin scope.
    pub async fn all_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>> {
        self.require_admin(ctx).await?;
        self.cache()
            .read_through(ScopeKey::AllOrders, || self.store().list_all_orders(ctx))
            .await
    }

    /// The calling driver's eligible-order feed
    ///
    /// Eventually consistent: at most one poll interval stale (see
    /// [`crate::feed::DriverFeedWorker`]).
    pub async fn eligible_driver_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>> {
        if !ctx.has_role(Role::Driver) {
            return Err(ClientError::Forbidden("Driver role required".into()));
        }
        self.cache()
            .read_through(ScopeKey::DriverEligible(ctx.identity.clone()), || {
                self.store().list_eligible_driver_orders(ctx)
            })
            .await
    }

    /// Orders of the retailer the caller operates
    pub async fn my_retailer_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>> {
        let retailer_id = ctx
            .retailer_id
            .clone()
            .ok_or_else(|| ClientError::Forbidden("caller has no retailer binding".into()))?;
        self.cache()
            .read_through(ScopeKey::RetailerOrders(retailer_id.clone()), || {
                self.store().retailer_orders(ctx, &retailer_id)
            })
            .await
    }

    /// Orders bound to the pickup point the caller operates
    pub async fn my_pickup_point_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>> {
        let pickup_point_id = ctx
            .pickup_point_id
            .clone()
            .ok_or_else(|| ClientError::Forbidden("caller has no pickup point binding".into()))?;
        self.cache()
            .read_through(ScopeKey::PickupPointOrders(pickup_point_id.clone()), || {
                self.store().pickup_point_orders(ctx, &pickup_point_id)
            })
            .await
    }

    /// Single-order detail view
    pub async fn order_detail(&self, ctx: &CallerContext, order_id: &str) -> ClientResult<Order> {
        self.cache()
            .read_through(ScopeKey::OrderDetail(order_id.to_string()), || {
                self.store().get_order(ctx, order_id)
            })
            .await
    }

    /// Move an order to a legal successor status
    ///
    /// Pre-flights existence, the caller's write capability for the order's
    /// owning scope, and the legal-successor rule, then lets the store apply
    /// the transition. On failure the cache stays exactly as it was.
    pub async fn update_order_status(
        &self,
        ctx: &CallerContext,
        order_id: &str,
        new_status: OrderStatus,
    ) -> ClientResult<Order> {
        let current = self.store().get_order(ctx, order_id).await?;

        if current.status.is_terminal() {
            return Err(ClientError::InvalidTransition(format!(
                "order {} is already {}",
                order_id, current.status
            )));
        }
        if !current.status.can_transition_to(new_status) {
            return Err(ClientError::InvalidTransition(format!(
                "{} -> {} is not a legal transition",
                current.status, new_status
            )));
        }

        let admin = self.store().is_caller_admin(ctx).await?;
        if !may_write(ctx, admin, &current, new_status) {
            return Err(ClientError::Forbidden(format!(
                "caller may not move order {} to {}",
                order_id, new_status
            )));
        }

        let updated = self
            .store()
            .update_order_status(ctx, order_id, new_status)
            .await?;
        self.publish(Mutation::OrderStatusChanged {
            order_id: updated.id.clone(),
            retailer_id: updated.retailer_id.clone(),
            pickup_point_id: updated.pickup_point_id.clone(),
        });
        tracing::info!(order = %updated.id, status = %updated.status, by = %ctx.identity, "Order status updated");
        Ok(updated)
    }

    /// Create a walk-in order at the pickup point the caller operates
    pub async fn create_pickup_order(
        &self,
        ctx: &CallerContext,
        input: &PickupOrderCreate,
    ) -> ClientResult<Order> {
        if ctx.pickup_point_id.as_deref() != Some(input.pickup_point_id.as_str()) {
            return Err(ClientError::Forbidden(
                "caller does not operate this pickup point".into(),
            ));
        }
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
            if line.unit_price < 0 {
                return Err(ClientError::Validation(format!(
                    "unit price for listing {} must not be negative",
                    line.listing_id
                )));
            }
        }
        let computed = input.computed_total();
        if input.total != computed {
            return Err(ClientError::Validation(format!(
                "declared total {} does not match line sum {}",
                input.total, computed
            )));
        }

        let order = self.store().create_pickup_order(ctx, input).await?;
        self.publish(Mutation::PickupOrderCreated {
            order_id: order.id.clone(),
            retailer_id: order.retailer_id.clone(),
            pickup_point_id: input.pickup_point_id.clone(),
        });
        tracing::info!(order = %order.id, total = order.total, "Pickup order created");
        Ok(order)
    }
}
