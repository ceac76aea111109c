//! Driver feed refresh worker
//!
//! The eligible-order feed changes under a driver all the time (other
//! drivers claim orders, retailers confirm new ones), and most of those
//! mutations happen in other sessions where no local invalidation fires.
//! This worker re-fetches the feed on a fixed timer, independent of
//! invalidation events, which bounds the feed's staleness to one poll
//! interval.

use crate::cache::{ScopeKey, ScopeSelector};
use crate::context::CallerContext;
use crate::dispatch::QueryDispatcher;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Periodic refresher for one driver's eligible-order feed
pub struct DriverFeedWorker {
    handle: JoinHandle<()>,
    shutdown: CancellationToken,
}

impl DriverFeedWorker {
    /// Start the refresh loop
    ///
    /// The first refresh runs immediately; later ones every `poll_interval`.
    /// A transport failure is retried on the next tick (pure read refresh);
    /// any other failure stops the worker, since it will not heal on its own.
    pub fn spawn(
        dispatcher: Arc<QueryDispatcher>,
        ctx: CallerContext,
        poll_interval: Duration,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let handle = tokio::spawn(async move {
            let scope = ScopeKey::DriverEligible(ctx.identity.clone());
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!(driver = %ctx.identity, "Driver feed worker stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        dispatcher.cache().invalidate(&[ScopeSelector::Exact(scope.clone())]);
                        match dispatcher.eligible_driver_orders(&ctx).await {
                            Ok(orders) => {
                                tracing::trace!(driver = %ctx.identity, count = orders.len(), "Driver feed refreshed");
                            }
                            Err(e) if e.is_retryable() => {
                                tracing::warn!(driver = %ctx.identity, error = %e, "Driver feed refresh failed; retrying next tick");
                            }
                            Err(e) => {
                                tracing::error!(driver = %ctx.identity, error = %e, "Driver feed refresh failed");
                                break;
                            }
                        }
                    }
                }
            }
        });
        Self { handle, shutdown }
    }

    /// Whether the loop has exited (cancellation or a non-retryable error)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the loop and wait for it to finish
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.handle.await
            && !e.is_cancelled()
        {
            tracing::error!(error = ?e, "Driver feed worker panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use crate::store::{EntityStore, MemoryStore};
    use shared::models::OrderStatus;

    #[tokio::test]
    async fn test_feed_catches_up_without_local_invalidation() {
        let store = Arc::new(MemoryStore::new());
        store.grant_admin("admin-1");
        let admin = CallerContext::admin("admin-1");
        let driver = CallerContext::driver("driver-1");

        let dispatcher = Arc::new(QueryDispatcher::new(
            store.clone(),
            Arc::new(MemoryBlobStore::new()),
        ));

        // prime the cache with an empty feed
        assert!(
            dispatcher
                .eligible_driver_orders(&driver)
                .await
                .unwrap()
                .is_empty()
        );

        let worker = DriverFeedWorker::spawn(
            dispatcher.clone(),
            driver.clone(),
            Duration::from_millis(20),
        );

        // another session's mutation: straight against the store, so no
        // invalidation reaches this cache
        let order_id = store.seed_placed_order("retailer-1", 60);
        store
            .update_order_status(&admin, &order_id, OrderStatus::Confirmed)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;

        let feed = dispatcher.eligible_driver_orders(&driver).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, order_id);

        worker.shutdown().await;
    }

    #[tokio::test]
    async fn test_worker_stops_on_non_retryable_error() {
        let store = Arc::new(MemoryStore::new());
        let dispatcher = Arc::new(QueryDispatcher::new(
            store,
            Arc::new(MemoryBlobStore::new()),
        ));

        // not a driver: the first refresh fails with Forbidden and the loop exits
        let not_a_driver = CallerContext::new("user-1");
        let worker = DriverFeedWorker::spawn(
            dispatcher,
            not_a_driver,
            Duration::from_millis(10),
        );

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(worker.is_finished());
        worker.shutdown().await;
    }
}
