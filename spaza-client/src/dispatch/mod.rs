//! Query Dispatcher
//!
//! Mediates all reads and writes against the Entity Store. Reads are served
//! through the view cache; writes go straight to the store and, on success,
//! publish their invalidation set before the result is returned, so a
//! dependent read issued immediately afterwards can never observe a stale
//! cached value. Failed writes leave the cache untouched.

pub mod applications;
pub mod orders;

use crate::blob::BlobStore;
use crate::cache::{Mutation, ViewCache, invalidation_set};
use crate::context::CallerContext;
use crate::error::{ClientError, ClientResult};
use crate::store::EntityStore;
use std::sync::Arc;

/// Entry point for every operation the client core exposes
pub struct QueryDispatcher {
    store: Arc<dyn EntityStore>,
    blobs: Arc<dyn BlobStore>,
    cache: Arc<ViewCache>,
}

impl QueryDispatcher {
    pub fn new(store: Arc<dyn EntityStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            blobs,
            cache: Arc::new(ViewCache::new()),
        }
    }

    /// The per-session view cache
    pub fn cache(&self) -> &ViewCache {
        &self.cache
    }

    /// The underlying store seam
    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    pub(crate) fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }

    /// Mark every scope a completed mutation affects dirty. Runs before the
    /// mutation result is handed back to the caller.
    pub(crate) fn publish(&self, mutation: Mutation) {
        let selectors = invalidation_set(&mutation);
        tracing::debug!(?mutation, scopes = selectors.len(), "Publishing invalidation");
        self.cache.invalidate(&selectors);
    }

    /// Admin gate; the store is the authority on the admin capability
    pub(crate) async fn require_admin(&self, ctx: &CallerContext) -> ClientResult<()> {
        if self.store.is_caller_admin(ctx).await? {
            Ok(())
        } else {
            Err(ClientError::Forbidden("Admin capability required".into()))
        }
    }
}
