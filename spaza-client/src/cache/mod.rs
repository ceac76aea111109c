//! Consistency / invalidation layer
//!
//! A per-session cache of previously-fetched entity views keyed by scope.
//! Reads go through [`ViewCache::read_through`]; writes never touch the
//! cache directly and instead publish the invalidation set of their
//! [`Mutation`], which marks every affected scope dirty before the mutation
//! result is handed back to the caller.

pub mod invalidation;
pub mod scope;

pub use invalidation::{Mutation, invalidation_set};
pub use scope::{ScopeKey, ScopeSelector};

use crate::error::ClientResult;
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;

/// One cached view
///
/// `epoch` increments on every invalidation of the scope. An in-flight fetch
/// records the epoch it started under and installs its result only if the
/// epoch is unchanged, so a superseded response can never clear dirtiness or
/// overwrite a newer value.
#[derive(Debug, Default)]
struct Slot {
    value: Option<serde_json::Value>,
    dirty: bool,
    epoch: u64,
}

/// Scope-keyed view cache with dirty tracking
#[derive(Debug, Default)]
pub struct ViewCache {
    slots: DashMap<ScopeKey, Slot>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the cached view if clean, otherwise run `fetch` and install the
    /// result.
    ///
    /// The slot is created before the fetch starts so that invalidations
    /// landing while the fetch is in flight (including pattern selectors)
    /// bump its epoch and cause the stale result to be discarded. A failed
    /// fetch installs nothing and leaves prior state untouched.
    pub async fn read_through<T, F, Fut>(&self, key: ScopeKey, fetch: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let epoch_at_start = {
            let slot = self.slots.entry(key.clone()).or_default();
            if !slot.dirty
                && let Some(value) = &slot.value
            {
                tracing::trace!(scope = %key, "Serving cached view");
                return serde_json::from_value(value.clone()).map_err(Into::into);
            }
            slot.epoch
        };

        tracing::debug!(scope = %key, "View absent or dirty; fetching");
        let fetched = fetch().await?;
        let value = serde_json::to_value(&fetched)?;

        let mut slot = self.slots.entry(key.clone()).or_default();
        if slot.epoch == epoch_at_start {
            slot.value = Some(value);
            slot.dirty = false;
        } else {
            tracing::debug!(scope = %key, "Discarding superseded fetch result");
        }
        Ok(fetched)
    }

    /// Mark every scope matching one of `selectors` dirty
    pub fn invalidate(&self, selectors: &[ScopeSelector]) {
        for selector in selectors {
            match selector {
                ScopeSelector::Exact(key) => {
                    let mut slot = self.slots.entry(key.clone()).or_default();
                    slot.dirty = true;
                    slot.epoch += 1;
                    tracing::trace!(scope = %key, epoch = slot.epoch, "Scope invalidated");
                }
                ScopeSelector::DriverEligibleAny => {
                    for mut entry in self.slots.iter_mut() {
                        if selector.matches(entry.key()) {
                            entry.dirty = true;
                            entry.epoch += 1;
                        }
                    }
                }
            }
        }
    }

    /// Whether a scope is currently marked dirty
    pub fn is_dirty(&self, key: &ScopeKey) -> bool {
        self.slots.get(key).map(|slot| slot.dirty).unwrap_or(false)
    }

    /// Whether the cache holds a slot for this scope at all
    pub fn contains(&self, key: &ScopeKey) -> bool {
        self.slots.contains_key(key)
    }

    /// The cached view value, if any (dirty or not)
    pub fn peek(&self, key: &ScopeKey) -> Option<serde_json::Value> {
        self.slots.get(key).and_then(|slot| slot.value.clone())
    }
}
