//! Spaza Run client core
//!
//! Coordinates the three client-side workflows of the platform: role
//! application review, order lifecycle with role-scoped visibility, and the
//! cache-consistency layer that keeps every actor's view correct after a
//! mutation. The platform backend (Entity Store) is reached through the
//! [`store::EntityStore`] seam; all reads go through the [`cache::ViewCache`]
//! and all writes publish invalidations before returning.

pub mod blob;
pub mod cache;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod feed;
pub mod store;
pub mod validation;

pub use blob::{BlobRef, BlobStore, DocumentUpload, MemoryBlobStore};
pub use cache::{Mutation, ScopeKey, ScopeSelector, ViewCache, invalidation_set};
pub use config::ClientConfig;
pub use context::CallerContext;
pub use dispatch::QueryDispatcher;
pub use error::{ClientError, ClientResult};
pub use feed::DriverFeedWorker;
pub use store::{EntityStore, MemoryStore, RemoteStore};

// Re-export shared types for convenience
pub use shared::models::{
    ApplicationDetails, ApplicationRole, ApplicationStatus, DriverDetails, Order, OrderStatus,
    PickupOrderCreate, PickupPointDetails, ReviewDecision, RoleApplication,
};
pub use shared::types::Role;
