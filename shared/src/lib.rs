//! Shared types for the Spaza Run platform
//!
//! Domain models, status state machines, wire-level error codes and the
//! response envelope used by every client of the platform backend.

pub mod error;
pub mod models;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use error::ErrorCode;
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
pub use types::{Role, Timestamp};
