//! Unified error codes for the Spaza Run platform
//!
//! Error codes shared between the backend and every client surface.
//! Organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Role application errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin capability required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Requested status is not a legal successor of the current status
    InvalidTransition = 4002,
    /// Order is in a terminal status
    OrderTerminal = 4003,
    /// Declared total does not match the line sum
    TotalMismatch = 4004,
    /// Order has no lines
    EmptyOrder = 4005,

    // ==================== 5xxx: Role application ====================
    /// Application not found
    ApplicationNotFound = 5001,
    /// A pending application already exists for this identity and role
    DuplicatePending = 5002,
    /// Application is not pending review
    NotPending = 5003,
    /// A rejection requires a reason
    ReasonRequired = 5004,
    /// Required verification documents are missing
    MissingDocuments = 5005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Entity store unreachable
    StoreUnavailable = 9002,
}

impl ErrorCode {
    /// Numeric value of this code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Admin capability required",
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidTransition => "Illegal order status transition",
            ErrorCode::OrderTerminal => "Order is already completed or cancelled",
            ErrorCode::TotalMismatch => "Declared total does not match line sum",
            ErrorCode::EmptyOrder => "Order has no lines",
            ErrorCode::ApplicationNotFound => "Application not found",
            ErrorCode::DuplicatePending => "A pending application already exists",
            ErrorCode::NotPending => "Application is not pending review",
            ErrorCode::ReasonRequired => "Rejection requires a reason",
            ErrorCode::MissingDocuments => "Verification documents required",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StoreUnavailable => "Entity store unreachable",
        }
    }

    /// HTTP status the backend uses when responding with this code
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Unknown | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::TotalMismatch
            | ErrorCode::EmptyOrder
            | ErrorCode::ReasonRequired
            | ErrorCode::MissingDocuments => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound | ErrorCode::OrderNotFound | ErrorCode::ApplicationNotFound => {
                StatusCode::NOT_FOUND
            }
            ErrorCode::AlreadyExists | ErrorCode::DuplicatePending => StatusCode::CONFLICT,
            ErrorCode::InvalidTransition | ErrorCode::OrderTerminal | ErrorCode::NotPending => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorCode::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::PermissionDenied | ErrorCode::AdminRequired => StatusCode::FORBIDDEN,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            1001 => ErrorCode::NotAuthenticated,
            2001 => ErrorCode::PermissionDenied,
            2003 => ErrorCode::AdminRequired,
            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::InvalidTransition,
            4003 => ErrorCode::OrderTerminal,
            4004 => ErrorCode::TotalMismatch,
            4005 => ErrorCode::EmptyOrder,
            5001 => ErrorCode::ApplicationNotFound,
            5002 => ErrorCode::DuplicatePending,
            5003 => ErrorCode::NotPending,
            5004 => ErrorCode::ReasonRequired,
            5005 => ErrorCode::MissingDocuments,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::StoreUnavailable,
            other => return Err(format!("Unknown error code: {}", other)),
        };
        Ok(code)
    }
}
