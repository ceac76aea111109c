//! Client error types

use shared::ErrorCode;
use thiserror::Error;

/// Client error type
///
/// Every operation surfaces one of these; no error is ever swallowed into a
/// misleading success. Only [`ClientError::Transport`] is retryable, and the
/// core never retries a mutation on the caller's behalf.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed or missing input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller lacks the role or admin capability for the operation
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Referenced id does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness or in-flight invariant is violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested status is not a legal successor of the current status
    #[error("Illegal transition: {0}")]
    InvalidTransition(String),

    /// Entity is not in a state that admits the operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The entity store is unreachable; retryable by the caller
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with an undecodable payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the caller may safely retry the failed operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Map a wire-level error code to the client taxonomy
    pub fn from_wire(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::TotalMismatch
            | ErrorCode::EmptyOrder
            | ErrorCode::ReasonRequired
            | ErrorCode::MissingDocuments => ClientError::Validation(message),
            ErrorCode::NotFound | ErrorCode::OrderNotFound | ErrorCode::ApplicationNotFound => {
                ClientError::NotFound(message)
            }
            ErrorCode::AlreadyExists | ErrorCode::DuplicatePending => {
                ClientError::Conflict(message)
            }
            ErrorCode::InvalidTransition | ErrorCode::OrderTerminal => {
                ClientError::InvalidTransition(message)
            }
            ErrorCode::NotPending => ClientError::InvalidState(message),
            ErrorCode::NotAuthenticated
            | ErrorCode::PermissionDenied
            | ErrorCode::AdminRequired => ClientError::Forbidden(message),
            ErrorCode::Unknown | ErrorCode::InternalError | ErrorCode::StoreUnavailable => {
                ClientError::Transport(message)
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_mapping() {
        assert!(matches!(
            ClientError::from_wire(ErrorCode::DuplicatePending, "dup"),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            ClientError::from_wire(ErrorCode::InvalidTransition, "bad"),
            ClientError::InvalidTransition(_)
        ));
        assert!(matches!(
            ClientError::from_wire(ErrorCode::NotPending, "done"),
            ClientError::InvalidState(_)
        ));
        assert!(matches!(
            ClientError::from_wire(ErrorCode::AdminRequired, "no"),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            ClientError::from_wire(ErrorCode::StoreUnavailable, "down"),
            ClientError::Transport(_)
        ));
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(ClientError::Transport("down".into()).is_retryable());
        assert!(!ClientError::Validation("bad".into()).is_retryable());
        assert!(!ClientError::Conflict("dup".into()).is_retryable());
        assert!(!ClientError::Forbidden("no".into()).is_retryable());
    }
}
