//! API Response types
//!
//! Unified response envelope spoken by the platform backend and every client.

use crate::error::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Unified API response structure
///
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Create an error response from code and message
    pub fn error_with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.code()),
            message: message.into(),
            data: None,
            details: None,
        }
    }

    /// Whether the envelope carries a success code
    pub fn is_success(&self) -> bool {
        self.code == Some(0) || self.code.is_none()
    }

    /// The error code of a failed response, if decodable
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self.code {
            Some(0) | None => None,
            Some(value) => ErrorCode::try_from(value).ok(),
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Create an error response with the code's default message
    pub fn error(code: ErrorCode) -> Self {
        Self {
            code: Some(code.code()),
            message: code.message().to_string(),
            data: None,
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_round_trip() {
        let response = ApiResponse::success(42);
        assert!(response.is_success());
        assert!(response.error_code().is_none());

        let json = serde_json::to_string(&response).unwrap();
        let parsed: ApiResponse<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.data, Some(42));
    }

    #[test]
    fn test_error_code_decoding() {
        let response =
            ApiResponse::<()>::error_with_message(ErrorCode::DuplicatePending, "already applied");
        assert!(!response.is_success());
        assert_eq!(response.error_code(), Some(ErrorCode::DuplicatePending));
        assert_eq!(response.message, "already applied");
    }

    #[test]
    fn test_unknown_code_decodes_as_none() {
        let json = r#"{"code":1234,"message":"weird"}"#;
        let parsed: ApiResponse<()> = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_success());
        assert!(parsed.error_code().is_none());
    }
}
