//! # API Error Type
//!
//! Unified error type for session commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function → Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── StoreError::NotFound ────────────► NOT_FOUND                │
//! │         ├── StoreError::Unavailable / Corrupt ► STORE_ERROR (logged)    │
//! │         ├── CoreError::InvalidTransition ────► INVALID_TRANSITION       │
//! │         ├── CoreError::Validation ───────────► VALIDATION_ERROR         │
//! │         └── role check ──────────────────────► FORBIDDEN                │
//! │                                                                         │
//! │  Client receives: { "code": "INVALID_TRANSITION", "message": "..." }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use brew_core::{CoreError, ValidationError};

use crate::store::StoreError;

/// Error returned from every command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    Forbidden,
    CartError,
    ItemUnavailable,
    InvalidTransition,
    UnknownFulfillmentType,
    PaymentError,
    StoreError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            CoreError::UnknownFulfillmentType { .. } => ErrorCode::UnknownFulfillmentType,
            CoreError::ConfigurationMismatch { .. } | CoreError::EmptyCart => ErrorCode::CartError,
            CoreError::ItemUnavailable { .. } => ErrorCode::ItemUnavailable,
            CoreError::PaymentAlreadySettled { .. } | CoreError::PaymentDeclined { .. } => {
                ErrorCode::PaymentError
            }
            CoreError::Validation(e) => return ApiError::validation(e.to_string()),
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(entity, &id),
            StoreError::Duplicate { entity, id } => ApiError::new(
                ErrorCode::StoreError,
                format!("{} already exists: {}", entity, id),
            ),
            StoreError::Unavailable(reason) => {
                tracing::error!(%reason, "Store unavailable");
                ApiError::new(ErrorCode::StoreError, "Could not reach the order service")
            }
            StoreError::Corrupt { entity, id, reason } => {
                tracing::error!(entity, %id, %reason, "Stored record could not be read");
                ApiError::new(ErrorCode::StoreError, "Stored record could not be read")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::OrderStatus;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::InvalidTransition {
            order_id: "o-1".to_string(),
            from: OrderStatus::Ready,
            to: OrderStatus::Preparing,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert_eq!(err.message, "Order o-1 cannot move from ready to preparing");

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_store_error_mapping() {
        let err: ApiError = StoreError::not_found("Order", "o-9").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found: o-9");

        let err: ApiError = StoreError::Unavailable("timeout".to_string()).into();
        assert_eq!(err.code, ErrorCode::StoreError);
        assert!(!err.message.contains("timeout"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::forbidden("nope")).unwrap();
        assert_eq!(json["code"], "FORBIDDEN");
        assert_eq!(json["message"], "nope");
    }
}
