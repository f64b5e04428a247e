//! Error types

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for the back office, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an invalid credentials error
    ///
    /// The message never tells which of id / password was wrong.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create a manager-required error
    pub fn manager_required(action: impl Into<String>) -> Self {
        let a = action.into();
        Self::with_message(
            ErrorCode::ManagerRequired,
            format!("Only managers can {}", a),
        )
        .with_detail("action", a)
    }

    /// Create a product-not-found error
    pub fn product_not_found(name: impl Into<String>) -> Self {
        let n = name.into();
        Self::with_message(ErrorCode::ProductNotFound, format!("Model {} not found!", n))
            .with_detail("product", n)
    }

    /// Create an insufficient-stock error
    pub fn insufficient_stock(
        product: impl Into<String>,
        outlet: impl Into<String>,
        available: u32,
        requested: u32,
    ) -> Self {
        let p = product.into();
        let o = outlet.into();
        Self::with_message(
            ErrorCode::InsufficientStock,
            format!("Insufficient stock for {} at {}", p, o),
        )
        .with_detail("product", p)
        .with_detail("outlet", o)
        .with_detail("available", available)
        .with_detail("requested", requested)
    }

    /// Create an invalid quantity error
    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidQuantity, msg)
    }

    /// Create an outlet-not-found error
    pub fn outlet_not_found(code: impl Into<String>) -> Self {
        let c = code.into();
        Self::with_message(ErrorCode::OutletNotFound, format!("Outlet {} not found", c))
            .with_detail("outlet", c)
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageError, msg)
    }

    /// 是否为业务错误 (可直接展示给操作员)
    pub fn is_user_facing(&self) -> bool {
        self.code.category().is_user_facing()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::storage(format!("IO error: {}", e))
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Please fill all fields.")
            .with_detail("field", "password")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "password");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_insufficient_stock_details() {
        let err = AppError::insufficient_stock("Classic Gold", "C61", 2, 5);
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock for Classic Gold at C61");
        let details = err.details.unwrap();
        assert_eq!(details.get("available").unwrap(), 2);
        assert_eq!(details.get("requested").unwrap(), 5);
    }

    #[test]
    fn test_user_facing() {
        assert!(AppError::outlet_not_found("C99").is_user_facing());
        assert!(!AppError::storage("disk full").is_user_facing());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "model.csv");
        let err: AppError = io.into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(err.message.contains("model.csv"));
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::product_not_found("Luna");
        assert_eq!(format!("{}", err), "Model Luna not found!");
    }
}
