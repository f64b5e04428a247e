//! Error types for the receipt library

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Receipt error types
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error while reading or appending a receipt file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No receipt file for the requested date
    #[error("No records found for {0}")]
    NoRecords(String),

    /// No receipt block matched the lookup
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Field name or value not accepted for amendment
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

/// Result type for receipt operations
pub type ReceiptResult<T> = Result<T, ReceiptError>;

impl From<ReceiptError> for AppError {
    fn from(e: ReceiptError) -> Self {
        match e {
            ReceiptError::Io(io) => {
                AppError::with_message(ErrorCode::ReceiptError, format!("Receipt IO error: {}", io))
            }
            ReceiptError::NoRecords(what) => AppError::with_message(
                ErrorCode::NotFound,
                format!("No sales records found for {}", what),
            ),
            ReceiptError::RecordNotFound(what) => AppError::with_message(
                ErrorCode::NotFound,
                format!("Record not found for customer: {}", what),
            ),
            ReceiptError::InvalidField(msg) => AppError::validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_to_receipt_code() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "sales_2025-03-14.txt");
        let err: AppError = ReceiptError::Io(io).into();
        assert_eq!(err.code, ErrorCode::ReceiptError);
        assert!(err.message.contains("sales_2025-03-14.txt"));
    }

    #[test]
    fn test_lookup_failures_map_to_not_found() {
        let err: AppError = ReceiptError::RecordNotFound("Aisyah".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        let err: AppError = ReceiptError::InvalidField("bad".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
