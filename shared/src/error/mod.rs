//! Unified error system for the GoldenHour back office
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Product / stock errors
//! - 7xxx: Outlet errors
//! - 8xxx: Employee / attendance errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::insufficient_stock("Classic Gold", "C60", 1, 3);
//! assert_eq!(err.code, ErrorCode::InsufficientStock);
//!
//! let err = AppError::validation("Please enter customer name.")
//!     .with_detail("field", "customer");
//! assert!(err.details.is_some());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
