//! Shared types for the GoldenHour back office
//!
//! Domain models and the unified error type used by both the receipt
//! journal (`golden-receipt`) and the store services (`golden-store`).

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
