//! Unified error codes for the GoldenHour back office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Product / stock errors
//! - 7xxx: Outlet errors
//! - 8xxx: Employee / attendance errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they can be printed,
/// logged and compared independently of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// Invalid credentials (user id/password)
    InvalidCredentials = 1002,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Manager role required
    ManagerRequired = 2002,

    // ==================== 6xxx: Product / Stock ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Invalid quantity (zero, negative or not a number)
    InvalidQuantity = 6002,
    /// Requested quantity exceeds available stock
    InsufficientStock = 6003,
    /// Invalid price
    InvalidPrice = 6004,

    // ==================== 7xxx: Outlet ====================
    /// Outlet not found
    OutletNotFound = 7001,
    /// Transfer source and destination are the same outlet
    SameOutletTransfer = 7002,

    // ==================== 8xxx: Employee ====================
    /// Employee id already registered
    EmployeeExists = 8002,
    /// Employee already clocked in for the day
    AlreadyClockedIn = 8101,
    /// Employee has no open clock-in for the day
    NotClockedIn = 8102,

    // ==================== 9xxx: System ====================
    /// Storage (file) error
    StorageError = 9002,
    /// Receipt journal error
    ReceiptError = 9003,
    /// Mail delivery failed
    MailFailed = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::InvalidCredentials => "Invalid User ID or Password",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::ManagerRequired => "Manager role is required",

            // Product / Stock
            ErrorCode::ProductNotFound => "Model not found",
            ErrorCode::InvalidQuantity => "Invalid quantity",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::InvalidPrice => "Invalid price",

            // Outlet
            ErrorCode::OutletNotFound => "Outlet not found",
            ErrorCode::SameOutletTransfer => "From and To cannot be the same",

            // Employee
            ErrorCode::EmployeeExists => "Employee ID already exists",
            ErrorCode::AlreadyClockedIn => "Already clocked in for today",
            ErrorCode::NotClockedIn => "You have not clocked in today",

            // System
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ReceiptError => "Receipt journal error",
            ErrorCode::MailFailed => "Mail delivery failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1002 => Ok(ErrorCode::InvalidCredentials),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::ManagerRequired),

            // Product / Stock
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::InvalidQuantity),
            6003 => Ok(ErrorCode::InsufficientStock),
            6004 => Ok(ErrorCode::InvalidPrice),

            // Outlet
            7001 => Ok(ErrorCode::OutletNotFound),
            7002 => Ok(ErrorCode::SameOutletTransfer),

            // Employee
            8002 => Ok(ErrorCode::EmployeeExists),
            8101 => Ok(ErrorCode::AlreadyClockedIn),
            8102 => Ok(ErrorCode::NotClockedIn),

            // System
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::ReceiptError),
            9101 => Ok(ErrorCode::MailFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::InsufficientStock.code(), 6003);
        assert_eq!(ErrorCode::SameOutletTransfer.code(), 7002);
        assert_eq!(ErrorCode::NotClockedIn.code(), 8102);
        assert_eq!(ErrorCode::MailFailed.code(), 9101);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(6003), Ok(ErrorCode::InsufficientStock));
        assert_eq!(ErrorCode::try_from(8002), Ok(ErrorCode::EmployeeExists));
        assert_eq!(ErrorCode::try_from(9003), Ok(ErrorCode::ReceiptError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::OutletNotFound).unwrap();
        assert_eq!(json, "7001");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::OutletNotFound);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::InvalidFormat.to_string(), "E0006");
        assert_eq!(ErrorCode::InsufficientStock.to_string(), "E6003");
    }
}
