//! 工具模块 - 日志与时间
//!
//! 错误类型统一使用 `shared::error`。

pub mod logger;
pub mod time;

pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode};
