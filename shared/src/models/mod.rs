//! Data models
//!
//! Shared between the receipt journal and the store services.
//! Records are keyed by their natural identifiers (model name, employee id,
//! outlet code); the flat files carry no surrogate ids.

pub mod attendance;
pub mod daily_report;
pub mod employee;
pub mod outlet;
pub mod performance;
pub mod product;
pub mod stock_count;
pub mod transaction;

// Re-exports
pub use attendance::*;
pub use daily_report::*;
pub use employee::*;
pub use outlet::*;
pub use performance::*;
pub use product::*;
pub use stock_count::*;
pub use transaction::*;
