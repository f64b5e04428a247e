//! Performance Model (员工业绩排行)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated sales for one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub employee_id: String,
    pub total_sales: Decimal,
    pub transaction_count: u32,
}

impl PerformanceEntry {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            total_sales: Decimal::ZERO,
            transaction_count: 0,
        }
    }
}

/// Leaderboard row with resolved employee name and rank label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPerformance {
    pub rank: usize,
    pub rank_label: String,
    pub employee_name: String,
    #[serde(flatten)]
    pub entry: PerformanceEntry,
}
