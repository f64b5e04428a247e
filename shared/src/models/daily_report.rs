//! Daily Report Model (日结报告)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-employee line of the daily report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSales {
    pub employee_id: String,
    pub employee_name: String,
    pub total_sales: Decimal,
    pub transaction_count: u32,
}

/// Daily Report - end-of-day sales summary sent by e-mail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReport {
    /// Business date (YYYY-MM-DD)
    pub business_date: NaiveDate,
    pub total_sales: Decimal,
    /// Number of sale lines recorded
    pub transaction_count: usize,
    pub units_sold: u64,
    /// Best seller by units, `N/A` when nothing was sold
    pub top_product: String,
    pub by_employee: Vec<EmployeeSales>,
    /// When the report was generated (Unix millis)
    pub generated_at: i64,
}
