//! 销售分析 - 总额、畅销型号、日均与趋势

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::AppError;
use shared::models::Transaction;

use super::history::filter_sales_by_date;
use crate::utils::time::{days_inclusive, month_start, week_start};

/// Reporting period ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Today,
    ThisWeek,
    ThisMonth,
}

impl Period {
    /// First day of the period (Monday for weeks, the 1st for months)
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::Today => today,
            Period::ThisWeek => week_start(today),
            Period::ThisMonth => month_start(today),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Today => "Today",
            Period::ThisWeek => "This Week",
            Period::ThisMonth => "This Month",
        };
        f.write_str(s)
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "today" | "day" => Ok(Period::Today),
            "thisweek" | "week" => Ok(Period::ThisWeek),
            "thismonth" | "month" => Ok(Period::ThisMonth),
            _ => Err(AppError::validation(format!("Unknown period: {}", s.trim()))),
        }
    }
}

/// Analytics for one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_sales: Decimal,
    pub transaction_count: usize,
    /// Best seller by units, `N/A` when nothing was sold
    pub top_model: String,
    pub average_daily: Decimal,
    /// Sales per day, only days with sales
    pub trend: BTreeMap<NaiveDate, Decimal>,
}

pub fn cumulative_total(sales: &[Transaction]) -> Decimal {
    sales.iter().filter(|t| t.is_sale()).map(|t| t.total).sum()
}

/// Model with the most units sold
///
/// Ties go to the model seen first.
pub fn top_selling_model(sales: &[Transaction]) -> String {
    let mut units: IndexMap<&str, u64> = IndexMap::new();
    for t in sales.iter().filter(|t| t.is_sale()) {
        *units.entry(t.product.as_str()).or_insert(0) += u64::from(t.quantity);
    }
    let mut best: Option<(&str, u64)> = None;
    for (model, qty) in units {
        if best.is_none_or(|(_, top)| qty > top) {
            best = Some((model, qty));
        }
    }
    best.map(|(m, _)| m.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Total divided by the days elapsed in the period, two decimals
pub fn average_daily_sales(sales: &[Transaction], start: NaiveDate, today: NaiveDate) -> Decimal {
    let days = Decimal::from(days_inclusive(start, today));
    (cumulative_total(sales) / days).round_dp(2)
}

pub fn trend(sales: &[Transaction]) -> BTreeMap<NaiveDate, Decimal> {
    let mut per_day = BTreeMap::new();
    for t in sales.iter().filter(|t| t.is_sale()) {
        *per_day.entry(t.date).or_insert(Decimal::ZERO) += t.total;
    }
    per_day
}

/// Summarize every sale inside the period ending `today`
pub fn summarize(all: &[Transaction], period: Period, today: NaiveDate) -> AnalyticsSummary {
    let start = period.start(today);
    let sales = filter_sales_by_date(all, start, today);
    AnalyticsSummary {
        period,
        start,
        end: today,
        total_sales: cumulative_total(&sales),
        transaction_count: sales.len(),
        top_model: top_selling_model(&sales),
        average_daily: average_daily_sales(&sales, start, today),
        trend: trend(&sales),
    }
}
