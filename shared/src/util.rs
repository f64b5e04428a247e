//! Date/time and money formatting shared by receipts, attendance and reports

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Clock format used on receipts and in `attendance.csv` (e.g. `02:05 PM`)
pub const CLOCK_FORMAT: &str = "%I:%M %p";

/// Date format used everywhere (ISO, e.g. `2025-03-14`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Parse a 12-hour clock value
///
/// Accepts `02:05 PM`, `2:05 pm` and `02:05 p.m.`.
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    let cleaned = s.trim().replace('.', "").to_ascii_uppercase();
    NaiveTime::parse_from_str(&cleaned, CLOCK_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse an amount written as `RM12.50`, `RM 12.50` or `12.50`
pub fn parse_money(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("RM")
        .or_else(|| trimmed.strip_prefix("rm"))
        .unwrap_or(trimmed)
        .trim();
    Decimal::from_str(digits).ok()
}

/// Render an amount with two decimals (no currency prefix)
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_roundtrip() {
        let t = NaiveTime::from_hms_opt(14, 5, 0).unwrap();
        assert_eq!(format_clock(t), "02:05 PM");
        assert_eq!(parse_clock("02:05 PM"), Some(t));
        assert_eq!(parse_clock("2:05 pm"), Some(t));
        assert_eq!(parse_clock("02:05 p.m."), Some(t));
        assert_eq!(parse_clock("14:05"), None);
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("RM12.50"), Some(Decimal::new(1250, 2)));
        assert_eq!(parse_money("RM 7"), Some(Decimal::from(7)));
        assert_eq!(parse_money("3.10"), Some(Decimal::new(310, 2)));
        assert_eq!(parse_money("RMabc"), None);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(125, 1)), "12.50");
        assert_eq!(format_money(Decimal::new(1, 3)), "0.00");
    }
}
