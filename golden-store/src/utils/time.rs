//! 时间工具函数 - 本地营业时间

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use shared::util::parse_date;
use shared::{AppError, AppResult, ErrorCode};

/// 当前本地时间 (门店时区即机器时区)
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 去掉秒，考勤和小票只记录到分钟
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// 解析日期参数 (YYYY-MM-DD)
pub fn parse_date_arg(date: &str) -> AppResult<NaiveDate> {
    parse_date(date).ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid date format: {}", date))
    })
}

/// 日报默认发送时间 22:00
pub fn default_report_time() -> NaiveTime {
    NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// 解析日报时间字符串 (HH:MM)，失败返回 22:00
pub fn parse_report_time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse REPORT_TIME '{}': {}, falling back to 22:00",
            s,
            e
        );
        default_report_time()
    })
}

/// 本周一
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// 本月 1 号
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 区间天数 (含首尾)，end < start 时为 1
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_week_and_month_start() {
        // 2025-03-14 is a Friday
        assert_eq!(week_start(d(2025, 3, 14)), d(2025, 3, 10));
        assert_eq!(week_start(d(2025, 3, 10)), d(2025, 3, 10));
        assert_eq!(month_start(d(2025, 3, 14)), d(2025, 3, 1));
    }

    #[test]
    fn test_days_inclusive() {
        assert_eq!(days_inclusive(d(2025, 3, 10), d(2025, 3, 14)), 5);
        assert_eq!(days_inclusive(d(2025, 3, 14), d(2025, 3, 14)), 1);
        assert_eq!(days_inclusive(d(2025, 3, 15), d(2025, 3, 14)), 1);
    }

    #[test]
    fn test_parse_report_time() {
        assert_eq!(parse_report_time("21:30"), NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert_eq!(parse_report_time("late"), default_report_time());
    }

    #[test]
    fn test_truncate_to_minute() {
        let t = NaiveTime::from_hms_opt(9, 5, 42).unwrap();
        assert_eq!(truncate_to_minute(t), NaiveTime::from_hms_opt(9, 5, 0).unwrap());
    }

    #[test]
    fn test_parse_date_arg() {
        assert!(parse_date_arg("2025-03-14").is_ok());
        let err = parse_date_arg("14/03/2025").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
