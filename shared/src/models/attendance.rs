//! Attendance Model (考勤打卡)

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One row of `attendance.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: String,
    pub date: NaiveDate,
    pub clock_in: NaiveTime,
    /// None while the employee is still clocked in
    pub clock_out: Option<NaiveTime>,
    /// Hours worked, set on clock-out
    pub total_hours: Option<f64>,
}

impl AttendanceRecord {
    pub fn open(employee_id: impl Into<String>, date: NaiveDate, clock_in: NaiveTime) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            clock_in,
            clock_out: None,
            total_hours: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Close the entry, computing whole minutes worked / 60
    ///
    /// A clock-out earlier than the clock-in yields 0 hours.
    pub fn close(&mut self, clock_out: NaiveTime) -> f64 {
        let minutes = (clock_out - self.clock_in).num_minutes().max(0);
        let hours = minutes as f64 / 60.0;
        self.clock_out = Some(clock_out);
        self.total_hours = Some(hours);
        hours
    }

    /// `7.5 hours` style label stored in the TotalHours column
    pub fn hours_label(&self) -> Option<String> {
        self.total_hours.map(format_hours)
    }
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.1} hours", hours)
}

/// Outcome returned to the operator after clocking in or out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceReceipt {
    pub employee_id: String,
    pub employee_name: String,
    pub outlet: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub total_hours: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_close_computes_hours() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut rec = AttendanceRecord::open("C6001", date, t(9, 0));
        assert!(rec.is_open());
        let hours = rec.close(t(17, 30));
        assert_eq!(hours, 8.5);
        assert!(!rec.is_open());
        assert_eq!(rec.hours_label().unwrap(), "8.5 hours");
    }

    #[test]
    fn test_close_before_open_is_zero() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut rec = AttendanceRecord::open("C6001", date, t(9, 0));
        assert_eq!(rec.close(t(8, 0)), 0.0);
    }
}
