//! `attendance.csv` - `EmployeeID,Date,ClockInTime,ClockOutTime,TotalHours`
//!
//! Clock-in appends one row; clock-out rewrites the whole file. Rows that do
//! not parse are carried through rewrites untouched.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use shared::AppResult;
use shared::models::{AttendanceRecord, format_hours};
use shared::util::{format_clock, format_date, parse_clock, parse_date};

use super::{csv_bytes, csv_error, open_csv, write_atomic};

const HEADER: [&str; 5] = [
    "EmployeeID",
    "Date",
    "ClockInTime",
    "ClockOutTime",
    "TotalHours",
];

/// One line of the attendance file
#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceRow {
    Record(AttendanceRecord),
    /// Unparseable row, written back verbatim
    Raw(Vec<String>),
}

impl AttendanceRow {
    fn from_fields(fields: Vec<String>) -> Self {
        match parse_record(&fields) {
            Some(record) => AttendanceRow::Record(record),
            None => AttendanceRow::Raw(fields),
        }
    }

    fn to_fields(&self) -> Vec<String> {
        match self {
            AttendanceRow::Record(r) => record_fields(r),
            AttendanceRow::Raw(fields) => fields.clone(),
        }
    }
}

fn parse_record(fields: &[String]) -> Option<AttendanceRecord> {
    let employee_id = fields.first()?.trim();
    if employee_id.is_empty() {
        return None;
    }
    let date = parse_date(fields.get(1)?)?;
    let clock_in = parse_clock(fields.get(2)?)?;
    let clock_out = match fields.get(3).map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_clock(raw)?),
        None => None,
    };
    let total_hours = fields
        .get(4)
        .map(|s| s.trim().trim_end_matches("hours").trim())
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok());

    Some(AttendanceRecord {
        employee_id: employee_id.to_string(),
        date,
        clock_in,
        clock_out,
        total_hours,
    })
}

fn record_fields(r: &AttendanceRecord) -> Vec<String> {
    vec![
        r.employee_id.clone(),
        format_date(r.date),
        format_clock(r.clock_in),
        r.clock_out.map(format_clock).unwrap_or_default(),
        r.total_hours.map(format_hours).unwrap_or_default(),
    ]
}

/// Attendance file access
#[derive(Debug, Clone)]
pub struct AttendanceStore {
    path: PathBuf,
}

impl AttendanceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows in file order
    pub fn load(&self) -> Vec<AttendanceRow> {
        let Some(mut reader) = open_csv(&self.path) else {
            return Vec::new();
        };
        reader
            .records()
            .filter_map(|row| match row {
                Ok(record) => Some(AttendanceRow::from_fields(
                    record.iter().map(str::to_string).collect(),
                )),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable attendance row");
                    None
                }
            })
            .collect()
    }

    /// Parsed records only
    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.load()
            .into_iter()
            .filter_map(|row| match row {
                AttendanceRow::Record(r) => Some(r),
                AttendanceRow::Raw(_) => None,
            })
            .collect()
    }

    /// Open entry (no clock-out) for an employee on a date
    pub fn find_open(&self, employee_id: &str, date: NaiveDate) -> Option<AttendanceRecord> {
        self.records()
            .into_iter()
            .find(|r| r.employee_id == employee_id && r.date == date && r.is_open())
    }

    /// Append one record, writing the header first for a new file
    pub fn append(&self, record: &AttendanceRecord) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let is_new = !self.path.exists()
            || std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if is_new {
            wtr.write_record(HEADER).map_err(csv_error)?;
        }
        wtr.write_record(record_fields(record)).map_err(csv_error)?;
        wtr.flush()?;
        Ok(())
    }

    /// Rewrite the whole file
    pub fn save(&self, rows: &[AttendanceRow]) -> AppResult<()> {
        let bytes = csv_bytes(&HEADER, rows.iter().map(AttendanceRow::to_fields))?;
        write_atomic(&self.path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_append_then_close() {
        let tmp = TempDir::new().unwrap();
        let store = AttendanceStore::new(tmp.path().join("attendance.csv"));
        let record = AttendanceRecord::open("C6001", date(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        store.append(&record).unwrap();

        let open = store.find_open("C6001", date()).unwrap();
        assert_eq!(open.clock_in, record.clock_in);

        let mut rows = store.load();
        if let AttendanceRow::Record(r) = &mut rows[0] {
            r.close(NaiveTime::from_hms_opt(17, 30, 0).unwrap());
        }
        store.save(&rows).unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            text,
            "EmployeeID,Date,ClockInTime,ClockOutTime,TotalHours\n\
             C6001,2025-03-14,09:00 AM,05:30 PM,8.5 hours\n"
        );
        assert!(store.find_open("C6001", date()).is_none());
    }

    #[test]
    fn test_raw_rows_survive_rewrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("attendance.csv");
        std::fs::write(
            &path,
            "EmployeeID,Date,ClockInTime,ClockOutTime,TotalHours\n\
             C6001,yesterday,09:00 AM,,\n\
             C6002,2025-03-14,09:15 AM,,\n",
        )
        .unwrap();
        let store = AttendanceStore::new(&path);
        let rows = store.load();
        assert!(matches!(rows[0], AttendanceRow::Raw(_)));
        assert!(matches!(rows[1], AttendanceRow::Record(_)));

        store.save(&rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("C6001,yesterday,09:00 AM,,"));
    }
}
