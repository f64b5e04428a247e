//! 考勤打卡

use chrono::NaiveDateTime;
use shared::models::{AttendanceReceipt, AttendanceRecord, Employee};
use shared::{AppError, AppResult, ErrorCode};

use crate::core::StoreState;
use crate::storage::attendance::AttendanceRow;
use crate::utils::time::truncate_to_minute;

/// Clock-in / clock-out against `attendance.csv`
#[derive(Debug, Clone)]
pub struct AttendanceService {
    state: StoreState,
}

impl AttendanceService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    /// Append an open entry for today
    ///
    /// `AlreadyClockedIn` when today's entry is still open.
    pub fn clock_in(&self, employee: &Employee, now: NaiveDateTime) -> AppResult<AttendanceReceipt> {
        let date = now.date();
        let store = &self.state.attendance;
        if store.find_open(&employee.id, date).is_some() {
            return Err(AppError::new(ErrorCode::AlreadyClockedIn));
        }

        let record = AttendanceRecord::open(&employee.id, date, truncate_to_minute(now.time()));
        store.append(&record)?;
        tracing::info!(employee_id = %employee.id, %date, "Clocked in");

        Ok(self.receipt(employee, now, None))
    }

    /// Close the first open entry for today and rewrite the file
    pub fn clock_out(&self, employee: &Employee, now: NaiveDateTime) -> AppResult<AttendanceReceipt> {
        let date = now.date();
        let store = &self.state.attendance;
        let mut rows = store.load();

        let open = rows.iter_mut().find_map(|row| match row {
            AttendanceRow::Record(r) if r.employee_id == employee.id && r.date == date && r.is_open() => {
                Some(r)
            }
            _ => None,
        });
        let Some(record) = open else {
            return Err(AppError::new(ErrorCode::NotClockedIn));
        };
        let hours = record.close(truncate_to_minute(now.time()));

        store.save(&rows)?;
        tracing::info!(employee_id = %employee.id, %date, hours, "Clocked out");

        Ok(self.receipt(employee, now, Some(hours)))
    }

    fn receipt(
        &self,
        employee: &Employee,
        now: NaiveDateTime,
        total_hours: Option<f64>,
    ) -> AttendanceReceipt {
        AttendanceReceipt {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            outlet: self.state.outlet_label(&employee.outlet),
            date: now.date(),
            time: truncate_to_minute(now.time()),
            total_hours,
        }
    }
}
