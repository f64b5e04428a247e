//! 早晚盘点 - 对比实盘数量与台账库存

use chrono::{NaiveDateTime, NaiveTime};
use shared::models::{CountSession, Employee, StockCountLine, StockCountReport};
use shared::{AppError, AppResult};

use crate::core::StoreState;
use crate::utils::time::truncate_to_minute;

/// Session implied by the time of day (before noon is the morning count)
pub fn session_for(time: NaiveTime) -> CountSession {
    if time < NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN) {
        CountSession::Morning
    } else {
        CountSession::Night
    }
}

#[derive(Debug, Clone)]
pub struct StockCountService {
    state: StoreState,
}

impl StockCountService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    /// Models and recorded quantities at the employee's outlet
    pub fn expected(&self, employee: &Employee) -> Vec<(String, u32)> {
        self.state
            .ledger
            .read()
            .products()
            .map(|p| (p.name.clone(), p.stock(&employee.outlet)))
            .collect()
    }

    /// Compare counted quantities with the ledger (read only)
    pub fn count(
        &self,
        employee: &Employee,
        session: CountSession,
        counts: &[(String, u32)],
        now: NaiveDateTime,
    ) -> AppResult<StockCountReport> {
        if counts.is_empty() {
            return Err(AppError::validation("No counted models supplied"));
        }

        let ledger = self.state.ledger.read();
        let mut lines = Vec::with_capacity(counts.len());
        for (model, counted) in counts {
            let product = ledger
                .find(model)
                .ok_or_else(|| AppError::product_not_found(model.trim()))?;
            lines.push(StockCountLine {
                model: product.name.clone(),
                counted: *counted,
                recorded: product.stock(&employee.outlet),
            });
        }
        drop(ledger);

        let report = StockCountReport {
            session,
            outlet: employee.outlet.clone(),
            date: now.date(),
            time: truncate_to_minute(now.time()),
            lines,
        };

        if report.has_mismatch() {
            tracing::warn!(
                outlet = %report.outlet,
                session = %session,
                mismatches = report.mismatches(),
                "Stock count mismatch"
            );
        } else {
            tracing::info!(outlet = %report.outlet, session = %session, "Stock count tally");
        }
        Ok(report)
    }
}
