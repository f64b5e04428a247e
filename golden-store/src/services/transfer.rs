//! 门店间调货 (Stock In / Stock Out)
//!
//! HQ 视为无限库存：从 HQ 调出不检查也不扣减，调入 HQ 不增加。

use chrono::NaiveDateTime;
use golden_receipt::StockReceipt;
use serde::{Deserialize, Serialize};
use shared::models::{Employee, ItemLine, TransactionKind, is_hq};
use shared::{AppError, AppResult, ErrorCode};

use super::resolve_lines;
use crate::core::StoreState;
use crate::utils::time::truncate_to_minute;

/// Transfer request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// `StockIn` or `StockOut`
    pub kind: TransactionKind,
    pub from: String,
    pub to: String,
    pub lines: Vec<ItemLine>,
}

/// Recorded transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    pub items: Vec<(String, u32)>,
    pub total_quantity: u64,
    pub receipt: String,
}

#[derive(Debug, Clone)]
pub struct TransferService {
    state: StoreState,
}

impl TransferService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    fn normalize_outlet(&self, code: &str) -> AppResult<String> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::validation("Outlet code is required"));
        }
        if is_hq(code) {
            return Ok(shared::models::HQ_CODE.to_string());
        }
        Ok(self.state.require_outlet(code)?.code)
    }

    /// Move stock between outlets, validating every line before committing
    pub fn transfer(
        &self,
        employee: &Employee,
        request: TransferRequest,
        now: NaiveDateTime,
    ) -> AppResult<TransferResult> {
        if request.kind.is_sale() {
            return Err(AppError::validation("Transfer kind must be Stock In or Stock Out"));
        }
        let from = self.normalize_outlet(&request.from)?;
        let to = self.normalize_outlet(&request.to)?;
        if from == to {
            return Err(AppError::new(ErrorCode::SameOutletTransfer));
        }

        let mut ledger = self.state.ledger.write();
        let lines = resolve_lines(&ledger, &request.lines)?;
        let total_quantity: u64 = lines.values().map(|q| u64::from(*q)).sum();
        if total_quantity == 0 {
            return Err(AppError::validation("Total quantity must be greater than zero"));
        }

        if !is_hq(&from) {
            for (model, quantity) in &lines {
                let available = ledger.stock(model, &from);
                if available < *quantity {
                    return Err(AppError::insufficient_stock(model, &from, available, *quantity));
                }
            }
        }

        let mut staged = ledger.clone();
        for (model, quantity) in &lines {
            if !is_hq(&from) {
                staged.reduce_stock(model, &from, *quantity)?;
            }
            if !is_hq(&to) {
                staged.add_stock(model, &to, *quantity)?;
            }
        }
        self.state.save_ledger(&staged)?;
        *ledger = staged;
        drop(ledger);

        let items: Vec<(String, u32)> = lines.into_iter().collect();
        let receipt = StockReceipt {
            kind: request.kind,
            date: now.date(),
            time: truncate_to_minute(now.time()),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            from_label: self.state.outlet_label(&from),
            to_label: self.state.outlet_label(&to),
            outlet: match request.kind {
                TransactionKind::StockOut => from.clone(),
                _ => to.clone(),
            },
            items: items.clone(),
        };
        let text = receipt.render();
        self.state.stock_receipts.append(receipt.date, &text)?;

        tracing::info!(
            employee_id = %employee.id,
            kind = %request.kind,
            from = %from,
            to = %to,
            total_quantity,
            "Stock transfer recorded"
        );

        Ok(TransferResult {
            items,
            total_quantity,
            receipt: text,
        })
    }
}
