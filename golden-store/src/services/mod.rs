//! 服务层 - 门店业务操作
//!
//! # 服务列表
//!
//! - [`AuthService`] - 登录与权限
//! - [`AttendanceService`] - 考勤打卡
//! - [`SalesService`] - 销售结账
//! - [`TransferService`] - 门店间调货
//! - [`StockCountService`] - 早晚盘点
//! - [`EditService`] - 库存修改、小票修改与库存查询
//! - [`RegistrationService`] - 员工注册 (仅经理)
//! - [`ReportService`] - 日报生成与发送
//!
//! 纯计算: [`history`]、[`analytics`]、[`performance`]

pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod editing;
pub mod history;
pub mod performance;
pub mod registration;
pub mod report;
pub mod sales;
pub mod stock_count;
pub mod transfer;

pub use analytics::{AnalyticsSummary, Period};
pub use attendance::AttendanceService;
pub use auth::{AuthService, require_manager};
pub use editing::{EditService, StockLookup};
pub use history::SortKey;
pub use registration::RegistrationService;
pub use report::{LogMailer, MailMessage, Mailer, OutboxMailer, ReportService, mailer_from_config};
pub use sales::{CheckoutRequest, CheckoutResult, SalesService};
pub use stock_count::StockCountService;
pub use transfer::{TransferRequest, TransferResult, TransferService};

use indexmap::IndexMap;
use shared::models::ItemLine;
use shared::{AppError, AppResult};

use crate::ledger::StockLedger;

/// Free text written into a receipt must fit on one line
pub(crate) fn ensure_single_line(label: &str, value: &str) -> AppResult<()> {
    if value.contains(['\n', '\r']) {
        return Err(AppError::validation(format!("{} must be a single line", label)));
    }
    Ok(())
}

/// Resolve request lines to catalogue names with merged quantities
///
/// Blank lines are dropped. Unknown models fail with `ProductNotFound`.
pub(crate) fn resolve_lines(
    ledger: &StockLedger,
    lines: &[ItemLine],
) -> AppResult<IndexMap<String, u32>> {
    let mut merged: IndexMap<String, u32> = IndexMap::new();
    for line in lines.iter().filter(|l| !l.is_blank()) {
        let product = ledger
            .find(&line.model)
            .ok_or_else(|| AppError::product_not_found(line.model.trim()))?;
        let quantity = u32::try_from(line.quantity)
            .map_err(|_| AppError::invalid_quantity(format!("Quantity too large: {}", line.quantity)))?;
        let entry = merged.entry(product.name.clone()).or_insert(0);
        *entry = entry
            .checked_add(quantity)
            .ok_or_else(|| AppError::invalid_quantity("Quantity too large"))?;
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::ErrorCode;
    use shared::models::Product;

    #[test]
    fn test_ensure_single_line() {
        assert!(ensure_single_line("Customer name", "Aisyah binti Omar").is_ok());
        let err = ensure_single_line("Customer name", "Eve\nModel: Ghost").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(ensure_single_line("Payment method", "Card\r").is_err());
    }

    #[test]
    fn test_resolve_lines_merges_and_skips_blank() {
        let mut ledger = StockLedger::new();
        ledger.insert(Product::new("Luna", Decimal::from(89)));
        let lines = vec![
            ItemLine::new("luna", 2),
            ItemLine::new("", 5),
            ItemLine::new("Luna", 0),
            ItemLine::new(" Luna ", 1),
        ];
        let merged = resolve_lines(&ledger, &lines).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["Luna"], 3);

        let err = resolve_lines(&ledger, &[ItemLine::new("Nova", 1)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }
}
