//! 销售结账
//!
//! 先校验全部行的库存，再统一扣减、保存台账并追加销售小票。

use chrono::NaiveDateTime;
use golden_receipt::{SaleItem, SaleReceipt};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Employee, ItemLine, Transaction, TransactionKind};
use shared::{AppError, AppResult};

use super::{ensure_single_line, resolve_lines};
use crate::core::StoreState;
use crate::utils::time::truncate_to_minute;

/// Checkout request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer: String,
    pub payment_method: String,
    pub lines: Vec<ItemLine>,
}

/// Recorded sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResult {
    pub transactions: Vec<Transaction>,
    pub grand_total: Decimal,
    pub receipt: String,
}

#[derive(Debug, Clone)]
pub struct SalesService {
    state: StoreState,
}

impl SalesService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    /// Sell from the employee's outlet
    ///
    /// Blank lines are ignored and repeated models are merged. Nothing is
    /// changed unless every line is in stock.
    pub fn checkout(
        &self,
        employee: &Employee,
        request: CheckoutRequest,
        now: NaiveDateTime,
    ) -> AppResult<CheckoutResult> {
        let customer = request.customer.trim();
        if customer.is_empty() {
            return Err(AppError::validation("Customer name is required"));
        }
        ensure_single_line("Customer name", customer)?;
        ensure_single_line("Payment method", &request.payment_method)?;
        let payment_method = match request.payment_method.trim() {
            "" => "N/A",
            method => method,
        };
        let outlet = employee.outlet.as_str();

        let mut ledger = self.state.ledger.write();
        let lines = resolve_lines(&ledger, &request.lines)?;
        if lines.is_empty() {
            return Err(AppError::validation("No items to checkout"));
        }

        let mut items = Vec::with_capacity(lines.len());
        for (model, quantity) in &lines {
            let product = ledger
                .find(model)
                .ok_or_else(|| AppError::product_not_found(model))?;
            let available = product.stock(outlet);
            if available < *quantity {
                return Err(AppError::insufficient_stock(model, outlet, available, *quantity));
            }
            items.push(SaleItem {
                model: model.clone(),
                quantity: *quantity,
                unit_price: product.price,
            });
        }

        let mut staged = ledger.clone();
        for item in &items {
            staged.reduce_stock(&item.model, outlet, item.quantity)?;
        }
        self.state.save_ledger(&staged)?;
        *ledger = staged;
        drop(ledger);

        let time = truncate_to_minute(now.time());
        let receipt = SaleReceipt {
            date: now.date(),
            time,
            employee_id: employee.id.clone(),
            outlet: outlet.to_string(),
            customer: customer.to_string(),
            payment_method: payment_method.to_string(),
            items,
        };
        let text = receipt.render();
        self.state.sales.append(receipt.date, &text)?;

        let transactions: Vec<Transaction> = receipt
            .items
            .iter()
            .map(|item| Transaction {
                kind: TransactionKind::Sale,
                date: receipt.date,
                time: Some(time),
                employee_id: employee.id.clone(),
                outlet: outlet.to_string(),
                product: item.model.clone(),
                quantity: item.quantity,
                total: item.subtotal(),
                customer: Some(customer.to_string()),
            })
            .collect();
        let grand_total = receipt.grand_total();

        tracing::info!(
            employee_id = %employee.id,
            outlet = %outlet,
            items = transactions.len(),
            total = %grand_total,
            "Sale recorded"
        );

        Ok(CheckoutResult {
            transactions,
            grand_total,
            receipt: text,
        })
    }
}
