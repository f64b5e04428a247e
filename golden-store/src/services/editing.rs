//! 库存修改、销售小票修改与库存查询

use chrono::NaiveDate;
use golden_receipt::AmendField;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::Employee;
use shared::{AppError, AppResult, ErrorCode};

use super::ensure_single_line;
use crate::core::StoreState;

/// One outlet's quantity in a stock lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutletStock {
    pub code: String,
    pub name: String,
    pub quantity: u32,
}

/// Price and stock of one model across outlets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLookup {
    pub model: String,
    pub price: Decimal,
    pub outlets: Vec<OutletStock>,
}

impl StockLookup {
    pub fn total(&self) -> u64 {
        self.outlets.iter().map(|o| u64::from(o.quantity)).sum()
    }
}

#[derive(Debug, Clone)]
pub struct EditService {
    state: StoreState,
}

impl EditService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    /// Price and per-outlet stock, outlets in file order
    pub fn lookup(&self, model: &str) -> AppResult<StockLookup> {
        let outlets = self.state.outlets.read();
        let ledger = self.state.ledger.read();
        let product = ledger
            .find(model)
            .ok_or_else(|| AppError::product_not_found(model.trim()))?;

        Ok(StockLookup {
            model: product.name.clone(),
            price: product.price,
            outlets: outlets
                .values()
                .map(|o| OutletStock {
                    code: o.code.clone(),
                    name: o.name.clone(),
                    quantity: product.stock(&o.code),
                })
                .collect(),
        })
    }

    /// Overwrite one outlet's quantity and save the ledger
    pub fn set_stock(
        &self,
        actor: &Employee,
        model: &str,
        outlet: &str,
        quantity: i64,
    ) -> AppResult<u32> {
        let outlet = self.state.require_outlet(outlet)?.code;
        let quantity = u32::try_from(quantity)
            .map_err(|_| AppError::invalid_quantity("Stock cannot be negative"))?;

        let mut ledger = self.state.ledger.write();
        let product = ledger.get_mut(model)?;
        let previous = product.stock(&outlet);
        let name = product.name.clone();
        product.set_stock(outlet.as_str(), quantity);

        if let Err(e) = self.state.save_ledger(&ledger) {
            // keep memory in step with the file
            if let Ok(p) = ledger.get_mut(&name) {
                p.set_stock(outlet.as_str(), previous);
            }
            return Err(e);
        }

        tracing::info!(
            product = %name,
            outlet = %outlet,
            previous,
            quantity,
            edited_by = %actor.id,
            "Stock updated"
        );
        Ok(quantity)
    }

    /// Rewrite one field of a sale receipt in place
    pub fn amend_sale(
        &self,
        actor: &Employee,
        date: NaiveDate,
        customer: &str,
        field: AmendField,
        value: &str,
    ) -> AppResult<Vec<String>> {
        if customer.trim().is_empty() {
            return Err(AppError::validation("Customer name is required"));
        }
        ensure_single_line("Amended value", value)?;
        if field == AmendField::Quantity && value.trim().parse::<u32>().is_err() {
            return Err(AppError::invalid_quantity(format!("Invalid quantity: {}", value.trim())));
        }
        if field == AmendField::TotalPrice && shared::util::parse_money(value).is_none() {
            return Err(AppError::with_message(
                ErrorCode::InvalidPrice,
                format!("Invalid amount: {}", value.trim()),
            ));
        }

        let block = self.state.sales.amend(date, customer, field, value)?;
        tracing::info!(
            %date,
            customer = %customer.trim(),
            field = %field,
            edited_by = %actor.id,
            "Sale receipt amended"
        );
        Ok(block)
    }
}
