//! Transaction Model (从小票文件重建的交易记录)

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Sale,
    StockIn,
    StockOut,
}

impl TransactionKind {
    /// Banner text written between `===` markers on receipts
    pub fn banner(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "Record New Sale",
            TransactionKind::StockIn => "Stock In",
            TransactionKind::StockOut => "Stock Out",
        }
    }

    /// Recognise a receipt banner (`=== Stock In ===`)
    pub fn from_banner(line: &str) -> Option<Self> {
        let inner = line.trim().trim_matches('=').trim();
        if inner.eq_ignore_ascii_case("Stock In") {
            Some(TransactionKind::StockIn)
        } else if inner.eq_ignore_ascii_case("Stock Out") {
            Some(TransactionKind::StockOut)
        } else if inner.eq_ignore_ascii_case("Record New Sale") {
            Some(TransactionKind::Sale)
        } else {
            None
        }
    }

    pub fn is_sale(&self) -> bool {
        matches!(self, TransactionKind::Sale)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.banner())
    }
}

/// Transaction record
///
/// Derived each time from receipt files; carries no persisted identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub employee_id: String,
    pub outlet: String,
    pub product: String,
    pub quantity: u32,
    /// Line total (RM), zero for stock movements
    pub total: Decimal,
    /// Customer name (sale only)
    pub customer: Option<String>,
}

impl Transaction {
    pub fn is_sale(&self) -> bool {
        self.kind.is_sale()
    }

    /// Customer name for display and sorting (`N/A` when absent)
    pub fn customer_name(&self) -> &str {
        self.customer.as_deref().unwrap_or("N/A")
    }
}
