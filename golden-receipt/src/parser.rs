//! Receipt text parser
//!
//! Rebuilds [`Transaction`] records from journal text by scanning for
//! `Label: value` lines. A long dashed separator closes one item; a `===`
//! banner starts a new receipt.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use shared::models::{Transaction, TransactionKind};
use shared::util::{parse_clock, parse_date, parse_money};

use crate::builder::{is_banner, is_entry_separator};

/// Labels the parser buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Date,
    Time,
    Employee,
    Outlet,
    Customer,
    Model,
    Quantity,
    Subtotal,
}

impl Label {
    fn from_key(key: &str) -> Option<Self> {
        const TABLE: [(&str, Label); 8] = [
            ("Date", Label::Date),
            ("Time", Label::Time),
            ("Employee", Label::Employee),
            ("Outlet", Label::Outlet),
            ("Customer Name", Label::Customer),
            ("Model", Label::Model),
            ("Quantity", Label::Quantity),
            ("Subtotal", Label::Subtotal),
        ];
        let key = key.trim();
        TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, label)| *label)
    }
}

/// Split `Key: value` on the first colon
pub(crate) fn split_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Buffered fields of the receipt being scanned
#[derive(Debug, Default)]
struct Pending {
    // header, kept across items
    date: Option<String>,
    time: Option<String>,
    employee: Option<String>,
    outlet: Option<String>,
    customer: Option<String>,
    // per item
    model: Option<String>,
    quantity: Option<String>,
    subtotal: Option<String>,
}

impl Pending {
    fn set(&mut self, label: Label, value: &str) {
        let slot = match label {
            Label::Date => &mut self.date,
            Label::Time => &mut self.time,
            Label::Employee => &mut self.employee,
            Label::Outlet => &mut self.outlet,
            Label::Customer => &mut self.customer,
            Label::Model => &mut self.model,
            Label::Quantity => &mut self.quantity,
            Label::Subtotal => &mut self.subtotal,
        };
        *slot = Some(value.to_string());
    }

    fn clear_item(&mut self) {
        self.model = None;
        self.quantity = None;
        self.subtotal = None;
    }

    fn has_item(&self) -> bool {
        self.model.is_some() || self.quantity.is_some() || self.subtotal.is_some()
    }

    /// Build a transaction, or None when a required field is missing or bad
    fn build(&self, kind: TransactionKind) -> Option<Transaction> {
        let date: NaiveDate = parse_date(self.date.as_deref()?)?;
        let product = self.model.as_deref()?.trim();
        if product.is_empty() {
            return None;
        }
        let quantity: u32 = self.quantity.as_deref()?.trim().parse().ok()?;

        let total = if kind.is_sale() {
            parse_money(self.subtotal.as_deref()?)?
        } else {
            match self.subtotal.as_deref() {
                Some(raw) => parse_money(raw)?,
                None => Decimal::ZERO,
            }
        };

        let time: Option<NaiveTime> = match self.time.as_deref() {
            Some(raw) => Some(parse_clock(raw)?),
            None => None,
        };

        Some(Transaction {
            kind,
            date,
            time,
            employee_id: self.employee.clone().unwrap_or_default(),
            outlet: self.outlet.clone().unwrap_or_default(),
            product: product.to_string(),
            quantity,
            total,
            customer: if kind.is_sale() {
                self.customer.clone()
            } else {
                None
            },
        })
    }
}

/// Parse one journal file's text
///
/// `default_kind` applies until a recognised banner says otherwise. Records
/// missing a date, model or quantity (or a subtotal, for sales) are skipped.
pub fn parse_transactions(default_kind: TransactionKind, text: &str) -> Vec<Transaction> {
    let mut out = Vec::new();
    let mut pending = Pending::default();
    let mut kind = default_kind;

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if is_banner(line) {
            pending = Pending::default();
            kind = TransactionKind::from_banner(line).unwrap_or(default_kind);
            continue;
        }

        if is_entry_separator(line) {
            if pending.has_item() {
                match pending.build(kind) {
                    Some(tx) => out.push(tx),
                    None => tracing::debug!(line = line_no + 1, "Skipping incomplete receipt record"),
                }
            }
            pending.clear_item();
            continue;
        }

        if let Some((key, value)) = split_field(line)
            && let Some(label) = Label::from_key(key)
        {
            pending.set(label, value);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep() -> String {
        "-".repeat(50)
    }

    #[test]
    fn test_single_block_yields_one_transaction() {
        let text = format!(
            "Date: 2025-03-14\nModel: Classic Gold\nQuantity: 2\nSubtotal: RM259.80\n{}\n",
            "-".repeat(41)
        );
        let txs = parse_transactions(TransactionKind::Sale, &text);
        assert_eq!(txs.len(), 1);
        let tx = &txs[0];
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(tx.product, "Classic Gold");
        assert_eq!(tx.quantity, 2);
        assert_eq!(tx.total, Decimal::new(25980, 2));
        assert_eq!(tx.time, None);
    }

    #[test]
    fn test_header_fields_carry_across_items() {
        let text = format!(
            "=== Record New Sale ===\nDate: 2025-03-14\nTime: 03:42 PM\nEmployee: C6001\n\
             Outlet: C60\nCustomer Name: Aisyah\nPayment Method: Cash\nItem(s) Purchased:\n\
             Model: Classic Gold\nQuantity: 2\nUnit Price: RM129.90\nSubtotal: RM259.80\n{sep}\n\
             Model: Luna\nQuantity: 1\nUnit Price: RM89.00\nSubtotal: RM89.00\n\
             Grand Total: RM348.80\nTransaction successful.\n{sep}\n",
            sep = sep()
        );
        let txs = parse_transactions(TransactionKind::Sale, &text);
        assert_eq!(txs.len(), 2);
        for tx in &txs {
            assert_eq!(tx.employee_id, "C6001");
            assert_eq!(tx.outlet, "C60");
            assert_eq!(tx.customer.as_deref(), Some("Aisyah"));
            assert_eq!(tx.time, NaiveTime::from_hms_opt(15, 42, 0));
        }
        assert_eq!(txs[1].product, "Luna");
        assert_eq!(txs[1].total, Decimal::new(8900, 2));
    }

    #[test]
    fn test_banner_resets_header() {
        let text = format!(
            "=== Record New Sale ===\nDate: 2025-03-14\nCustomer Name: A\n\
             Model: X\nQuantity: 1\nSubtotal: 10\n{sep}\n\
             === Record New Sale ===\nModel: Y\nQuantity: 1\nSubtotal: 5\n{sep}\n",
            sep = sep()
        );
        // second receipt lost its date when the banner reset the buffer
        let txs = parse_transactions(TransactionKind::Sale, &text);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].product, "X");
    }

    #[test]
    fn test_stock_banner_sets_kind() {
        let text = format!(
            "=== Stock In ===\nDate: 2025-03-14\nTime: 09:05 AM\nEmployee: C6002\n\
             From: HQ (Service Center)\nTo: C61 (Mid Valley)\nOutlet: C61\nModels Received:\n\
             Model: Luna\nQuantity: 3\nTotal Quantity: 3\n{sep}\n\
             === Stock Out ===\nDate: 2025-03-14\nOutlet: C60\nModel: Luna\nQuantity: 1\n{sep}\n",
            sep = sep()
        );
        let txs = parse_transactions(TransactionKind::StockIn, &text);
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].kind, TransactionKind::StockIn);
        assert_eq!(txs[0].outlet, "C61");
        assert_eq!(txs[0].total, Decimal::ZERO);
        assert_eq!(txs[0].customer, None);
        assert_eq!(txs[1].kind, TransactionKind::StockOut);
        assert_eq!(txs[1].outlet, "C60");
    }

    #[test]
    fn test_bad_values_skip_record_only() {
        let text = format!(
            "Date: 2025-03-14\nModel: X\nQuantity: two\nSubtotal: RM1.00\n{sep}\n\
             Model: Y\nQuantity: 3\nSubtotal: RM3.00\n{sep}\n\
             Model: Z\nQuantity: 1\n{sep}\n",
            sep = sep()
        );
        let txs = parse_transactions(TransactionKind::Sale, &text);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].product, "Y");
    }

    #[test]
    fn test_short_separator_does_not_emit() {
        let text = "Date: 2025-03-14\nModel: X\nQuantity: 1\nSubtotal: 1\n-----------------------------\n";
        assert!(parse_transactions(TransactionKind::Sale, text).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_transactions(TransactionKind::Sale, "").is_empty());
    }
}
