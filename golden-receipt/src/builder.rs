//! Receipt text builder
//!
//! Provides a fluent API for building the human-readable receipt bodies
//! appended to the daily journal files, plus renderers for sale and stock
//! movement receipts.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use shared::models::TransactionKind;
use shared::util::{format_clock, format_date, format_money};

/// Width of the separator written after each receipt entry
pub const SEPARATOR_WIDTH: usize = 50;

/// Dashed lines longer than this close a receipt entry
pub const SEPARATOR_THRESHOLD: usize = 40;

/// Whether a line is a long dashed entry separator
pub fn is_entry_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > SEPARATOR_THRESHOLD && trimmed.chars().all(|c| c == '-')
}

/// Whether a line is a `=== Title ===` banner
pub fn is_banner(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 6 && trimmed.starts_with("===") && trimmed.ends_with("===")
}

/// Receipt text builder
#[derive(Debug, Default)]
pub struct ReceiptBuilder {
    buf: String,
}

impl ReceiptBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(512),
        }
    }

    // === Text Output ===

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// `=== Title ===`
    pub fn banner(&mut self, title: &str) -> &mut Self {
        self.line(&format!("=== {} ===", title))
    }

    /// `Label: value`
    pub fn field(&mut self, label: &str, value: impl std::fmt::Display) -> &mut Self {
        self.line(&format!("{}: {}", label, value))
    }

    /// `Label: RM12.50`
    pub fn money(&mut self, label: &str, amount: Decimal) -> &mut Self {
        self.line(&format!("{}: RM{}", label, format_money(amount)))
    }

    // === Separators ===

    /// Long dashed separator closing one entry
    pub fn sep_entry(&mut self) -> &mut Self {
        self.line(&"-".repeat(SEPARATOR_WIDTH))
    }

    /// Finish, dropping the trailing newline
    pub fn build(&self) -> String {
        self.buf.trim_end_matches('\n').to_string()
    }
}

/// One sold line
#[derive(Debug, Clone, PartialEq)]
pub struct SaleItem {
    pub model: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl SaleItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Sale receipt content
#[derive(Debug, Clone)]
pub struct SaleReceipt {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub employee_id: String,
    pub outlet: String,
    pub customer: String,
    pub payment_method: String,
    pub items: Vec<SaleItem>,
}

impl SaleReceipt {
    pub fn grand_total(&self) -> Decimal {
        self.items.iter().map(SaleItem::subtotal).sum()
    }

    /// Render the receipt body
    ///
    /// Header fields come once; each item carries its own Model / Quantity /
    /// Subtotal and items are separated by an entry separator. The journal
    /// appends the closing separator.
    pub fn render(&self) -> String {
        let mut b = ReceiptBuilder::new();
        b.banner(TransactionKind::Sale.banner())
            .field("Date", format_date(self.date))
            .field("Time", format_clock(self.time))
            .field("Employee", &self.employee_id)
            .field("Outlet", &self.outlet)
            .field("Customer Name", &self.customer)
            .field("Payment Method", &self.payment_method)
            .line("Item(s) Purchased:");

        for (idx, item) in self.items.iter().enumerate() {
            if idx > 0 {
                b.sep_entry();
            }
            b.field("Model", &item.model)
                .field("Quantity", item.quantity)
                .money("Unit Price", item.unit_price)
                .money("Subtotal", item.subtotal());
        }

        b.money("Grand Total", self.grand_total())
            .line("Transaction successful.");
        b.build()
    }
}

/// Stock movement receipt content
#[derive(Debug, Clone)]
pub struct StockReceipt {
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub employee_id: String,
    pub employee_name: String,
    /// e.g. `HQ (Service Center)` or `C60 (Kuala Lumpur City Centre)`
    pub from_label: String,
    pub to_label: String,
    /// Outlet whose stock the entry is booked against
    pub outlet: String,
    pub items: Vec<(String, u32)>,
}

impl StockReceipt {
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|(_, q)| u64::from(*q)).sum()
    }

    pub fn render(&self) -> String {
        let mut b = ReceiptBuilder::new();
        b.banner(self.kind.banner())
            .field("Date", format_date(self.date))
            .field("Time", format_clock(self.time))
            .field("Employee", &self.employee_id)
            .field("From", &self.from_label)
            .field("To", &self.to_label)
            .field("Outlet", &self.outlet)
            .line("Models Received:");

        for (idx, (model, qty)) in self.items.iter().enumerate() {
            if idx > 0 {
                b.sep_entry();
            }
            b.field("Model", model).field("Quantity", qty);
        }

        b.field("Total Quantity", self.total_quantity())
            .field("Name of Employee in Charge", &self.employee_name)
            .line(&format!("{} recorded.", self.kind.banner()));
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn time() -> NaiveTime {
        NaiveTime::from_hms_opt(15, 42, 0).unwrap()
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_entry_separator(&"-".repeat(41)));
        assert!(is_entry_separator(&"-".repeat(SEPARATOR_WIDTH)));
        assert!(!is_entry_separator(&"-".repeat(40)));
        assert!(!is_entry_separator("-----------------------------"));
        assert!(!is_entry_separator(&format!("{}x", "-".repeat(45))));
    }

    #[test]
    fn test_banner_detection() {
        assert!(is_banner("=== Stock In ==="));
        assert!(!is_banner("Date: 2025-03-14"));
        assert!(!is_banner("==="));
    }

    #[test]
    fn test_sale_render_layout() {
        let receipt = SaleReceipt {
            date: date(),
            time: time(),
            employee_id: "C6001".into(),
            outlet: "C60".into(),
            customer: "Aisyah".into(),
            payment_method: "Cash".into(),
            items: vec![
                SaleItem {
                    model: "Classic Gold".into(),
                    quantity: 2,
                    unit_price: Decimal::new(12990, 2),
                },
                SaleItem {
                    model: "Luna".into(),
                    quantity: 1,
                    unit_price: Decimal::new(8900, 2),
                },
            ],
        };
        let text = receipt.render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=== Record New Sale ===");
        assert_eq!(lines[1], "Date: 2025-03-14");
        assert_eq!(lines[2], "Time: 03:42 PM");
        assert!(text.contains("Subtotal: RM259.80"));
        assert!(text.contains("Subtotal: RM89.00"));
        assert!(text.contains("Grand Total: RM348.80"));
        assert_eq!(lines.iter().filter(|l| is_entry_separator(l)).count(), 1);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_stock_render_layout() {
        let receipt = StockReceipt {
            kind: TransactionKind::StockIn,
            date: date(),
            time: time(),
            employee_id: "C6002".into(),
            employee_name: "Farid".into(),
            from_label: "HQ (Service Center)".into(),
            to_label: "C61 (Mid Valley)".into(),
            outlet: "C61".into(),
            items: vec![("Luna".into(), 3), ("Classic Gold".into(), 2)],
        };
        let text = receipt.render();
        assert!(text.starts_with("=== Stock In ==="));
        assert!(text.contains("Total Quantity: 5"));
        assert!(text.ends_with("Stock In recorded."));
    }
}
