//! Per-day receipt journal files
//!
//! Each category owns a directory under the data root with one append-only
//! text file per calendar day:
//!
//! | Category | Directory | File |
//! |----------|-----------|------|
//! | Sales | `SalesReceipt/` | `sales_<YYYY-MM-DD>.txt` |
//! | Stock | `StockReceipt/` | `receipts_<YYYY-MM-DD>.txt` |

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{Transaction, TransactionKind};
use shared::util::format_date;

use crate::builder::{SEPARATOR_WIDTH, is_banner};
use crate::error::{ReceiptError, ReceiptResult};
use crate::parser::{parse_transactions, split_field};

/// Receipt category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptCategory {
    Sales,
    Stock,
}

impl ReceiptCategory {
    pub fn dir_name(&self) -> &'static str {
        match self {
            ReceiptCategory::Sales => "SalesReceipt",
            ReceiptCategory::Stock => "StockReceipt",
        }
    }

    pub fn file_prefix(&self) -> &'static str {
        match self {
            ReceiptCategory::Sales => "sales_",
            ReceiptCategory::Stock => "receipts_",
        }
    }

    /// Kind assumed before any banner is seen
    pub fn default_kind(&self) -> TransactionKind {
        match self {
            ReceiptCategory::Sales => TransactionKind::Sale,
            ReceiptCategory::Stock => TransactionKind::StockIn,
        }
    }
}

/// Sale receipt field that can be amended in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmendField {
    CustomerName,
    Model,
    Quantity,
    TotalPrice,
    PaymentMethod,
}

impl AmendField {
    /// Label of the receipt line this field rewrites
    pub fn line_label(&self) -> &'static str {
        match self {
            AmendField::CustomerName => "Customer Name",
            AmendField::Model => "Model",
            AmendField::Quantity => "Quantity",
            AmendField::TotalPrice => "Subtotal",
            AmendField::PaymentMethod => "Payment Method",
        }
    }

    fn render(&self, value: &str) -> String {
        match self {
            AmendField::TotalPrice => {
                let amount = value.trim().trim_start_matches("RM").trim();
                format!("Subtotal: RM{}", amount)
            }
            other => format!("{}: {}", other.line_label(), value.trim()),
        }
    }
}

impl fmt::Display for AmendField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AmendField::TotalPrice => "Total Price",
            other => other.line_label(),
        };
        f.write_str(name)
    }
}

impl FromStr for AmendField {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "customername" | "customer" => Ok(AmendField::CustomerName),
            "model" => Ok(AmendField::Model),
            "quantity" | "qty" => Ok(AmendField::Quantity),
            "totalprice" | "subtotal" | "total" => Ok(AmendField::TotalPrice),
            "paymentmethod" | "transactionmethod" | "payment" => Ok(AmendField::PaymentMethod),
            _ => Err(ReceiptError::InvalidField(format!("Unknown field: {}", s.trim()))),
        }
    }
}

/// One search match: a whole receipt block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// File name the block was found in
    pub file: String,
    pub lines: Vec<String>,
}

impl SearchHit {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Line range `[start, end)` of one receipt block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockRange {
    start: usize,
    end: usize,
}

/// Split lines into blocks, each starting at a `===` banner
///
/// Lines before the first banner form their own block.
fn block_ranges(lines: &[String]) -> Vec<BlockRange> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (idx, line) in lines.iter().enumerate() {
        if is_banner(line) && idx > start {
            ranges.push(BlockRange { start, end: idx });
            start = idx;
        }
    }
    if start < lines.len() {
        ranges.push(BlockRange {
            start,
            end: lines.len(),
        });
    }
    ranges
}

/// Locate the sale block whose `Customer Name:` line contains `customer`
fn find_customer_block(lines: &[String], customer: &str) -> Option<BlockRange> {
    let needle = customer.trim();
    block_ranges(lines).into_iter().find(|range| {
        lines[range.start..range.end].iter().any(|line| {
            matches!(split_field(line), Some((key, value))
                if key.eq_ignore_ascii_case("Customer Name") && value.contains(needle))
        })
    })
}

/// Replace a day file through `<file>.tmp` and a rename
fn replace_day_file(path: &Path, content: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}

/// Receipt journal for one category
#[derive(Debug, Clone)]
pub struct ReceiptJournal {
    root: PathBuf,
    category: ReceiptCategory,
}

impl ReceiptJournal {
    /// `root` is the data directory holding the category directories
    pub fn new(root: impl Into<PathBuf>, category: ReceiptCategory) -> Self {
        Self {
            root: root.into(),
            category,
        }
    }

    pub fn sales(root: impl Into<PathBuf>) -> Self {
        Self::new(root, ReceiptCategory::Sales)
    }

    pub fn stock(root: impl Into<PathBuf>) -> Self {
        Self::new(root, ReceiptCategory::Stock)
    }

    pub fn category(&self) -> ReceiptCategory {
        self.category
    }

    pub fn dir(&self) -> PathBuf {
        self.root.join(self.category.dir_name())
    }

    /// Path of the file for `date` (may not exist)
    pub fn day_file(&self, date: NaiveDate) -> PathBuf {
        self.dir().join(format!(
            "{}{}.txt",
            self.category.file_prefix(),
            format_date(date)
        ))
    }

    /// Append a receipt body followed by the closing separator
    pub fn append(&self, date: NaiveDate, body: &str) -> ReceiptResult<PathBuf> {
        fs::create_dir_all(self.dir())?;
        let path = self.day_file(date);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", body.trim_end_matches('\n'))?;
        writeln!(file, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        tracing::debug!(path = %path.display(), "Receipt appended");
        Ok(path)
    }

    /// All `.txt` journal files of this category, sorted by name
    ///
    /// A missing directory yields an empty list.
    pub fn files(&self) -> ReceiptResult<Vec<PathBuf>> {
        let dir = self.dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let prefix = self.category.file_prefix();
        let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().is_some_and(|ext| ext == "txt")
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(prefix))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Transactions recorded on one day
    pub fn load_day(&self, date: NaiveDate) -> ReceiptResult<Vec<Transaction>> {
        let path = self.day_file(date);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path)?;
        Ok(parse_transactions(self.category.default_kind(), &text))
    }

    /// Parse every journal file
    ///
    /// Unreadable files are skipped with a warning.
    pub fn load_all(&self) -> Vec<Transaction> {
        let files = match self.files() {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(dir = %self.dir().display(), error = %e, "Failed to list receipt files");
                return Vec::new();
            }
        };

        let mut out = Vec::new();
        for path in files {
            match fs::read_to_string(&path) {
                Ok(text) => out.extend(parse_transactions(self.category.default_kind(), &text)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable receipt file");
                }
            }
        }
        out
    }

    /// Case-insensitive keyword search returning whole receipt blocks
    pub fn search(&self, keyword: &str) -> ReceiptResult<Vec<SearchHit>> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ReceiptError::InvalidField(
                "Search keyword is required".to_string(),
            ));
        }

        let mut hits = Vec::new();
        for path in self.files()? {
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable receipt file");
                    continue;
                }
            };
            let lines: Vec<String> = text.lines().map(str::to_string).collect();
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            for range in block_ranges(&lines) {
                let block = &lines[range.start..range.end];
                if block.iter().any(|l| l.to_lowercase().contains(&needle)) {
                    hits.push(SearchHit {
                        file: file.clone(),
                        lines: block.to_vec(),
                    });
                }
            }
        }
        Ok(hits)
    }

    fn read_day_lines(&self, date: NaiveDate) -> ReceiptResult<(PathBuf, Vec<String>)> {
        let path = self.day_file(date);
        if !path.exists() {
            return Err(ReceiptError::NoRecords(format_date(date)));
        }
        let text = fs::read_to_string(&path)?;
        Ok((path, text.lines().map(str::to_string).collect()))
    }

    /// The receipt block for `customer` on `date`
    pub fn find_block(&self, date: NaiveDate, customer: &str) -> ReceiptResult<Vec<String>> {
        let (_, lines) = self.read_day_lines(date)?;
        let range = find_customer_block(&lines, customer)
            .ok_or_else(|| ReceiptError::RecordNotFound(customer.trim().to_string()))?;
        Ok(lines[range.start..range.end].to_vec())
    }

    /// Rewrite one field of the first matching receipt in place
    ///
    /// Only the first line carrying the field's label is replaced. Returns the
    /// updated block.
    pub fn amend(
        &self,
        date: NaiveDate,
        customer: &str,
        field: AmendField,
        value: &str,
    ) -> ReceiptResult<Vec<String>> {
        if value.trim().is_empty() {
            return Err(ReceiptError::InvalidField(format!(
                "New value for {} is required",
                field
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(ReceiptError::InvalidField(format!(
                "New value for {} must be a single line",
                field
            )));
        }

        let (path, mut lines) = self.read_day_lines(date)?;
        let range = find_customer_block(&lines, customer)
            .ok_or_else(|| ReceiptError::RecordNotFound(customer.trim().to_string()))?;

        let target = (range.start..range.end).find(|&idx| {
            matches!(split_field(&lines[idx]), Some((key, _))
                if key.eq_ignore_ascii_case(field.line_label()))
        });
        let Some(idx) = target else {
            return Err(ReceiptError::InvalidField(format!(
                "Receipt has no {} line",
                field
            )));
        };
        lines[idx] = field.render(value);

        let mut content = lines.join("\n");
        content.push('\n');
        replace_day_file(&path, &content)?;
        tracing::info!(path = %path.display(), field = %field, "Receipt amended");

        Ok(lines[range.start..range.end].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{SaleItem, SaleReceipt};
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn sale(customer: &str, model: &str, qty: u32) -> String {
        SaleReceipt {
            date: date(),
            time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            employee_id: "C6001".into(),
            outlet: "C60".into(),
            customer: customer.into(),
            payment_method: "Cash".into(),
            items: vec![SaleItem {
                model: model.into(),
                quantity: qty,
                unit_price: Decimal::new(5000, 2),
            }],
        }
        .render()
    }

    #[test]
    fn test_append_and_load() {
        let tmp = TempDir::new().unwrap();
        let journal = ReceiptJournal::sales(tmp.path());
        journal.append(date(), &sale("Aisyah", "Luna", 2)).unwrap();
        journal.append(date(), &sale("Ben", "Classic Gold", 1)).unwrap();

        let path = journal.day_file(date());
        assert!(path.ends_with("SalesReceipt/sales_2025-03-14.txt"));

        let txs = journal.load_all();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].customer.as_deref(), Some("Aisyah"));
        assert_eq!(txs[0].total, Decimal::new(10000, 2));
        assert_eq!(txs[1].product, "Classic Gold");
        assert_eq!(journal.load_day(date()).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let journal = ReceiptJournal::stock(tmp.path());
        assert!(journal.files().unwrap().is_empty());
        assert!(journal.load_all().is_empty());
    }

    #[test]
    fn test_search_case_insensitive_blocks() {
        let tmp = TempDir::new().unwrap();
        let journal = ReceiptJournal::sales(tmp.path());
        journal.append(date(), &sale("Aisyah", "Luna", 2)).unwrap();
        journal.append(date(), &sale("Ben", "Classic Gold", 1)).unwrap();

        let hits = journal.search("classic").unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].lines[0].starts_with("=== Record New Sale"));
        assert!(hits[0].text().contains("Customer Name: Ben"));
        assert_eq!(hits[0].file, "sales_2025-03-14.txt");

        assert!(journal.search("nobody").unwrap().is_empty());
        assert!(journal.search("  ").is_err());
    }

    #[test]
    fn test_amend_rewrites_one_field() {
        let tmp = TempDir::new().unwrap();
        let journal = ReceiptJournal::sales(tmp.path());
        journal.append(date(), &sale("Aisyah", "Luna", 2)).unwrap();
        journal.append(date(), &sale("Ben", "Luna", 1)).unwrap();

        let block = journal
            .amend(date(), "Ben", AmendField::TotalPrice, "RM45.00")
            .unwrap();
        assert!(block.iter().any(|l| l == "Subtotal: RM45.00"));

        let txs = journal.load_all();
        assert_eq!(txs[0].total, Decimal::new(10000, 2));
        assert_eq!(txs[1].total, Decimal::new(4500, 2));

        journal
            .amend(date(), "Aisyah", AmendField::CustomerName, "Aisyah Rahman")
            .unwrap();
        let block = journal.find_block(date(), "Aisyah Rahman").unwrap();
        assert!(block.iter().any(|l| l == "Customer Name: Aisyah Rahman"));
        assert_eq!(journal.files().unwrap().len(), 1);
        assert!(!tmp.path().join("SalesReceipt/sales_2025-03-14.txt.tmp").exists());
    }

    #[test]
    fn test_amend_errors() {
        let tmp = TempDir::new().unwrap();
        let journal = ReceiptJournal::sales(tmp.path());
        assert!(matches!(
            journal.find_block(date(), "Ben"),
            Err(ReceiptError::NoRecords(_))
        ));

        journal.append(date(), &sale("Aisyah", "Luna", 2)).unwrap();
        assert!(matches!(
            journal.amend(date(), "Ben", AmendField::Model, "X"),
            Err(ReceiptError::RecordNotFound(_))
        ));
        assert!(matches!(
            journal.amend(date(), "Aisyah", AmendField::Model, " "),
            Err(ReceiptError::InvalidField(_))
        ));
        assert!(matches!(
            journal.amend(date(), "Aisyah", AmendField::Model, "Luna\nQuantity: 9"),
            Err(ReceiptError::InvalidField(_))
        ));
        assert_eq!(journal.load_all()[0].quantity, 2);
    }

    #[test]
    fn test_amend_field_parse() {
        assert_eq!("Total Price".parse::<AmendField>().unwrap(), AmendField::TotalPrice);
        assert_eq!("customer-name".parse::<AmendField>().unwrap(), AmendField::CustomerName);
        assert_eq!("Transaction Method".parse::<AmendField>().unwrap(), AmendField::PaymentMethod);
        assert!("Colour".parse::<AmendField>().is_err());
        assert_eq!(AmendField::TotalPrice.to_string(), "Total Price");
    }
}
