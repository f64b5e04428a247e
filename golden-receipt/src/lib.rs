//! # golden-receipt
//!
//! Receipt journal library - the text side of the store's transaction log.
//!
//! ## Scope
//!
//! This crate handles receipt TEXT:
//! - Rendering sale and stock movement receipts
//! - Per-day append-only journal files (`SalesReceipt/`, `StockReceipt/`)
//! - Rebuilding transactions from journal text
//! - Keyword search and in-place amendment
//!
//! Business rules (stock checks, permissions) stay in `golden-store`.
//!
//! ## Example
//!
//! ```ignore
//! use golden_receipt::{ReceiptJournal, SaleItem, SaleReceipt};
//!
//! let receipt = SaleReceipt { /* ... */ };
//! let journal = ReceiptJournal::sales("./data");
//! journal.append(receipt.date, &receipt.render())?;
//!
//! let sales = journal.load_all();
//! ```

mod builder;
mod error;
mod journal;
mod parser;

// Re-exports
pub use builder::{
    ReceiptBuilder, SEPARATOR_THRESHOLD, SEPARATOR_WIDTH, SaleItem, SaleReceipt, StockReceipt,
    is_banner, is_entry_separator,
};
pub use error::{ReceiptError, ReceiptResult};
pub use journal::{AmendField, ReceiptCategory, ReceiptJournal, SearchHit};
pub use parser::parse_transactions;
