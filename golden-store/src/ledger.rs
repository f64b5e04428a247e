//! Outlet stock ledger
//!
//! In-memory product → per-outlet quantity map backed by `model.csv`:
//!
//! ```text
//! Model,Price,C60,C61,C62
//! Classic Gold,129.90,5,2,0
//! ```
//!
//! Columns from index 2 are outlet codes. `save` rebuilds the header from the
//! outlet list it is given, so quantities at outlets missing from that list
//! are not written.

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use shared::models::Product;
use shared::{AppError, AppResult};

use crate::storage::{csv_bytes, open_csv, write_atomic};

/// Stock ledger keyed by model name, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockLedger {
    products: IndexMap<String, Product>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `model.csv`
    ///
    /// Short rows and rows with an unparseable price are skipped; an
    /// unparseable quantity skips that cell only.
    pub fn load(path: &Path) -> Self {
        let mut ledger = Self::new();
        let Some(mut reader) = open_csv(path) else {
            return ledger;
        };

        let outlets: Vec<String> = match reader.headers() {
            Ok(h) => h.iter().skip(2).map(str::to_string).collect(),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to read model header");
                return ledger;
            }
        };

        for (idx, row) in reader.records().enumerate() {
            let line = idx + 2;
            let record = match row {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(line, error = %e, "Skipping unreadable model row");
                    continue;
                }
            };
            if record.len() < 3 {
                tracing::warn!(line, "Skipping short model row");
                continue;
            }
            let name = &record[0];
            let raw_price = &record[1];
            let Ok(price) = Decimal::from_str(raw_price) else {
                tracing::warn!(line, product = %name, price = %raw_price, "Skipping model with invalid price");
                continue;
            };

            let mut product = Product::new(name, price);
            for (outlet, cell) in outlets.iter().zip(record.iter().skip(2)) {
                match cell.parse::<u32>() {
                    Ok(qty) => product.set_stock(outlet.as_str(), qty),
                    Err(_) => {
                        tracing::warn!(line, product = %name, outlet = %outlet, value = %cell, "Skipping invalid stock cell");
                    }
                }
            }
            ledger.insert(product);
        }

        tracing::debug!(count = ledger.len(), "Stock ledger loaded");
        ledger
    }

    /// Rewrite `model.csv` with one column per outlet in `outlet_codes`
    pub fn save(&self, path: &Path, outlet_codes: &[String]) -> AppResult<()> {
        let dropped: BTreeSet<&str> = self
            .products
            .values()
            .flat_map(|p| p.stock.keys())
            .map(String::as_str)
            .filter(|code| !outlet_codes.iter().any(|c| c.as_str() == *code))
            .collect();
        if !dropped.is_empty() {
            tracing::warn!(
                outlets = ?dropped,
                "Stock at outlets missing from the outlet list is not saved"
            );
        }

        let mut header: Vec<&str> = vec!["Model", "Price"];
        header.extend(outlet_codes.iter().map(String::as_str));

        let rows = self.products.values().map(|p| {
            let mut row = vec![p.name.clone(), p.price.to_string()];
            row.extend(outlet_codes.iter().map(|code| p.stock(code).to_string()));
            row
        });

        let bytes = csv_bytes(&header, rows)?;
        write_atomic(path, &bytes)?;
        tracing::debug!(count = self.len(), "Stock ledger saved");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.name.clone(), product);
    }

    /// Exact name lookup, then a trimmed case-insensitive scan
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.key_of(name).and_then(|k| self.products.get(k))
    }

    fn key_of(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.products.get_key_value(name) {
            return Some(key.as_str());
        }
        let wanted = name.trim();
        self.products
            .keys()
            .find(|k| k.trim().eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }

    /// Mutable lookup, `ProductNotFound` when absent
    pub fn get_mut(&mut self, name: &str) -> AppResult<&mut Product> {
        let key = self
            .key_of(name)
            .map(str::to_string)
            .ok_or_else(|| AppError::product_not_found(name.trim()))?;
        self.products
            .get_mut(&key)
            .ok_or_else(|| AppError::product_not_found(name.trim()))
    }

    pub fn stock(&self, product: &str, outlet: &str) -> u32 {
        self.find(product).map(|p| p.stock(outlet)).unwrap_or(0)
    }

    /// Remove stock, failing with `InsufficientStock` instead of clamping
    pub fn reduce_stock(&mut self, product: &str, outlet: &str, quantity: u32) -> AppResult<()> {
        self.get_mut(product)?.reduce_stock(outlet, quantity)
    }

    pub fn add_stock(&mut self, product: &str, outlet: &str, quantity: u32) -> AppResult<()> {
        self.get_mut(product)?.add_stock(outlet, quantity);
        Ok(())
    }

    pub fn set_stock(&mut self, product: &str, outlet: &str, quantity: u32) -> AppResult<()> {
        self.get_mut(product)?.set_stock(outlet, quantity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use tempfile::TempDir;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn sample() -> StockLedger {
        let mut ledger = StockLedger::new();
        let mut gold = Product::new("Classic Gold", Decimal::new(12990, 2));
        gold.set_stock("C60", 5);
        gold.set_stock("C61", 2);
        let mut luna = Product::new("Luna", Decimal::new(8900, 2));
        luna.set_stock("C60", 0);
        luna.set_stock("C61", 7);
        ledger.insert(gold);
        ledger.insert(luna);
        ledger
    }

    #[test]
    fn test_round_trip_same_outlets() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("model.csv");
        let ledger = sample();
        ledger.save(&path, &codes(&["C60", "C61"])).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Model,Price,C60,C61\n"));

        assert_eq!(StockLedger::load(&path), ledger);
    }

    #[test]
    fn test_save_drops_unlisted_outlet() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("model.csv");
        sample().save(&path, &codes(&["C60"])).unwrap();

        let loaded = StockLedger::load(&path);
        assert_eq!(loaded.stock("Classic Gold", "C60"), 5);
        assert_eq!(loaded.stock("Classic Gold", "C61"), 0);
        assert!(loaded.find("Classic Gold").unwrap().stock.get("C61").is_none());
    }

    #[test]
    fn test_load_skips_bad_rows_and_cells() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("model.csv");
        std::fs::write(
            &path,
            "Model,Price,C60,C61\n\
             Classic Gold,129.90,5,x\n\
             Broken,abc,1,1\n\
             Short,1\n\
             Luna,89,3,4,99\n",
        )
        .unwrap();

        let ledger = StockLedger::load(&path);
        assert_eq!(ledger.len(), 2);
        let gold = ledger.find("Classic Gold").unwrap();
        assert_eq!(gold.stock("C60"), 5);
        assert!(gold.stock.get("C61").is_none());
        // extra cell beyond the header is ignored
        assert_eq!(ledger.find("Luna").unwrap().stock.len(), 2);
    }

    #[test]
    fn test_reduce_never_goes_negative() {
        let mut ledger = sample();
        ledger.reduce_stock("Classic Gold", "C60", 3).unwrap();
        ledger.add_stock("Classic Gold", "C60", 1).unwrap();
        let err = ledger.reduce_stock("Classic Gold", "C60", 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(ledger.stock("Classic Gold", "C60"), 3);

        ledger.reduce_stock("Classic Gold", "C60", 3).unwrap();
        assert_eq!(ledger.stock("Classic Gold", "C60"), 0);
        assert!(ledger.reduce_stock("Classic Gold", "C60", 1).is_err());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut ledger = sample();
        assert!(ledger.find("classic gold").is_some());
        ledger.set_stock(" LUNA ", "C62", 4).unwrap();
        assert_eq!(ledger.stock("Luna", "C62"), 4);
        let err = ledger.add_stock("Nova", "C60", 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }
}
