//! Product Model (型号 + 各门店库存)

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Product entity
///
/// `name` is the unique key. `stock` maps outlet code → quantity and keeps the
/// column order in which outlets were first seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Unit price (RM)
    pub price: Decimal,
    #[serde(default)]
    pub stock: IndexMap<String, u32>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            stock: IndexMap::new(),
        }
    }

    /// Stock at one outlet, 0 when the outlet has never been recorded
    pub fn stock(&self, outlet: &str) -> u32 {
        self.stock.get(outlet).copied().unwrap_or(0)
    }

    /// Overwrite the quantity at an outlet
    pub fn set_stock(&mut self, outlet: impl Into<String>, quantity: u32) {
        self.stock.insert(outlet.into(), quantity);
    }

    /// Add to the quantity at an outlet (saturating)
    pub fn add_stock(&mut self, outlet: &str, quantity: u32) {
        let next = self.stock(outlet).saturating_add(quantity);
        self.stock.insert(outlet.to_string(), next);
    }

    /// Remove quantity from an outlet
    ///
    /// Fails with `InsufficientStock` and leaves the quantity untouched when
    /// the outlet holds less than `quantity`.
    pub fn reduce_stock(&mut self, outlet: &str, quantity: u32) -> AppResult<()> {
        let current = self.stock(outlet);
        let Some(next) = current.checked_sub(quantity) else {
            return Err(AppError::insufficient_stock(
                &self.name, outlet, current, quantity,
            ));
        };
        self.stock.insert(outlet.to_string(), next);
        Ok(())
    }

    /// Sum over every outlet
    pub fn total_stock(&self) -> u64 {
        self.stock.values().map(|q| u64::from(*q)).sum()
    }
}

/// Single line of a checkout or transfer request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLine {
    pub model: String,
    pub quantity: i64,
}

impl ItemLine {
    pub fn new(model: impl Into<String>, quantity: i64) -> Self {
        Self {
            model: model.into(),
            quantity,
        }
    }

    /// Blank model names and non-positive quantities are skipped by callers
    pub fn is_blank(&self) -> bool {
        self.model.trim().is_empty() || self.quantity <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn product() -> Product {
        let mut p = Product::new("Classic Gold", Decimal::new(129_90, 2));
        p.set_stock("C60", 5);
        p.set_stock("C61", 1);
        p
    }

    #[test]
    fn test_unknown_outlet_is_zero() {
        assert_eq!(product().stock("C99"), 0);
    }

    #[test]
    fn test_reduce_within_stock() {
        let mut p = product();
        p.reduce_stock("C60", 5).unwrap();
        assert_eq!(p.stock("C60"), 0);
    }

    #[test]
    fn test_reduce_beyond_stock_fails_without_clamping() {
        let mut p = product();
        let err = p.reduce_stock("C61", 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(p.stock("C61"), 1);

        let err = p.reduce_stock("C99", 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(!p.stock.contains_key("C99"));
    }

    #[test]
    fn test_add_and_total() {
        let mut p = product();
        p.add_stock("C62", 4);
        p.add_stock("C60", 1);
        assert_eq!(p.stock("C62"), 4);
        assert_eq!(p.stock("C60"), 6);
        assert_eq!(p.total_stock(), 11);
    }

    #[test]
    fn test_add_saturates() {
        let mut p = product();
        p.set_stock("C60", u32::MAX - 1);
        p.add_stock("C60", 10);
        assert_eq!(p.stock("C60"), u32::MAX);
    }

    #[test]
    fn test_mixed_sequence_never_negative() {
        let mut p = product();
        let ops: &[(bool, u32)] = &[(true, 3), (false, 6), (false, 9), (true, 1), (false, 3)];
        for (add, qty) in ops {
            if *add {
                p.add_stock("C60", *qty);
            } else {
                let before = p.stock("C60");
                match p.reduce_stock("C60", *qty) {
                    Ok(()) => assert_eq!(p.stock("C60"), before - qty),
                    Err(_) => assert_eq!(p.stock("C60"), before),
                }
            }
        }
        // 5 + 3 - 6 (ok) - 9 (fail) + 1 - 3 (ok) = 0
        assert_eq!(p.stock("C60"), 0);
    }

    #[test]
    fn test_item_line_blank() {
        assert!(ItemLine::new("  ", 2).is_blank());
        assert!(ItemLine::new("Luna", 0).is_blank());
        assert!(!ItemLine::new("Luna", 1).is_blank());
    }
}
