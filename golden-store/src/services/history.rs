//! 销售历史 - 日期过滤与排序

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::Transaction;
use shared::AppError;

/// Sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Date,
    Amount,
    Customer,
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "amount" | "total" => Ok(SortKey::Amount),
            "customer" | "name" => Ok(SortKey::Customer),
            other => Err(AppError::validation(format!("Unknown sort key: {}", other))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Date => "Date",
            SortKey::Amount => "Amount",
            SortKey::Customer => "Customer",
        };
        f.write_str(s)
    }
}

/// Sales dated within `[start, end]`
pub fn filter_sales_by_date(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.is_sale() && t.date >= start && t.date <= end)
        .cloned()
        .collect()
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => (a.date, a.time).cmp(&(b.date, b.time)),
        SortKey::Amount => a.total.cmp(&b.total),
        SortKey::Customer => a
            .customer_name()
            .to_lowercase()
            .cmp(&b.customer_name().to_lowercase()),
    }
}

/// Exchange sort; equal keys keep their relative order
pub fn sort_sales(list: &mut [Transaction], key: SortKey, ascending: bool) {
    let n = list.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - 1 - i {
            let ord = compare(&list[j], &list[j + 1], key);
            let swap = if ascending {
                ord == Ordering::Greater
            } else {
                ord == Ordering::Less
            };
            if swap {
                list.swap(j, j + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::TransactionKind;

    fn sale(day: u32, total: i64, customer: &str) -> Transaction {
        Transaction {
            kind: TransactionKind::Sale,
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            time: None,
            employee_id: "C6001".into(),
            outlet: "C60".into(),
            product: "Luna".into(),
            quantity: 1,
            total: Decimal::from(total),
            customer: Some(customer.into()),
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_filter_inclusive() {
        let txs = vec![sale(9, 1, "a"), sale(10, 2, "b"), sale(14, 3, "c"), sale(15, 4, "d")];
        let filtered = filter_sales_by_date(&txs, d(10), d(14));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].customer_name(), "b");
        assert_eq!(filtered[1].customer_name(), "c");
    }

    #[test]
    fn test_filter_ignores_stock_moves() {
        let mut stock = sale(10, 0, "x");
        stock.kind = TransactionKind::StockIn;
        stock.customer = None;
        assert!(filter_sales_by_date(&[stock], d(1), d(31)).is_empty());
    }

    #[test]
    fn test_sort_by_amount_desc() {
        let mut txs = vec![sale(10, 5, "a"), sale(11, 20, "b"), sale(12, 10, "c")];
        sort_sales(&mut txs, SortKey::Amount, false);
        let totals: Vec<Decimal> = txs.iter().map(|t| t.total).collect();
        assert_eq!(totals, vec![Decimal::from(20), Decimal::from(10), Decimal::from(5)]);
    }

    #[test]
    fn test_sort_by_customer_case_insensitive_stable() {
        let mut txs = vec![
            sale(12, 1, "bob"),
            sale(10, 2, "Alice"),
            sale(11, 3, "alice"),
        ];
        sort_sales(&mut txs, SortKey::Customer, true);
        let days: Vec<NaiveDate> = txs.iter().map(|t| t.date).collect();
        assert_eq!(days, vec![d(10), d(11), d(12)]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Amount".parse::<SortKey>().unwrap(), SortKey::Amount);
        assert!("price".parse::<SortKey>().is_err());
    }
}
