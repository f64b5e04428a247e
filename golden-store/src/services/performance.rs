//! 员工业绩排行
//!
//! 按员工聚合销售额，冒泡排序得到排行榜 (相同金额保持先出现的顺序)。

use std::collections::BTreeMap;

use indexmap::IndexMap;
use shared::models::{Employee, PerformanceEntry, RankedPerformance, Transaction};

pub const UNKNOWN_STAFF: &str = "Unknown Staff";

/// Group sales by employee id, in first-seen order
pub fn aggregate(transactions: &[Transaction]) -> Vec<PerformanceEntry> {
    let mut metrics: IndexMap<&str, PerformanceEntry> = IndexMap::new();
    for t in transactions.iter().filter(|t| t.is_sale()) {
        let entry = metrics
            .entry(t.employee_id.as_str())
            .or_insert_with(|| PerformanceEntry::new(&t.employee_id));
        entry.total_sales += t.total;
        entry.transaction_count += 1;
    }
    metrics.into_values().collect()
}

/// Descending by total using an exchange sort with strict less-than
pub fn rank(entries: &mut [PerformanceEntry]) {
    let n = entries.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - 1 - i {
            if entries[j].total_sales < entries[j + 1].total_sales {
                entries.swap(j, j + 1);
            }
        }
    }
}

/// Employee name for an id
///
/// Direct lookup first, then a trimmed case-insensitive scan.
pub fn resolve_name(employees: &BTreeMap<String, Employee>, id: &str) -> String {
    if let Some(e) = employees.get(id) {
        return e.name.clone();
    }
    let wanted = id.trim();
    employees
        .values()
        .find(|e| e.id.trim().eq_ignore_ascii_case(wanted))
        .map(|e| e.name.clone())
        .unwrap_or_else(|| UNKNOWN_STAFF.to_string())
}

pub fn rank_label(rank: usize) -> String {
    if rank == 1 {
        "TOP RANK".to_string()
    } else {
        format!("RANK {}", rank)
    }
}

/// Ranked leaderboard with resolved names
pub fn leaderboard(
    transactions: &[Transaction],
    employees: &BTreeMap<String, Employee>,
) -> Vec<RankedPerformance> {
    let mut entries = aggregate(transactions);
    rank(&mut entries);
    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| RankedPerformance {
            rank: idx + 1,
            rank_label: rank_label(idx + 1),
            employee_name: resolve_name(employees, &entry.employee_id),
            entry,
        })
        .collect()
}
