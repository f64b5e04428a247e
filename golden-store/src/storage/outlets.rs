//! `outlet.csv` - `OutletCode,OutletName`, kept in file order

use std::path::Path;

use indexmap::IndexMap;
use shared::models::{Outlet, is_hq};

use super::open_csv;

pub fn load_outlets(path: &Path) -> IndexMap<String, Outlet> {
    let mut outlets = IndexMap::new();
    let Some(mut reader) = open_csv(path) else {
        return outlets;
    };

    for (idx, row) in reader.records().enumerate() {
        let record = match row {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row = idx + 2, error = %e, "Skipping unreadable outlet row");
                continue;
            }
        };
        let (Some(code), Some(name)) = (record.get(0), record.get(1)) else {
            tracing::warn!(row = idx + 2, "Skipping short outlet row");
            continue;
        };
        if code.is_empty() || is_hq(code) {
            continue;
        }
        outlets.insert(code.to_string(), Outlet::new(code, name));
    }

    tracing::debug!(count = outlets.len(), "Outlets loaded");
    outlets
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_keeps_file_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("outlet.csv");
        std::fs::write(
            &path,
            "OutletCode,OutletName\nC61,Mid Valley\nC60,Kuala Lumpur City Centre\nbroken\nHQ,Service Center\n",
        )
        .unwrap();

        let outlets = load_outlets(&path);
        let codes: Vec<&str> = outlets.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["C61", "C60"]);
        assert_eq!(outlets["C60"].name, "Kuala Lumpur City Centre");
    }
}
