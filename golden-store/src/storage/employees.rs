//! `employee.csv` - `EmployeeID,EmployeeName,Role,Password,OutletCode`

use std::collections::BTreeMap;
use std::path::Path;

use shared::AppResult;
use shared::models::{Employee, Role};

use super::{csv_bytes, open_csv, write_atomic};

const HEADER: [&str; 5] = ["EmployeeID", "EmployeeName", "Role", "Password", "OutletCode"];

/// Load employees keyed by id
///
/// Rows missing id/name/role/password are skipped; a missing outlet column
/// falls back to `default_outlet`.
pub fn load_employees(path: &Path, default_outlet: &str) -> BTreeMap<String, Employee> {
    let mut employees = BTreeMap::new();
    let Some(mut reader) = open_csv(path) else {
        return employees;
    };

    for (idx, row) in reader.records().enumerate() {
        let record = match row {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row = idx + 2, error = %e, "Skipping unreadable employee row");
                continue;
            }
        };
        if record.len() < 4 {
            tracing::warn!(row = idx + 2, "Skipping short employee row");
            continue;
        }
        let id = record[0].to_string();
        if id.is_empty() {
            continue;
        }
        let outlet = record
            .get(4)
            .filter(|o| !o.is_empty())
            .unwrap_or(default_outlet)
            .to_string();

        employees.insert(
            id.clone(),
            Employee {
                id,
                name: record[1].to_string(),
                role: Role::parse_lenient(&record[2]),
                password: record[3].to_string(),
                outlet,
            },
        );
    }

    tracing::debug!(count = employees.len(), "Employees loaded");
    employees
}

/// Rewrite the whole employee file
pub fn save_employees(path: &Path, employees: &BTreeMap<String, Employee>) -> AppResult<()> {
    let rows = employees.values().map(|e| {
        [
            e.id.as_str(),
            e.name.as_str(),
            e.role.as_str(),
            e.password.as_str(),
            e.outlet.as_str(),
        ]
    });
    let bytes = csv_bytes(&HEADER, rows)?;
    write_atomic(path, &bytes)?;
    tracing::info!(count = employees.len(), "Employee file saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_and_lenient_role() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("employee.csv");
        std::fs::write(
            &path,
            "EmployeeID,EmployeeName,Role,Password,OutletCode\n\
             C6001, Tan Mei Ling ,Manager,a2b1c0,C60\n\
             C6002,Farid,Part-time,pw\n\
             C6101,Ravi,Intern,pw,C61\n\
             bad,row\n",
        )
        .unwrap();

        let employees = load_employees(&path, "C60");
        assert_eq!(employees.len(), 3);
        assert_eq!(employees["C6001"].name, "Tan Mei Ling");
        assert!(employees["C6001"].is_manager());
        assert_eq!(employees["C6002"].outlet, "C60");
        assert_eq!(employees["C6101"].role, Role::PartTime);
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("employee.csv");
        let mut employees = BTreeMap::new();
        employees.insert(
            "C6003".to_string(),
            Employee {
                id: "C6003".into(),
                name: "Lee".into(),
                role: Role::FullTime,
                password: "secret".into(),
                outlet: "C61".into(),
            },
        );
        save_employees(&path, &employees).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("EmployeeID,EmployeeName,Role,Password,OutletCode\n"));
        assert!(text.contains("C6003,Lee,Full-time,secret,C61"));
        assert_eq!(load_employees(&path, "C60"), employees);
    }
}
