//! 文件存储层 - CSV 文件整体读写
//!
//! 读取失败只记录日志并返回空/部分集合；写入先写临时文件再 rename，
//! 避免写到一半崩溃时截断原文件。

pub mod attendance;
pub mod employees;
pub mod outlets;

pub use attendance::AttendanceStore;
pub use employees::{load_employees, save_employees};
pub use outlets::load_outlets;

use std::fs::File;
use std::path::Path;

use shared::{AppError, AppResult};

pub const EMPLOYEE_FILE: &str = "employee.csv";
pub const OUTLET_FILE: &str = "outlet.csv";
pub const MODEL_FILE: &str = "model.csv";
pub const ATTENDANCE_FILE: &str = "attendance.csv";

/// Open a CSV file with a header row
///
/// Returns None (logged) when the file is missing or unreadable.
pub(crate) fn open_csv(path: &Path) -> Option<csv::Reader<File>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Data file not found, starting empty");
        return None;
    }
    match csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
    {
        Ok(reader) => Some(reader),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to open data file");
            None
        }
    }
}

/// Serialize rows into CSV bytes
pub(crate) fn csv_bytes<I, R>(header: &[&str], rows: I) -> AppResult<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    wtr.write_record(header).map_err(csv_error)?;
    for row in rows {
        wtr.write_record(row).map_err(csv_error)?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::storage(format!("CSV flush failed: {}", e)))
}

/// Write to a sibling temp file, then rename over the target
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp_name);
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn csv_error(e: csv::Error) -> AppError {
    AppError::storage(format!("CSV error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("file.csv");
        write_atomic(&path, b"a,b\n").unwrap();
        write_atomic(&path, b"c,d\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "c,d\n");
        assert!(!tmp.path().join("nested").join("file.csv.tmp").exists());
    }

    #[test]
    fn test_csv_bytes_quotes_commas() {
        let bytes = csv_bytes(&["A", "B"], vec![vec!["x", "y,z"]]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "A,B\nx,\"y,z\"\n");
    }

    #[test]
    fn test_open_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(open_csv(&tmp.path().join("nope.csv")).is_none());
    }
}
