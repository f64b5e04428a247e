//! Outlet Model

use serde::{Deserialize, Serialize};

/// Pseudo-outlet code for the service center (not in `outlet.csv`)
pub const HQ_CODE: &str = "HQ";

/// Retail outlet (门店)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlet {
    pub code: String,
    pub name: String,
}

impl Outlet {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Label used on stock receipts, e.g. `C60 (Kuala Lumpur City Centre)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.code, self.name)
    }
}

/// Whether a code refers to the HQ service center
pub fn is_hq(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(HQ_CODE)
}
