//! Stock Count Model (早晚盘点)

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counting session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountSession {
    Morning,
    Night,
}

impl CountSession {
    pub fn title(&self) -> &'static str {
        match self {
            CountSession::Morning => "Morning Stock Count",
            CountSession::Night => "Night Stock Count",
        }
    }
}

impl fmt::Display for CountSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One counted model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCountLine {
    pub model: String,
    pub counted: u32,
    pub recorded: u32,
}

impl StockCountLine {
    pub fn is_tally(&self) -> bool {
        self.counted == self.recorded
    }

    /// Absolute unit difference
    pub fn difference(&self) -> u32 {
        self.counted.abs_diff(self.recorded)
    }
}

/// Verification result for one session at one outlet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockCountReport {
    pub session: CountSession,
    pub outlet: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub lines: Vec<StockCountLine>,
}

impl StockCountReport {
    pub fn total_checked(&self) -> usize {
        self.lines.len()
    }

    pub fn tally_correct(&self) -> usize {
        self.lines.iter().filter(|l| l.is_tally()).count()
    }

    pub fn mismatches(&self) -> usize {
        self.total_checked() - self.tally_correct()
    }

    pub fn has_mismatch(&self) -> bool {
        self.mismatches() > 0
    }
}
