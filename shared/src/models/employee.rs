//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Home outlet used when `employee.csv` has no outlet column
pub const DEFAULT_OUTLET: &str = "C60";

/// Employee role
///
/// Only `Manager` changes what an employee may do; the two staff roles are
/// carried for display and for the employee file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Manager")]
    Manager,
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
}

impl Role {
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::FullTime => "Full-time",
            Role::PartTime => "Part-time",
        }
    }

    /// Lenient parse used when loading the employee file
    ///
    /// Unknown labels are treated as part-time staff.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Role::PartTime)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "manager" => Ok(Role::Manager),
            "full-time" | "fulltime" => Ok(Role::FullTime),
            "part-time" | "parttime" => Ok(Role::PartTime),
            _ => Err(format!("unknown role: {}", s.trim())),
        }
    }
}

/// Employee entity (password kept as stored in the employee file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password: String,
    /// Home outlet code
    pub outlet: String,
}

impl Employee {
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    /// Public view without the password
    pub fn to_response(&self) -> EmployeeResponse {
        EmployeeResponse {
            id: self.id.clone(),
            name: self.name.clone(),
            role: self.role,
            outlet: self.outlet.clone(),
        }
    }
}

/// Employee response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub outlet: String,
}

/// Register employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub id: String,
    pub name: String,
    pub password: String,
    pub role: Role,
    pub outlet: String,
}
