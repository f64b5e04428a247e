//! 登录与权限检查

use shared::models::Employee;
use shared::{AppError, AppResult};

use crate::core::StoreState;

/// Login and role checks
#[derive(Debug, Clone)]
pub struct AuthService {
    state: StoreState,
}

impl AuthService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    /// Trimmed id, exact password match
    ///
    /// Failure never says which of the two was wrong.
    pub fn login(&self, id: &str, password: &str) -> AppResult<Employee> {
        let id = id.trim();
        match self.state.employee(id) {
            Some(employee) if employee.password == password => {
                tracing::info!(employee_id = %employee.id, role = %employee.role, "Login successful");
                Ok(employee)
            }
            _ => {
                tracing::warn!(employee_id = %id, "Login failed");
                Err(AppError::invalid_credentials())
            }
        }
    }
}

/// Manager-only gate
pub fn require_manager(employee: &Employee, action: &str) -> AppResult<()> {
    if employee.is_manager() {
        Ok(())
    } else {
        tracing::warn!(employee_id = %employee.id, action, "Manager permission required");
        Err(AppError::manager_required(action))
    }
}
