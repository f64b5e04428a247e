//! 员工注册 (仅经理)

use shared::models::{Employee, EmployeeCreate, EmployeeResponse};
use shared::{AppError, AppResult, ErrorCode};

use super::{ensure_single_line, require_manager};
use crate::core::StoreState;

#[derive(Debug, Clone)]
pub struct RegistrationService {
    state: StoreState,
}

impl RegistrationService {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    /// Add an employee and rewrite `employee.csv`
    pub fn register(&self, actor: &Employee, data: EmployeeCreate) -> AppResult<EmployeeResponse> {
        require_manager(actor, "register employees")?;

        let id = data.id.trim();
        let name = data.name.trim();
        let password = data.password.trim();
        let outlet = data.outlet.trim();
        if id.is_empty() || name.is_empty() || password.is_empty() || outlet.is_empty() {
            return Err(AppError::validation("All fields are required"));
        }
        if id.contains(',') || name.contains(',') || password.contains(',') {
            return Err(AppError::validation("Fields must not contain commas"));
        }
        ensure_single_line("Employee name", name)?;
        let outlet = self.state.require_outlet(outlet)?.code;

        let mut employees = self.state.employees.write();
        if employees.contains_key(id) {
            return Err(
                AppError::with_message(ErrorCode::EmployeeExists, format!("Employee ID {} already exists", id))
                    .with_detail("employee_id", id),
            );
        }

        let employee = Employee {
            id: id.to_string(),
            name: name.to_string(),
            role: data.role,
            password: password.to_string(),
            outlet,
        };
        employees.insert(employee.id.clone(), employee.clone());

        if let Err(e) = self.state.save_employees(&employees) {
            employees.remove(&employee.id);
            return Err(e);
        }

        tracing::info!(
            employee_id = %employee.id,
            role = %employee.role,
            outlet = %employee.outlet,
            registered_by = %actor.id,
            "Employee registered"
        );
        Ok(employee.to_response())
    }
}
