use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, StoreError},
    model::employee::{Employee, NewEmployee},
    store::PayrollStore,
};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "john@email.com", format = "email")]
    pub email: String,
    #[schema(example = "+8801712345678")]
    pub phone_number: Option<String>,
    pub address: Option<String>,
    #[schema(example = "Engineering")]
    pub department: Option<String>,
    #[schema(example = "Developer")]
    pub role: Option<String>,
    #[schema(example = "active")]
    pub status: Option<String>,
    /// Accepts a JSON number or a numeric string.
    #[schema(example = "55000.00", value_type = String)]
    pub salary: Decimal,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub hire_date: NaiveDate,
}

/// `DECIMAL(15, 2)` holds at most thirteen integer digits.
const SALARY_LIMIT: i64 = 10_000_000_000_000;

/// Column widths of the `Employee` table, in characters.
const FIRST_NAME_MAX: usize = 50;
const LAST_NAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;
const PHONE_MAX: usize = 15;
/// `TEXT` is limited in bytes, not characters.
const ADDRESS_MAX_BYTES: usize = 65_535;
const DEPARTMENT_MAX: usize = 50;
const ROLE_MAX: usize = 50;
const STATUS_MAX: usize = 20;

fn check_len(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

impl CreateEmployee {
    fn validate(&self) -> Result<(), ApiError> {
        for (field, value, max) in [
            ("first_name", &self.first_name, FIRST_NAME_MAX),
            ("last_name", &self.last_name, LAST_NAME_MAX),
            ("email", &self.email, EMAIL_MAX),
        ] {
            let value = value.trim();
            if value.is_empty() {
                return Err(ApiError::Validation(format!("{field} must not be empty")));
            }
            check_len(field, value, max)?;
        }

        for (field, value, max) in [
            ("phone_number", &self.phone_number, PHONE_MAX),
            ("department", &self.department, DEPARTMENT_MAX),
            ("role", &self.role, ROLE_MAX),
            ("status", &self.status, STATUS_MAX),
        ] {
            if let Some(value) = value {
                check_len(field, value, max)?;
            }
        }

        if self.address.as_ref().is_some_and(|a| a.len() > ADDRESS_MAX_BYTES) {
            return Err(ApiError::Validation(format!(
                "address must be at most {ADDRESS_MAX_BYTES} bytes"
            )));
        }

        if self.salary < Decimal::ZERO {
            return Err(ApiError::Validation("salary must not be negative".into()));
        }
        if self.salary.normalize().scale() > 2 {
            return Err(ApiError::Validation(
                "salary must have at most two decimal places".into(),
            ));
        }
        if self.salary >= Decimal::from(SALARY_LIMIT) {
            return Err(ApiError::Validation("salary is too large".into()));
        }

        Ok(())
    }

    fn into_new_employee(self) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number,
            address: self.address,
            department: self.department,
            role: self.role,
            status: self.status,
            salary: self.salary,
            hire_date: self.hire_date,
        }
    }
}

/// Listing shape: salary as a float.
#[derive(Serialize, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = 1)]
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    #[schema(example = 55000.0)]
    pub salary: f64,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub hire_date: NaiveDate,
}

impl From<Employee> for EmployeeResponse {
    fn from(emp: Employee) -> Self {
        Self {
            employee_id: emp.employee_id,
            salary: emp.salary.to_f64().unwrap_or_default(),
            first_name: emp.first_name,
            last_name: emp.last_name,
            email: emp.email,
            phone_number: emp.phone_number,
            address: emp.address,
            department: emp.department,
            role: emp.role,
            status: emp.status,
            hire_date: emp.hire_date,
        }
    }
}

/// Creation shape: salary as text with two decimals.
#[derive(Serialize, ToSchema)]
pub struct CreatedEmployeeResponse {
    #[schema(example = 1)]
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    #[schema(example = "55000.00")]
    pub salary: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub hire_date: NaiveDate,
}

impl From<Employee> for CreatedEmployeeResponse {
    fn from(emp: Employee) -> Self {
        Self {
            employee_id: emp.employee_id,
            salary: format!("{:.2}", emp.salary),
            first_name: emp.first_name,
            last_name: emp.last_name,
            email: emp.email,
            phone_number: emp.phone_number,
            address: emp.address,
            department: emp.department,
            role: emp.role,
            status: emp.status,
            hire_date: emp.hire_date,
        }
    }
}

/// List every employee
#[utoipa::path(
    get,
    path = "/api/admin/employees",
    responses(
        (status = 200, description = "All employees", body = [EmployeeResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    store: web::Data<dyn PayrollStore>,
) -> Result<HttpResponse, ApiError> {
    let employees = store.list_employees().await.map_err(|e| {
        error!(error = %e, "Failed to fetch employees");
        ApiError::from(e)
    })?;

    let data: Vec<EmployeeResponse> = employees.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(data))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = CreatedEmployeeResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 409, description = "Email already exists", body = ErrorBody, example = json!({
            "message": "Email already exists"
        })),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn PayrollStore>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let new_employee = payload.into_new_employee();
    let employee = match store.create_employee(&new_employee).await {
        Ok(employee) => employee,
        Err(StoreError::Duplicate(field)) => {
            info!(field, "Rejected employee with duplicate value");
            return Err(ApiError::Conflict("Email already exists".into()));
        }
        Err(e) => {
            error!(error = %e, "Failed to Create Employee");
            return Err(e.into());
        }
    };

    info!(employee_id = employee.employee_id, "Employee created");
    Ok(HttpResponse::Created().json(CreatedEmployeeResponse::from(employee)))
}

/// Delete Employee together with its payroll records
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = ErrorBody, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Deletion failed and was rolled back", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn PayrollStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    match store.delete_employee(employee_id).await {
        Ok(Some(payroll_rows)) => {
            info!(employee_id, payroll_rows, "Employee deletion successful");
            Ok(HttpResponse::Ok().json(json!({
                "message": "Employee deleted successfully"
            })))
        }
        Ok(None) => Err(ApiError::NotFound("Employee not found".into())),
        Err(e) => {
            error!(error = %e, employee_id, "Deletion error, rolled back");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}
