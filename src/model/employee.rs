use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Columns selected whenever a full [`Employee`] row is loaded.
pub const EMPLOYEE_COLUMNS: &str = "employee_id, first_name, last_name, email, phone_number, \
     address, department, role, status, salary, hire_date, tax_bracket_id";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Employee {
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    /// Optional reference into `Tax_Bracket`.
    pub tax_bracket_id: Option<i32>,
}

/// Values for a new `Employee` row; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
}
