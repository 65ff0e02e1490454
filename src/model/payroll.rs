use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One payroll run for one employee. `net_salary` is stored as supplied,
/// never derived from the other amounts.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Payroll {
    pub payroll_id: i32,
    pub employee_id: i32,
    pub basic_salary: Decimal,
    pub bonus: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
    pub pay_date: NaiveDate,
    pub payslip_generated: bool,
}

/// Payroll joined with its employee and, when one exists, its payslip.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PayrollReportRow {
    pub payroll_id: i32,
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub department: Option<String>,
    pub net_salary: Decimal,
    pub pay_date: NaiveDate,
    pub payslip_generated: Option<bool>,
    pub payslip_id: Option<i32>,
}
