//! Database access for the handlers.
//!
//! Handlers only ever see [`PayrollStore`]; `main` builds a [`MySqlStore`]
//! over the connection pool and hands it to actix as `web::Data<dyn PayrollStore>`.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::model::{
    employee::{Employee, NewEmployee},
    payroll::PayrollReportRow,
    user::User,
};

#[cfg(test)]
pub mod memory;
mod mysql;

pub use mysql::MySqlStore;

/// Raw results of the dashboard aggregate queries, one field per query.
#[derive(Debug, Clone, Default)]
pub struct DashboardFigures {
    pub total_employees: i64,
    /// `None` when there are no employees.
    pub avg_salary: Option<Decimal>,
    pub department_counts: Vec<(Option<String>, i64)>,
    /// Newest pay date first.
    pub recent_net_salaries: Vec<Decimal>,
    pub pending_leaves: i64,
    /// `(year, month, hires)` ordered by year then month.
    pub monthly_hires: Vec<(i64, i64, i64)>,
    pub department_payroll: Vec<(Option<String>, Option<Decimal>)>,
    /// `(first_name, last_name, salary)`, highest salary first.
    pub top_earners: Vec<(String, String, Decimal)>,
    pub bonuses_since: Option<Decimal>,
}

/// Number of payroll rows the dashboard charts.
pub const RECENT_PAYROLL_LIMIT: i64 = 12;
/// Number of employees in the highest-salary list.
pub const TOP_EARNER_LIMIT: i64 = 5;

#[async_trait]
pub trait PayrollStore: Send + Sync {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Runs every dashboard aggregate; `since` bounds the hire and bonus windows.
    async fn dashboard_figures(&self, since: NaiveDate) -> Result<DashboardFigures, StoreError>;

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn create_employee(&self, new: &NewEmployee) -> Result<Employee, StoreError>;

    /// Deletes the employee and its payroll rows as one unit of work.
    /// `Ok(None)` means no such employee and nothing changed; otherwise the
    /// number of payroll rows removed.
    async fn delete_employee(&self, employee_id: i32) -> Result<Option<u64>, StoreError>;

    async fn payroll_report(&self) -> Result<Vec<PayrollReportRow>, StoreError>;

    async fn payslip_pdf(&self, payslip_id: i32) -> Result<Option<Vec<u8>>, StoreError>;
}
