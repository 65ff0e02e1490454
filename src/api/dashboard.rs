use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use chrono::{Local, Months, NaiveDate};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    store::{DashboardFigures, PayrollStore},
};

/// Key used for employees without a department. A department literally
/// named `"null"` shares the bucket, so the counts still sum to the total.
const NO_DEPARTMENT: &str = "null";

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct MonthlyHires {
    #[schema(example = 2026)]
    pub year: i64,
    #[schema(example = 3)]
    pub month: i64,
    #[schema(example = 4)]
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct TopEarner {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = 98000.0)]
    pub salary: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_employees: i64,
    /// Mean salary rounded to two decimals.
    pub avg_salary: f64,
    pub department_data: BTreeMap<String, i64>,
    /// Latest twelve net salaries, oldest first.
    pub payroll_expenses: Vec<f64>,
    pub pending_leaves: i64,
    pub employee_growth: Vec<MonthlyHires>,
    pub department_payroll_data: BTreeMap<String, f64>,
    pub highest_salary_employees: Vec<TopEarner>,
    pub bonuses_incentives_paid: f64,
}

fn to_float(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn department_key(department: Option<String>) -> String {
    department.unwrap_or_else(|| NO_DEPARTMENT.to_string())
}

/// Start of the trailing twelve-month window, clamped to month end.
pub fn twelve_months_before(today: NaiveDate) -> NaiveDate {
    today.checked_sub_months(Months::new(12)).unwrap_or(NaiveDate::MIN)
}

impl From<DashboardFigures> for DashboardResponse {
    fn from(figures: DashboardFigures) -> Self {
        let mut department_data = BTreeMap::new();
        for (department, count) in figures.department_counts {
            *department_data.entry(department_key(department)).or_insert(0) += count;
        }

        let mut department_payroll_data = BTreeMap::new();
        for (department, total) in figures.department_payroll {
            *department_payroll_data
                .entry(department_key(department))
                .or_insert(0.0) += total.map(to_float).unwrap_or_default();
        }

        Self {
            total_employees: figures.total_employees,
            avg_salary: figures
                .avg_salary
                .map(|avg| to_float(avg.round_dp(2)))
                .unwrap_or_default(),
            department_data,
            payroll_expenses: figures
                .recent_net_salaries
                .into_iter()
                .rev()
                .map(to_float)
                .collect(),
            pending_leaves: figures.pending_leaves,
            employee_growth: figures
                .monthly_hires
                .into_iter()
                .map(|(year, month, count)| MonthlyHires { year, month, count })
                .collect(),
            department_payroll_data,
            highest_salary_employees: figures
                .top_earners
                .into_iter()
                .map(|(first, last, salary)| TopEarner {
                    name: format!("{first} {last}"),
                    salary: to_float(salary),
                })
                .collect(),
            bonuses_incentives_paid: figures.bonuses_since.map(to_float).unwrap_or_default(),
        }
    }
}

/// Aggregate figures for the admin dashboard
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardResponse),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(store: web::Data<dyn PayrollStore>) -> Result<HttpResponse, ApiError> {
    let since = twelve_months_before(Local::now().date_naive());
    debug!(%since, "Computing dashboard aggregates");

    let figures = store.dashboard_figures(since).await.map_err(|e| {
        error!(error = %e, "Failed to compute dashboard aggregates");
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(DashboardResponse::from(figures)))
}
