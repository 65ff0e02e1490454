use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::{debug, warn};

use super::{DashboardFigures, PayrollStore, RECENT_PAYROLL_LIMIT, TOP_EARNER_LIMIT};
use crate::error::StoreError;
use crate::model::{
    employee::{EMPLOYEE_COLUMNS, Employee, NewEmployee},
    leave::LeaveStatus,
    payroll::PayrollReportRow,
    user::User,
};

/// [`PayrollStore`] over a MySQL connection pool.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

async fn delete_employee_rows(
    tx: &mut Transaction<'_, MySql>,
    employee_id: i32,
) -> Result<Option<u64>, sqlx::Error> {
    let exists = sqlx::query_scalar::<_, i32>(
        "SELECT employee_id FROM Employee WHERE employee_id = ? FOR UPDATE",
    )
    .bind(employee_id)
    .fetch_optional(&mut **tx)
    .await?;

    if exists.is_none() {
        return Ok(None);
    }

    let payroll = sqlx::query("DELETE FROM Payroll WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut **tx)
        .await?;
    debug!(employee_id, rows = payroll.rows_affected(), "Deleted payroll rows");

    sqlx::query("DELETE FROM Employee WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut **tx)
        .await?;

    Ok(Some(payroll.rows_affected()))
}

#[async_trait]
impl PayrollStore for MySqlStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, employee_id, role
            FROM Users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn dashboard_figures(&self, since: NaiveDate) -> Result<DashboardFigures, StoreError> {
        let total_employees = sqlx::query_scalar::<_, i64>("SELECT COUNT(employee_id) FROM Employee")
            .fetch_one(&self.pool)
            .await?;

        let avg_salary = sqlx::query_scalar::<_, Option<Decimal>>("SELECT AVG(salary) FROM Employee")
            .fetch_one(&self.pool)
            .await?;

        let department_counts = sqlx::query_as::<_, (Option<String>, i64)>(
            "SELECT department, COUNT(employee_id) FROM Employee GROUP BY department",
        )
        .fetch_all(&self.pool)
        .await?;

        let recent_net_salaries = sqlx::query_scalar::<_, Decimal>(
            "SELECT net_salary FROM Payroll ORDER BY pay_date DESC LIMIT ?",
        )
        .bind(RECENT_PAYROLL_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let pending_leaves =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(leave_id) FROM Leaves WHERE status = ?")
                .bind(LeaveStatus::Pending.as_ref())
                .fetch_one(&self.pool)
                .await?;

        let monthly_hires = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT CAST(YEAR(hire_date) AS SIGNED) AS hire_year,
                   CAST(MONTH(hire_date) AS SIGNED) AS hire_month,
                   COUNT(employee_id)
            FROM Employee
            WHERE hire_date >= ?
            GROUP BY hire_year, hire_month
            ORDER BY hire_year, hire_month
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let department_payroll = sqlx::query_as::<_, (Option<String>, Option<Decimal>)>(
            r#"
            SELECT e.department, SUM(p.net_salary)
            FROM Employee e
            JOIN Payroll p ON p.employee_id = e.employee_id
            GROUP BY e.department
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let top_earners = sqlx::query_as::<_, (String, String, Decimal)>(
            "SELECT first_name, last_name, salary FROM Employee ORDER BY salary DESC LIMIT ?",
        )
        .bind(TOP_EARNER_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let bonuses_since = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(bonus) FROM Payroll WHERE pay_date >= ?",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardFigures {
            total_employees,
            avg_salary,
            department_counts,
            recent_net_salaries,
            pending_leaves,
            monthly_hires,
            department_payroll,
            top_earners,
            bonuses_since,
        })
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM Employee");
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    async fn create_employee(&self, new: &NewEmployee) -> Result<Employee, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO Employee
            (first_name, last_name, email, phone_number, address, department, role, status, salary, hire_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone_number)
        .bind(&new.address)
        .bind(&new.department)
        .bind(&new.role)
        .bind(&new.status)
        .bind(new.salary)
        .bind(new.hire_date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Duplicate("email")
            } else {
                StoreError::Database(e)
            }
        })?;

        // Re-read so the caller sees the stored DECIMAL(15,2) scale.
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM Employee WHERE employee_id = ?");
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(result.last_insert_id())
            .fetch_one(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn delete_employee(&self, employee_id: i32) -> Result<Option<u64>, StoreError> {
        let mut tx = self.pool.begin().await?;

        match delete_employee_rows(&mut tx, employee_id).await {
            Ok(Some(payroll_rows)) => {
                tx.commit().await?;
                Ok(Some(payroll_rows))
            }
            Ok(None) => {
                tx.rollback().await?;
                Ok(None)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, employee_id, "Rollback failed");
                }
                Err(e.into())
            }
        }
    }

    async fn payroll_report(&self) -> Result<Vec<PayrollReportRow>, StoreError> {
        let rows = sqlx::query_as::<_, PayrollReportRow>(
            r#"
            SELECT
                p.payroll_id,
                p.employee_id,
                e.first_name,
                e.last_name,
                e.role,
                e.department,
                p.net_salary,
                p.pay_date,
                p.payslip_generated,
                s.payslip_id
            FROM Payroll p
            JOIN Employee e ON e.employee_id = p.employee_id
            LEFT JOIN Payslips s ON s.payroll_id = p.payroll_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn payslip_pdf(&self, payslip_id: i32) -> Result<Option<Vec<u8>>, StoreError> {
        let pdf = sqlx::query_scalar::<_, Vec<u8>>(
            "SELECT payslip_pdf FROM Payslips WHERE payslip_id = ?",
        )
        .bind(payslip_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pdf)
    }
}
