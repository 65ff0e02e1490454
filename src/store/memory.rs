//! In-memory [`PayrollStore`] used by the handler tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::{DashboardFigures, PayrollStore, RECENT_PAYROLL_LIMIT, TOP_EARNER_LIMIT};
use crate::error::StoreError;
use crate::model::{
    employee::{Employee, NewEmployee},
    leave::{Leave, LeaveStatus},
    payroll::{Payroll, PayrollReportRow},
    payslip::Payslip,
    user::User,
};

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub employees: Vec<Employee>,
    pub payrolls: Vec<Payroll>,
    pub leaves: Vec<Leave>,
    pub payslips: Vec<Payslip>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Makes the next employee deletion fail after its payroll rows are gone.
    fail_deletes: AtomicBool,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

impl MemoryStore {
    pub fn snapshot(&self) -> Tables {
        self.tables.lock().unwrap().clone()
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn add_user(&self, username: &str, password_hash: &str, role: &str) {
        let mut tables = self.tables.lock().unwrap();
        let user_id = tables.users.len() as i32 + 1;
        tables.users.push(User {
            user_id,
            username: username.to_owned(),
            password: password_hash.to_owned(),
            employee_id: None,
            role: role.to_owned(),
        });
    }

    pub fn add_employee(
        &self,
        first_name: &str,
        department: Option<&str>,
        salary: Decimal,
        hire_date: NaiveDate,
    ) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let employee_id = tables.employees.iter().map(|e| e.employee_id).max().unwrap_or(0) + 1;
        tables.employees.push(Employee {
            employee_id,
            first_name: first_name.to_owned(),
            last_name: "Tester".to_owned(),
            email: format!("{}{}@example.com", first_name.to_lowercase(), employee_id),
            phone_number: None,
            address: None,
            department: department.map(str::to_owned),
            role: Some("engineer".to_owned()),
            status: Some("active".to_owned()),
            salary: salary.round_dp(2),
            hire_date,
            tax_bracket_id: None,
        });
        employee_id
    }

    pub fn add_payroll(
        &self,
        employee_id: i32,
        net_salary: Decimal,
        bonus: Decimal,
        pay_date: NaiveDate,
    ) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let payroll_id = tables.payrolls.len() as i32 + 1;
        tables.payrolls.push(Payroll {
            payroll_id,
            employee_id,
            basic_salary: net_salary,
            bonus,
            deductions: Decimal::ZERO,
            net_salary,
            pay_date,
            payslip_generated: false,
        });
        payroll_id
    }

    pub fn add_leave(&self, employee_id: i32, status: LeaveStatus) {
        let mut tables = self.tables.lock().unwrap();
        let leave_id = tables.leaves.len() as i32 + 1;
        tables.leaves.push(Leave {
            leave_id,
            employee_id,
            start_date: date(2026, 1, 5),
            end_date: date(2026, 1, 6),
            status: status.as_ref().to_owned(),
            total_leave_days: Some(2),
            reason: None,
        });
    }

    pub fn add_payslip(&self, payroll_id: i32, pdf: &[u8]) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let payslip_id = tables.payslips.len() as i32 + 100;
        let payroll = tables
            .payrolls
            .iter_mut()
            .find(|p| p.payroll_id == payroll_id)
            .expect("payslip needs an existing payroll");
        payroll.payslip_generated = true;
        let employee_id = payroll.employee_id;
        tables.payslips.push(Payslip {
            payslip_id,
            employee_id,
            payroll_id,
            payslip_pdf: pdf.to_vec(),
            generated_date: date(2026, 1, 31),
        });
        payslip_id
    }
}

#[async_trait]
impl PayrollStore for MemoryStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn dashboard_figures(&self, since: NaiveDate) -> Result<DashboardFigures, StoreError> {
        let tables = self.tables.lock().unwrap();
        let employees = &tables.employees;

        let total_employees = employees.len() as i64;
        let avg_salary = (!employees.is_empty()).then(|| {
            employees.iter().map(|e| e.salary).sum::<Decimal>() / Decimal::from(employees.len())
        });

        let mut departments: BTreeMap<Option<String>, i64> = BTreeMap::new();
        for e in employees {
            *departments.entry(e.department.clone()).or_default() += 1;
        }

        let mut payrolls = tables.payrolls.clone();
        payrolls.sort_by(|a, b| b.pay_date.cmp(&a.pay_date));
        let recent_net_salaries = payrolls
            .iter()
            .take(RECENT_PAYROLL_LIMIT as usize)
            .map(|p| p.net_salary)
            .collect();

        let pending_leaves = tables
            .leaves
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending.as_ref())
            .count() as i64;

        let mut hires: BTreeMap<(i64, i64), i64> = BTreeMap::new();
        for e in employees.iter().filter(|e| e.hire_date >= since) {
            *hires
                .entry((e.hire_date.year() as i64, e.hire_date.month() as i64))
                .or_default() += 1;
        }

        let mut department_payroll: BTreeMap<Option<String>, Decimal> = BTreeMap::new();
        for p in &tables.payrolls {
            if let Some(e) = employees.iter().find(|e| e.employee_id == p.employee_id) {
                *department_payroll.entry(e.department.clone()).or_default() += p.net_salary;
            }
        }

        let mut by_salary = employees.clone();
        by_salary.sort_by(|a, b| b.salary.cmp(&a.salary));
        let top_earners = by_salary
            .into_iter()
            .take(TOP_EARNER_LIMIT as usize)
            .map(|e| (e.first_name, e.last_name, e.salary))
            .collect();

        let bonuses: Vec<Decimal> = tables
            .payrolls
            .iter()
            .filter(|p| p.pay_date >= since)
            .map(|p| p.bonus)
            .collect();
        let bonuses_since = (!bonuses.is_empty()).then(|| bonuses.into_iter().sum());

        Ok(DashboardFigures {
            total_employees,
            avg_salary,
            department_counts: departments.into_iter().collect(),
            recent_net_salaries,
            pending_leaves,
            monthly_hires: hires.into_iter().map(|((y, m), c)| (y, m, c)).collect(),
            department_payroll: department_payroll
                .into_iter()
                .map(|(dept, total)| (dept, Some(total)))
                .collect(),
            top_earners,
            bonuses_since,
        })
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.tables.lock().unwrap().employees.clone())
    }

    async fn create_employee(&self, new: &NewEmployee) -> Result<Employee, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.employees.iter().any(|e| e.email == new.email) {
            return Err(StoreError::Duplicate("email"));
        }

        let employee_id = tables.employees.iter().map(|e| e.employee_id).max().unwrap_or(0) + 1;
        // Callers validate the scale, so this only pads to cents.
        let mut salary = new.salary;
        salary.rescale(2);
        let employee = Employee {
            employee_id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            phone_number: new.phone_number.clone(),
            address: new.address.clone(),
            department: new.department.clone(),
            role: new.role.clone(),
            status: new.status.clone(),
            salary,
            hire_date: new.hire_date,
            tax_bracket_id: None,
        };
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    async fn delete_employee(&self, employee_id: i32) -> Result<Option<u64>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.employees.iter().any(|e| e.employee_id == employee_id) {
            return Ok(None);
        }

        // Work on a copy so a failure leaves the committed tables untouched.
        let mut pending = tables.clone();
        let before = pending.payrolls.len();
        pending.payrolls.retain(|p| p.employee_id != employee_id);
        let removed = (before - pending.payrolls.len()) as u64;

        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "connection lost during delete".into(),
            )));
        }

        pending.employees.retain(|e| e.employee_id != employee_id);
        *tables = pending;
        Ok(Some(removed))
    }

    async fn payroll_report(&self) -> Result<Vec<PayrollReportRow>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut rows = Vec::new();
        for p in &tables.payrolls {
            let Some(e) = tables.employees.iter().find(|e| e.employee_id == p.employee_id) else {
                continue;
            };
            let slips: Vec<Option<i32>> = {
                let ids: Vec<_> = tables
                    .payslips
                    .iter()
                    .filter(|s| s.payroll_id == p.payroll_id)
                    .map(|s| Some(s.payslip_id))
                    .collect();
                if ids.is_empty() { vec![None] } else { ids }
            };
            for payslip_id in slips {
                rows.push(PayrollReportRow {
                    payroll_id: p.payroll_id,
                    employee_id: p.employee_id,
                    first_name: e.first_name.clone(),
                    last_name: e.last_name.clone(),
                    role: e.role.clone(),
                    department: e.department.clone(),
                    net_salary: p.net_salary,
                    pay_date: p.pay_date,
                    payslip_generated: Some(p.payslip_generated),
                    payslip_id,
                });
            }
        }
        Ok(rows)
    }

    async fn payslip_pdf(&self, payslip_id: i32) -> Result<Option<Vec<u8>>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .payslips
            .iter()
            .find(|s| s.payslip_id == payslip_id)
            .map(|s| s.payslip_pdf.clone()))
    }
}
