use chrono::NaiveDate;

/// Stored payslip document for one payroll run.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Payslip {
    pub payslip_id: i32,
    pub employee_id: i32,
    pub payroll_id: i32,
    pub payslip_pdf: Vec<u8>,
    pub generated_date: NaiveDate,
}

/// Download path served by the payslip endpoint.
pub fn payslip_link(payslip_id: i32) -> String {
    format!("/api/payslip/{payslip_id}")
}
