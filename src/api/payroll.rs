use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    model::{payroll::PayrollReportRow, payslip::payslip_link},
    store::PayrollStore,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollEntry {
    #[schema(example = 12)]
    pub payroll_id: i32,
    #[schema(example = 1001)]
    pub employee_id: i32,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    pub role: Option<String>,
    pub department: Option<String>,
    #[schema(example = 53000.0)]
    pub net_salary: f64,
    #[schema(example = "2026-01-31", value_type = String, format = "date")]
    pub pay_date: NaiveDate,
    pub payslip_generated: bool,
    /// Download path of the payslip, when one has been stored.
    #[schema(example = "/api/payslip/7")]
    pub payslip_pdf: Option<String>,
}

impl From<PayrollReportRow> for PayrollEntry {
    fn from(row: PayrollReportRow) -> Self {
        Self {
            payroll_id: row.payroll_id,
            employee_id: row.employee_id,
            employee_name: format!("{} {}", row.first_name, row.last_name),
            role: row.role,
            department: row.department,
            net_salary: row.net_salary.to_f64().unwrap_or_default(),
            pay_date: row.pay_date,
            payslip_generated: row.payslip_generated.unwrap_or(false),
            payslip_pdf: row.payslip_id.map(payslip_link),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/payroll",
    responses(
        (status = 200, description = "Payroll joined with employee and payslip", body = [PayrollEntry]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Payroll"
)]
pub async fn list_payrolls(store: web::Data<dyn PayrollStore>) -> Result<HttpResponse, ApiError> {
    let rows = store.payroll_report().await.map_err(|e| {
        error!(error = %e, "Failed to fetch payroll list");
        ApiError::from(e)
    })?;

    let data: Vec<PayrollEntry> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(data))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use actix_web::test;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    use crate::store::memory::{MemoryStore, date};
    use crate::test_support;

    #[actix_web::test]
    async fn joins_employee_and_links_payslip_by_id() {
        let store = Arc::new(MemoryStore::default());
        let emp = store.add_employee("Lin", Some("Finance"), Decimal::from(4000), date(2024, 5, 1));
        let net = Decimal::from_str("3900.50").unwrap();
        let paid = store.add_payroll(emp, net, Decimal::ZERO, date(2025, 1, 31));
        store.add_payroll(emp, Decimal::from(3900), Decimal::ZERO, date(2025, 2, 28));
        let slip = store.add_payslip(paid, b"%PDF-1.4");

        let app = test::init_service(test_support::app(store, test_support::config())).await;
        let req = test::TestRequest::get()
            .uri("/api/payroll")
            .peer_addr(test_support::peer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);

        let with_slip = rows.iter().find(|r| r["payroll_id"] == paid).unwrap();
        assert_eq!(with_slip["employee_name"], "Lin Tester");
        assert_eq!(with_slip["department"], "Finance");
        assert_eq!(with_slip["net_salary"], json!(3900.5));
        assert_eq!(with_slip["pay_date"], "2025-01-31");
        assert_eq!(with_slip["payslip_generated"], true);
        assert_eq!(with_slip["payslip_pdf"], format!("/api/payslip/{slip}"));

        let without = rows.iter().find(|r| r["payroll_id"] != paid).unwrap();
        assert_eq!(without["payslip_generated"], false);
        assert_eq!(without["payslip_pdf"], Value::Null);
    }
}
