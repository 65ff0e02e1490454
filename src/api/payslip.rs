use actix_web::{
    HttpResponse,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web,
};
use tracing::{debug, error};

use crate::{
    error::ApiError,
    store::PayrollStore,
};

/// Download a stored payslip PDF
#[utoipa::path(
    get,
    path = "/api/payslip/{payslip_id}",
    params(
        ("payslip_id" = i32, Path, description = "Payslip ID")
    ),
    responses(
        (status = 200, description = "Payslip document", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Payslip not found", body = ErrorBody, example = json!({
            "message": "Payslip not found"
        })),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Payroll"
)]
pub async fn download_payslip(
    store: web::Data<dyn PayrollStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let payslip_id = path.into_inner();

    let pdf = store.payslip_pdf(payslip_id).await.map_err(|e| {
        error!(error = %e, payslip_id, "Failed to fetch payslip");
        ApiError::from(e)
    })?;

    let Some(pdf) = pdf else {
        return Err(ApiError::NotFound("Payslip not found".into()));
    };

    debug!(payslip_id, bytes = pdf.len(), "Serving payslip");
    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(format!("payslip_{payslip_id}.pdf"))],
        })
        .body(pdf))
}
