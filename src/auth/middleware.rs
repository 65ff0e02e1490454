use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;
use actix_web::middleware::Next;
use actix_web::{
    Error, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use tracing::debug;

/// Bearer-token gate for the API scope. A no-op unless `REQUIRE_AUTH` is set.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    if !config.require_auth {
        return next.call(req).await;
    }

    let token = match req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        Some(t) => t,
        None => {
            let resp = ApiError::Unauthorized("Missing bearer token".into()).error_response();
            return Ok(req.into_response(resp));
        }
    };

    match verify_token(token, &config.jwt_secret) {
        Ok(claims) => {
            debug!(user_id = claims.user_id, role = %claims.role, "Bearer token accepted");
            next.call(req).await
        }
        Err(e) => {
            debug!(error = %e, "Bearer token rejected");
            let resp = ApiError::Unauthorized("Invalid or expired token".into()).error_response();
            Ok(req.into_response(resp))
        }
    }
}
