use actix_web::{HttpResponse, web};
use tracing::{debug, error, info, instrument};

use crate::{
    auth::{
        jwt::generate_access_token,
        password::{reject_at_full_cost, verify_password},
    },
    config::Config,
    error::ApiError,
    model::role::Role,
    models::{LoginReqDto, LoginResponse},
    store::PayrollStore,
};

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Invalid username or password", body = ErrorBody, example = json!({
            "message": "Invalid username or password"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    store: web::Data<dyn PayrollStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Invalid credentials: empty username or password");
        return Err(ApiError::InvalidCredentials);
    }

    debug!("Fetching user from database");

    let db_user = match store.find_user(&user.username).await {
        Ok(Some(found)) => {
            debug!(user_id = found.user_id, "User found");
            found
        }
        Ok(None) => {
            reject_at_full_cost(&user.password);
            info!("Invalid credentials: user not found");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return Err(e.into());
        }
    };

    if !verify_password(&user.password, &db_user.password) {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = generate_access_token(&db_user, &config.jwt_secret, config.access_token_ttl)
        .map_err(|e| {
            error!(error = %e, "Failed to sign access token");
            ApiError::Internal(e.to_string())
        })?;

    let dashboard_url = Role::dashboard_path(Role::from_name(&db_user.role));
    info!(role = %db_user.role, "Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        role: db_user.role,
        dashboard_url: dashboard_url.to_string(),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: config.access_token_ttl,
    }))
}
