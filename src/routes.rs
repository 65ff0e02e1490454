use crate::{
    api::{dashboard, employee, payroll, payslip},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
    error::json_error_handler,
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

/// Cross-origin requests are allowed from anywhere.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst are both at least one");
        Governor::new(&cfg)
    }

    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    // Public route
    cfg.service(
        web::resource("/api/login")
            .wrap(build_limiter(config.rate_login_per_min))
            .route(web::post().to(handlers::login)),
    );

    // Everything else, behind the optional bearer gate
    cfg.service(
        web::scope("/api")
            .wrap(from_fn(auth_middleware))
            .wrap(build_limiter(config.rate_api_per_min))
            .service(
                web::resource("/admin/dashboard").route(web::get().to(dashboard::dashboard)),
            )
            .service(
                web::resource("/admin/employees").route(web::get().to(employee::list_employees)),
            )
            .service(web::resource("/employees").route(web::post().to(employee::create_employee)))
            .service(
                web::resource("/employees/{employee_id}")
                    .route(web::delete().to(employee::delete_employee)),
            )
            .service(web::resource("/payroll").route(web::get().to(payroll::list_payrolls)))
            .service(
                web::resource("/payslip/{payslip_id}").route(web::get().to(payslip::download_payslip)),
            ),
    );
}

// LOGIN
//  └─ access_token (ACCESS_TOKEN_TTL)

// API REQUEST (REQUIRE_AUTH=true)
//  └─ Authorization: Bearer access_token
