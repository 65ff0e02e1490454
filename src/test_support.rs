//! Shared fixtures for the HTTP tests.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web::Data,
};

use crate::{config::Config, routes, store::PayrollStore, store::memory::MemoryStore};

pub const JWT_SECRET: &str = "test-secret";

pub fn config() -> Config {
    Config {
        database_url: "mysql://unused".into(),
        jwt_secret: JWT_SECRET.into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_ttl: 900,
        db_max_connections: 1,
        rate_login_per_min: 1000,
        rate_api_per_min: 1000,
        require_auth: false,
        run_migrations: false,
        log_dir: "logs".into(),
        log_level: tracing::Level::INFO,
    }
}

/// Rate limiting keys on the peer address, so every test request needs one.
pub fn peer() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 40000))
}

pub fn app(
    store: Arc<MemoryStore>,
    config: Config,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let store: Arc<dyn PayrollStore> = store;
    App::new()
        .app_data(Data::from(store))
        .app_data(Data::new(config.clone()))
        .configure(|cfg| routes::configure(cfg, &config))
}
