//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: inventory store + access gate construction
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use printstock_infra::StockError;

use crate::config::Config;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Seeds the stock snapshot if none exists yet.
pub fn build_app(config: &Config) -> Result<Router, StockError> {
    let services = Arc::new(services::build_services(config)?);

    let api = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn(middleware::session_middleware));

    let mut app = Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", api);

    if let Some(dir) = &config.static_dir {
        app = app
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .route_service("/admin", ServeFile::new(dir.join("admin.html")))
            .fallback_service(ServeDir::new(dir));
    }

    Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
}
