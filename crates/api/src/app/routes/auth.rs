use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::Value;

use printstock_auth::AuthError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;
use crate::middleware::{clear_session_cookie, session_cookie};

/// Log in as staff or admin. Any session the caller already holds is revoked
/// and replaced by a fresh one.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let Some(body) = dto::LoginRequest::from_json(&dto::json_body(body)) else {
        tracing::warn!("login rejected: role and password must be strings");
        return errors::auth_error_to_response(AuthError::InvalidCredential);
    };

    let fresh = match services.gate.authenticate(&body.role, &body.password, Utc::now()) {
        Ok(s) => s,
        Err(e) => return errors::auth_error_to_response(e),
    };

    if let Some(previous) = session.session_id() {
        services.gate.logout(previous);
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&fresh.id, services.gate.ttl()))],
        Json(dto::LoginResponse::from(&fresh)),
    )
        .into_response()
}

pub async fn auth_state(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    let current = services.gate.current(session.session_id(), Utc::now());
    Json(dto::AuthStateResponse::from_session(current.as_ref()))
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    if let Some(id) = session.session_id() {
        services.gate.logout(id);
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(dto::SuccessResponse::ok()),
    )
}
