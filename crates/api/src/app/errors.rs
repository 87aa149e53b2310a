use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use printstock_auth::{AuthError, AuthzError};
use printstock_infra::StockError;

pub fn stock_error_to_response(err: StockError) -> axum::response::Response {
    match err {
        StockError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_status", msg),
        StockError::InvalidPath(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_path", msg),
        StockError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        StockError::Storage(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg)
        }
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    match err {
        AuthzError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", err.to_string())
        }
        AuthzError::InsufficientRole { .. } => {
            json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
        }
    }
}

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidCredential => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credential", "invalid password")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
