use axum::{extract::rejection::JsonRejection, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use printstock_auth::Session;

// -------------------------
// Request DTOs
// -------------------------
//
// Bodies are taken as raw JSON and read field by field, so a wrong type fails
// the same status/path/credential checks as any other bad value. Path
// segments accept strings, numbers and booleans in their text form; `status`,
// `role` and `password` must be strings. Anything else reads as empty.

/// The request body as JSON, or `null` when it is missing or unparsable.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable request body");
            Value::Null
        }
    }
}

fn text(body: &Value, key: &str) -> Option<String> {
    body.get(key)?.as_str().map(str::to_string)
}

fn segment(body: &Value, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

#[derive(Debug)]
pub struct LoginRequest {
    pub role: String,
    pub password: String,
}

impl LoginRequest {
    /// `None` unless both `role` and `password` are strings.
    pub fn from_json(body: &Value) -> Option<Self> {
        Some(Self {
            role: text(body, "role")?,
            password: text(body, "password")?,
        })
    }
}

#[derive(Debug)]
pub struct SetItemRequest {
    pub font: String,
    pub kit: String,
    pub category: String,
    pub size: String,
    pub item: String,
    pub status: String,
}

impl SetItemRequest {
    pub fn from_json(body: &Value) -> Self {
        Self {
            font: segment(body, "font"),
            kit: segment(body, "kit"),
            category: segment(body, "category"),
            size: segment(body, "size"),
            item: segment(body, "item"),
            status: text(body, "status").unwrap_or_default(),
        }
    }
}

#[derive(Debug)]
pub struct SetSizeGroupRequest {
    pub font: String,
    pub kit: String,
    pub category: String,
    pub size: String,
    pub status: String,
}

impl SetSizeGroupRequest {
    pub fn from_json(body: &Value) -> Self {
        Self {
            font: segment(body, "font"),
            kit: segment(body, "kit"),
            category: segment(body, "category"),
            size: segment(body, "size"),
            status: text(body, "status").unwrap_or_default(),
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub role: String,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for LoginResponse {
    fn from(session: &Session) -> Self {
        Self {
            success: true,
            role: session.role.as_str().to_string(),
            session_id: session.id.to_string(),
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthStateResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthStateResponse {
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(s) => Self {
                authenticated: true,
                role: Some(s.role.as_str().to_string()),
                expires_at: Some(s.expires_at),
            },
            None => Self {
                authenticated: false,
                role: None,
                expires_at: None,
            },
        }
    }
}
