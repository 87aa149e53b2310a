use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use printstock_infra::{FileSnapshotStore, InventoryStore, StockError};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz::{authorize_operation, StockOperation};
use crate::context::SessionContext;

/// Run a store call on the blocking pool; snapshot IO is synchronous.
async fn with_store<T, F>(services: &Arc<AppServices>, f: F) -> Result<T, StockError>
where
    F: FnOnce(&InventoryStore<FileSnapshotStore>) -> Result<T, StockError> + Send + 'static,
    T: Send + 'static,
{
    let services = Arc::clone(services);
    tokio::task::spawn_blocking(move || f(&services.inventory))
        .await
        .unwrap_or_else(|e| Err(StockError::Storage(format!("stock task failed: {e}"))))
}

pub async fn get_all(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    if let Err(e) = authorize_operation(&services.gate, &session, &StockOperation::ReadAll) {
        return errors::authz_error_to_response(e);
    }

    match with_store(&services, |store| store.load_all()).await {
        Ok(tree) => (StatusCode::OK, Json(tree)).into_response(),
        Err(e) => errors::stock_error_to_response(e),
    }
}

pub async fn get_subtree(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path((font, kit)): Path<(String, String)>,
) -> axum::response::Response {
    if let Err(e) = authorize_operation(&services.gate, &session, &StockOperation::ReadSubtree) {
        return errors::authz_error_to_response(e);
    }

    match with_store(&services, move |store| store.load_subtree(&font, &kit)).await {
        Ok(kit_stock) => (StatusCode::OK, Json(kit_stock)).into_response(),
        Err(e) => errors::stock_error_to_response(e),
    }
}

// Write bodies are interpreted only after the role check, so an anonymous or
// staff caller is refused the same way whatever it sent.

pub async fn set_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = authorize_operation(&services.gate, &session, &StockOperation::SetItem) {
        return errors::authz_error_to_response(e);
    }

    let req = dto::SetItemRequest::from_json(&dto::json_body(body));
    let result = with_store(&services, move |store| {
        store.set_item(&req.font, &req.kit, &req.category, &req.size, &req.item, &req.status)
    })
    .await;

    match result {
        Ok(()) => (StatusCode::OK, Json(dto::SuccessResponse::ok())).into_response(),
        Err(e) => errors::stock_error_to_response(e),
    }
}

pub async fn set_size_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = authorize_operation(&services.gate, &session, &StockOperation::SetSizeGroup) {
        return errors::authz_error_to_response(e);
    }

    let req = dto::SetSizeGroupRequest::from_json(&dto::json_body(body));
    let result = with_store(&services, move |store| {
        store.set_size_group(&req.font, &req.kit, &req.category, &req.size, &req.status)
    })
    .await;

    match result {
        Ok(()) => (StatusCode::OK, Json(dto::SuccessResponse::ok())).into_response(),
        Err(e) => errors::stock_error_to_response(e),
    }
}
