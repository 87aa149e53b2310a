use axum::{
    routing::{get, post, put},
    Router,
};

pub mod auth;
pub mod stock;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/auth", get(auth::auth_state))
        .route("/logout", post(auth::logout))
        .route("/stock", get(stock::get_all).put(stock::set_item))
        .route("/stock/bulk", put(stock::set_size_group))
        .route("/stock/:font/:kit", get(stock::get_subtree))
}
