//! 路由模块

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/test-connection", get(handlers::test_connection))
        .route(
            "/messages",
            get(handlers::load_messages).post(handlers::save_message),
        )
        .route("/api/health", get(handlers::health_check))
}
