//! 消息控制台 Web 服务
//!
//! 为上游消息 API 提供浏览器界面：
//! - 测试数据库连接
//! - 保存文本消息并自动刷新列表
//! - 展示消息列表

pub mod client;
pub mod controller;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod state;
pub mod view;

use axum::{middleware, routing::get, Json, Router};
use common::middleware::request_id::request_id_middleware;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use state::AppState;

pub const SERVICE_NAME: &str = "web-console";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "消息控制台",
        version = "0.1.0",
        description = "上游消息 API 的 Web 控制台"
    ),
    paths(
        handlers::index,
        handlers::test_connection,
        handlers::save_message,
        handlers::load_messages,
        handlers::health_check,
    ),
    components(schemas(
        handlers::SaveMessageForm,
        handlers::HealthResponse,
    )),
    tags(
        (name = "console", description = "控制台页面"),
        (name = "health", description = "健康检查端点")
    )
)]
pub struct ApiDoc;

/// 创建控制台路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
