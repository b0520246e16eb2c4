//! Handler模块

use axum::{
    extract::{Extension, State},
    response::Html,
    Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::errors::AppResult;
use common::middleware::RequestId;

use crate::state::AppState;
use crate::view::PageView;

/// 控制台首页
#[utoipa::path(
    get,
    path = "/",
    tag = "console",
    responses(
        (status = 200, description = "控制台页面", content_type = "text/html", body = String)
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state, &PageView::default())
}

/// 测试上游数据库连接
#[utoipa::path(
    get,
    path = "/test-connection",
    tag = "console",
    responses(
        (status = 200, description = "带有连接测试结果的页面", content_type = "text/html", body = String)
    )
)]
pub async fn test_connection(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Html<String>> {
    let mut page = PageView::default();
    state.controller(request_id).test_connection(&mut page).await;
    render(&state, &page)
}

/// 保存消息
#[utoipa::path(
    post,
    path = "/messages",
    tag = "console",
    request_body(content = SaveMessageForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "带有保存结果的页面", content_type = "text/html", body = String)
    )
)]
pub async fn save_message(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<SaveMessageForm>,
) -> AppResult<Html<String>> {
    let mut page = PageView::with_input(form.text.clone());
    state
        .controller(request_id)
        .save_message(&mut page, &form.text)
        .await;
    render(&state, &page)
}

/// 加载消息列表
#[utoipa::path(
    get,
    path = "/messages",
    tag = "console",
    responses(
        (status = 200, description = "带有消息列表的页面", content_type = "text/html", body = String)
    )
)]
pub async fn load_messages(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Html<String>> {
    let mut page = PageView::default();
    state.controller(request_id).load_messages(&mut page).await;
    render(&state, &page)
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        api_endpoint: state.config.api_endpoint.clone(),
    })
}

fn render(state: &AppState, page: &PageView) -> AppResult<Html<String>> {
    state.renderer.render_page(page).map(Html)
}

/// 保存消息表单
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveMessageForm {
    /// 输入框中的原始文本
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub api_endpoint: String,
}
