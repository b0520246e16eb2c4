//! 消息控制台服务入口

use anyhow::Context;
use common::config::{load_dotenv, AppConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use web_console::state::AppState;
use web_console::{create_router, SERVICE_NAME};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME).context("加载配置失败")?;

    // 创建应用状态
    let state = AppState::new(config.clone()).context("初始化应用状态失败")?;

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = config.listen_addr();
    info!(
        service = SERVICE_NAME,
        address = %addr,
        api_endpoint = %config.api_endpoint,
        reload_delay_ms = config.reload_delay.as_millis() as u64,
        "启动消息控制台"
    );

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {}", addr))?;
    axum::serve(listener, app).await.context("服务启动失败")?;
    Ok(())
}
