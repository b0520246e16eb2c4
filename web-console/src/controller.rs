//! 控制台控制器
//!
//! 每个操作发出一次上游请求，并把成功或失败状态写入页面区域。
//! 失败只做展示，不重试。

use std::time::Duration;

use validator::Validate;

use common::config::AppConfig;
use common::errors::RequestError;
use common::models::{ConnectionInfo, Message, SaveMessageRequest};
use common::utils::TimestampFormat;

use crate::client::MessageApi;
use crate::view::{MessagePanel, MessageRow, ResultPanel, View};

pub const TESTING_TEXT: &str = "Testing connection to the database...";
pub const SAVING_TEXT: &str = "Saving to database...";
pub const EMPTY_INPUT_TEXT: &str = "Please enter a message";
pub const LIST_FAILED_TEXT: &str = "Error loading messages";
const MISSING_FIELD: &str = "unknown";

/// 控制器设置
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// 保存成功后重新加载列表前的等待时间
    pub reload_delay: Duration,
    /// 时间戳展示格式
    pub timestamp_format: TimestampFormat,
}

impl From<&AppConfig> for ControllerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            reload_delay: config.reload_delay,
            timestamp_format: config.timestamp_format.clone(),
        }
    }
}

/// 控制台控制器
pub struct Controller<A> {
    api: A,
    settings: ControllerSettings,
}

impl<A: MessageApi> Controller<A> {
    /// 创建新的控制器实例
    pub fn new(api: A, settings: ControllerSettings) -> Self {
        Self { api, settings }
    }

    /// 测试数据库连接
    pub async fn test_connection<V: View>(&self, view: &mut V) {
        view.show_result(ResultPanel::pending(TESTING_TEXT));

        let panel = match self.api.test_connection().await {
            Ok(info) => {
                tracing::info!(database = ?info.database, host = ?info.host, "连接测试成功");
                connected_panel(info)
            }
            Err(e) => {
                tracing::warn!(error = %e, application = e.is_application(), "连接测试失败");
                ResultPanel::ConnectionFailed {
                    hint: e.is_transport(),
                    error: e.to_string(),
                }
            }
        };
        view.show_result(panel);
    }

    /// 保存消息，成功后延迟刷新消息列表
    pub async fn save_message<V: View>(&self, view: &mut V, input: &str) {
        let req = SaveMessageRequest::from_input(input);
        if req.validate().is_err() {
            view.show_result(ResultPanel::failed(EMPTY_INPUT_TEXT));
            return;
        }

        view.show_result(ResultPanel::pending(SAVING_TEXT));

        match self.api.save_message(&req).await {
            Ok(saved) => {
                let id = saved
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| MISSING_FIELD.to_string());
                tracing::info!(id = %id, "消息已保存");
                view.show_result(ResultPanel::Saved { id });
                view.clear_input();

                if !self.settings.reload_delay.is_zero() {
                    tokio::time::sleep(self.settings.reload_delay).await;
                }
                self.load_messages(view).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, application = e.is_application(), "消息保存失败");
                view.show_result(ResultPanel::failed(format!("Error: {}", e)));
            }
        }
    }

    /// 加载消息列表
    pub async fn load_messages<V: View>(&self, view: &mut V) {
        view.show_messages(MessagePanel::Loading);

        let panel = match self.api.list_messages().await {
            Ok(messages) if messages.is_empty() => MessagePanel::Empty,
            Ok(messages) => {
                tracing::debug!(count = messages.len(), "消息列表已加载");
                MessagePanel::List {
                    rows: self.to_rows(messages),
                }
            }
            Err(RequestError::Application(error)) => {
                tracing::warn!(%error, "上游拒绝列出消息");
                MessagePanel::Failed {
                    text: LIST_FAILED_TEXT.to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "消息列表加载失败");
                MessagePanel::Failed {
                    text: format!("Error: {}", e),
                }
            }
        };
        view.show_messages(panel);
    }

    fn to_rows(&self, messages: Vec<Message>) -> Vec<MessageRow> {
        messages
            .into_iter()
            .map(|m| MessageRow {
                time: self.settings.timestamp_format.format(&m.created_at),
                text: m.text,
            })
            .collect()
    }
}

fn connected_panel(info: ConnectionInfo) -> ResultPanel {
    let or_missing = |v: Option<String>| v.unwrap_or_else(|| MISSING_FIELD.to_string());
    ResultPanel::Connected {
        database: or_missing(info.database),
        host: or_missing(info.host),
        status: or_missing(info.message),
    }
}
