//! 上游消息 API 客户端

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use common::config::AppConfig;
use common::errors::RequestError;
use common::middleware::{RequestId, REQUEST_ID_HEADER};
use common::models::{ConnectionInfo, Message, MessageList, SaveMessageRequest, SavedMessage};
use common::response::Envelope;

pub const TEST_CONNECTION_PATH: &str = "/api/test-connection";
pub const MESSAGES_PATH: &str = "/api/messages";

/// 上游消息 API Trait
#[async_trait]
pub trait MessageApi: Send + Sync {
    /// 测试数据库连接
    async fn test_connection(&self) -> Result<ConnectionInfo, RequestError>;

    /// 保存消息
    async fn save_message(&self, req: &SaveMessageRequest) -> Result<SavedMessage, RequestError>;

    /// 列出全部消息
    async fn list_messages(&self) -> Result<Vec<Message>, RequestError>;
}

/// 基于 reqwest 的上游 API 客户端
#[derive(Clone)]
pub struct HttpApiClient {
    api_endpoint: String,
    http_client: reqwest::Client,
    request_id: Option<RequestId>,
}

impl HttpApiClient {
    /// 创建新的客户端实例
    pub fn new(api_endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            http_client,
            request_id: None,
        }
    }

    /// 按配置构建 reqwest 客户端
    pub fn build_http_client(config: &AppConfig) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
    }

    /// 返回携带请求 ID 的副本，ID 会转发给上游
    pub fn with_request_id(&self, request_id: RequestId) -> Self {
        Self {
            request_id: Some(request_id),
            ..self.clone()
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_endpoint, path)
    }

    /// 发送请求并解析响应信封
    ///
    /// HTTP 状态码不参与判断，只看信封中的 `success` 字段。
    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, RequestError> {
        let builder = match &self.request_id {
            Some(id) => builder.header(REQUEST_ID_HEADER.clone(), id.as_str()),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "上游请求发送失败");
            RequestError::Transport(e.to_string())
        })?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "读取上游响应失败");
            RequestError::Transport(e.to_string())
        })?;

        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(%url, status = status.as_u16(), error = %e, "上游返回无效响应");
            RequestError::Decode(format!("Invalid response from API (HTTP {}): {}", status.as_u16(), e))
        })?;

        tracing::debug!(%url, status = status.as_u16(), success = envelope.success, "上游响应");
        envelope.into_result()
    }
}

#[async_trait]
impl MessageApi for HttpApiClient {
    async fn test_connection(&self) -> Result<ConnectionInfo, RequestError> {
        self.send(self.http_client.get(self.url(TEST_CONNECTION_PATH)))
            .await
    }

    async fn save_message(&self, req: &SaveMessageRequest) -> Result<SavedMessage, RequestError> {
        self.send(self.http_client.post(self.url(MESSAGES_PATH)).json(req))
            .await
    }

    async fn list_messages(&self) -> Result<Vec<Message>, RequestError> {
        let list: MessageList = self.send(self.http_client.get(self.url(MESSAGES_PATH))).await?;
        list.messages.ok_or_else(|| {
            RequestError::Decode("Invalid response from API: missing `messages`".to_string())
        })
    }
}
