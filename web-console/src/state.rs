//! Application state for the web console.

use std::sync::Arc;

use common::config::AppConfig;
use common::errors::{AppError, AppResult};
use common::middleware::RequestId;

use crate::client::HttpApiClient;
use crate::controller::{Controller, ControllerSettings};
use crate::render::Renderer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api_client: HttpApiClient,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let http_client = HttpApiClient::build_http_client(&config)
            .map_err(|e| AppError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_client: HttpApiClient::new(config.api_endpoint.clone(), http_client),
            renderer: Arc::new(Renderer::new()?),
            config,
        })
    }

    /// Controller bound to one console request.
    pub fn controller(&self, request_id: RequestId) -> Controller<HttpApiClient> {
        Controller::new(
            self.api_client.with_request_id(request_id),
            ControllerSettings::from(&self.config),
        )
    }
}
