use std::sync::Arc;

use crate::{
    backend::BackendClient,
    config::AppConfig,
    domain::{cart::CartState, dashboard::Dashboard},
    error::{AppError, AppResult},
    session::{SessionHub, SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: Option<BackendClient>,
    pub carts: SessionStore<CartState>,
    pub dashboards: SessionStore<Dashboard>,
    pub sessions: SessionHub,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let backend = config.backend.as_ref().map(BackendClient::new);
        Self {
            config: Arc::new(config),
            backend,
            carts: SessionStore::default(),
            dashboards: SessionStore::default(),
            sessions: SessionHub::new(),
        }
    }

    /// The backend client, or the configuration-missing condition.
    pub fn backend(&self) -> AppResult<&BackendClient> {
        self.backend.as_ref().ok_or(AppError::ConfigMissing)
    }
}
