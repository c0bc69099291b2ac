use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::info;

use crate::canned;
use crate::client::{GeminiBackend, GenerationBackend, GenerationClient};
use crate::config::WebCheckConfig;
use crate::error::{Result, WebCheckError};
use crate::model::TestSuite;
use crate::orchestrator::{self, RunProgress};
use crate::service::WebCheck;
use crate::settings;

pub type SharedState = Arc<AppState>;

/// Builds the backend for a given credential. Swapped out in tests.
pub type BackendFactory = Box<dyn Fn(Option<&str>) -> Arc<dyn GenerationBackend> + Send + Sync>;

pub struct AppState {
    pub config: WebCheckConfig,
    pub credential: RwLock<CredentialState>,
    pub service: RwLock<Arc<WebCheck>>,
    pub suites: RwLock<Vec<TestSuite>>,
    pub run_progress: watch::Sender<RunProgress>,
    backend_factory: BackendFactory,
}

pub struct CredentialState {
    pub api_key: Option<String>,
}

impl AppState {
    /// State backed by the Gemini REST API.
    pub fn new(config: WebCheckConfig, api_key: Option<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(4)
            .build()
            .expect("Failed to create HTTP client");
        let api_base = config.api_base.clone();
        let factory: BackendFactory = Box::new(move |key: Option<&str>| -> Arc<dyn GenerationBackend> {
            Arc::new(GeminiBackend::new(
                http_client.clone(),
                api_base.clone(),
                key.unwrap_or_default(),
            ))
        });
        Self::with_backend_factory(config, api_key, factory)
    }

    pub fn with_backend_factory(
        config: WebCheckConfig,
        api_key: Option<String>,
        backend_factory: BackendFactory,
    ) -> Self {
        let service = build_service(&config, &backend_factory, api_key.as_deref());
        let (run_progress, _) = orchestrator::progress_channel();
        Self {
            config,
            credential: RwLock::new(CredentialState { api_key }),
            service: RwLock::new(service),
            suites: RwLock::new(canned::sample_suites()),
            run_progress,
            backend_factory,
        }
    }

    pub async fn service(&self) -> Arc<WebCheck> {
        self.service.read().await.clone()
    }

    pub async fn has_api_key(&self) -> bool {
        self.credential.read().await.api_key.is_some()
    }

    /// Persist a new key and rebuild the client around it.
    pub async fn set_api_key(&self, key: &str) -> Result<()> {
        // Lock order: credential, then service. The credential lock also
        // serializes writes to the settings file.
        let mut credential = self.credential.write().await;
        let path = self.config.settings_path();
        let key = settings::save_api_key(&path, key)?;

        let service = build_service(&self.config, &self.backend_factory, Some(&key));
        let mut current = self.service.write().await;
        credential.api_key = Some(key);
        *current = service;
        info!("API key updated, generation client rebuilt");
        Ok(())
    }

    pub async fn find_suite(&self, id: &str) -> Result<TestSuite> {
        self.suites
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| WebCheckError::SuiteNotFound(id.to_string()))
    }

    pub async fn add_suite(&self, suite: TestSuite) {
        self.suites.write().await.push(suite);
    }
}

fn build_service(
    config: &WebCheckConfig,
    factory: &BackendFactory,
    api_key: Option<&str>,
) -> Arc<WebCheck> {
    let backend = factory(api_key);
    let client = GenerationClient::new(backend, config.models());
    Arc::new(WebCheck::with_canned_delay(client, config.canned_run_delay))
}
