//! HTTP client for the external generative service

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{classify_api_error, AppError, Result};
use crate::gateway::wire::{
    GenerateContentRequest, GenerateContentResponse, GenerateImagesRequest, GenerateImagesResponse,
};

/// Seam between the gateway and the external service. One implementation
/// talks HTTP; tests substitute canned responses.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Multimodal call: ordered text/image parts in, ordered parts out.
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Pure text-to-image call.
    async fn generate_images(
        &self,
        model: &str,
        request: GenerateImagesRequest,
    ) -> Result<GenerateImagesResponse>;

    /// Lightweight liveness/credential probe with an explicit key.
    async fn validate_api_key(&self, model: &str, key: &str) -> bool;
}

/// reqwest-backed implementation with a swappable bearer credential
pub struct HttpGenerativeClient {
    client: Client,
    base_url: String,
    api_key: RwLock<String>,
}

impl HttpGenerativeClient {
    pub fn new(config: &ApiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Backend(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: RwLock::new(api_key),
        })
    }

    /// Validate a candidate credential and, if usable, make it the active
    /// one. This is the in-session recovery path for quota/auth failures.
    pub async fn submit_new_key(&self, model: &str, key: &str) -> bool {
        if self.validate_api_key(model, key).await {
            *self.api_key.write() = key.to_string();
            debug!("Replaced API credential");
            true
        } else {
            false
        }
    }

    fn endpoint(&self, model: &str, verb: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, model, verb)
    }

    fn current_key(&self) -> String {
        self.api_key.read().clone()
    }

    async fn post_json<Req: serde::Serialize, Resp: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        key: &str,
        request: &Req,
    ) -> Result<Resp> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", key)
            .json(request)
            .send()
            .await
            .map_err(|e| classify_api_error(&format!("Connection failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(&format!("Backend returned {}: {}", status, body)));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl GenerativeBackend for HttpGenerativeClient {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model, "generateContent");
        debug!(model = %model, "Sending generateContent request");
        self.post_json(&url, &self.current_key(), &request).await
    }

    async fn generate_images(
        &self,
        model: &str,
        request: GenerateImagesRequest,
    ) -> Result<GenerateImagesResponse> {
        let url = self.endpoint(model, "predict");
        debug!(model = %model, "Sending predict request");
        self.post_json(&url, &self.current_key(), &request).await
    }

    async fn validate_api_key(&self, model: &str, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        let url = self.endpoint(model, "generateContent");
        let request = GenerateContentRequest::from_text("test");
        // Any failure means the key is not usable: invalid credential,
        // network trouble or an exhausted quota all read the same here.
        match self
            .post_json::<_, GenerateContentResponse>(&url, key, &request)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "API key validation failed");
                false
            }
        }
    }
}
