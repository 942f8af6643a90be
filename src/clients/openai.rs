pub mod models;

use crate::config::KeyFromEnv;
use crate::core::{ChatClient, ChatRequest};
use crate::error::{AIError, OpenAIError};
use async_trait::async_trait;
use models::OpenAIModel;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    // Refusals come back with a null content
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: OpenAIModel,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: OpenAIClient::find_key().unwrap_or_default(),
            model: OpenAIModel::default(),
            temperature: 0.2,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct OpenAIClient {
    config: OpenAIConfig,
    http: Client,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key
        f.debug_struct("OpenAIClient")
            .field("model", &self.config.model.id())
            .finish()
    }
}

impl KeyFromEnv for OpenAIClient {
    const KEY_NAME: &'static str = "OPENAI_API_KEY";
}

impl OpenAIClient {
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::OpenAI(OpenAIError::Http(e.to_string())))?;
        info!(model = %config.model.id(), "Creating new OpenAI client");
        Ok(Self { config, http })
    }

    fn request_body<'a>(&'a self, request: &'a ChatRequest) -> OpenAIRequest<'a> {
        OpenAIRequest {
            model: self.config.model.id(),
            messages: vec![
                OpenAIMessage { role: "system", content: &request.system },
                OpenAIMessage { role: "user", content: &request.user },
            ],
            temperature: self
                .config
                .model
                .supports_temperature()
                .then_some(self.config.temperature),
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    #[instrument(skip(self, request), fields(user_len = request.user.len(), model = %self.config.model.id()))]
    async fn ask_raw(&self, request: ChatRequest) -> Result<String, AIError> {
        if self.config.api_key.is_empty() {
            error!("No OpenAI API key configured");
            return Err(AIError::OpenAI(OpenAIError::Authentication));
        }

        let body = self.request_body(&request);
        debug!("Sending request to OpenAI API");
        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                AIError::OpenAI(OpenAIError::Http(e.to_string()))
            })?;

        debug!(status = %response.status(), "Received response from OpenAI API");

        if response.status() == 429 {
            warn!("OpenAI API rate limit exceeded");
            return Err(AIError::OpenAI(OpenAIError::RateLimit));
        }

        if response.status() == 401 {
            error!("OpenAI API authentication failed");
            return Err(AIError::OpenAI(OpenAIError::Authentication));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "OpenAI API error");
            return Err(AIError::OpenAI(OpenAIError::Api(error_text)));
        }

        let parsed: OpenAIResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse OpenAI response JSON");
            AIError::OpenAI(OpenAIError::Http(e.to_string()))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                error!("No content in OpenAI response");
                AIError::OpenAI(OpenAIError::Api("No choices in response".to_string()))
            })?;

        info!(response_len = content.len(), "Successfully received OpenAI response");
        Ok(content)
    }

    fn clone_box(&self) -> Box<dyn ChatClient> {
        Box::new(self.clone())
    }
}
