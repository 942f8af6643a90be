use crate::clients::mock::{MockClient, MockHandle, MockResponse};
use crate::clients::openai::{OpenAIClient, OpenAIConfig};
use crate::core::{ChatClient, ChatRequest};
use crate::error::AIError;
use async_trait::async_trait;
use std::sync::Arc;

/// Which generative backend to construct at startup.
///
/// `Mock` is only ever chosen explicitly; a missing key surfaces as an
/// authentication failure from the real client instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientType {
    #[default]
    OpenAI,
    Mock,
}

impl std::str::FromStr for ClientType {
    type Err = String;

    /// Parse client type from string (case insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown client type: '{}'. Supported: openai, mock", s)),
        }
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::OpenAI => write!(f, "OpenAI"),
            ClientType::Mock => write!(f, "Mock"),
        }
    }
}

/// Flexible client that wraps any ChatClient behind one concrete type
#[derive(Debug, Clone)]
pub struct FlexibleClient {
    inner: Arc<dyn ChatClient>,
}

impl FlexibleClient {
    /// Create a new FlexibleClient wrapping the given client
    pub fn new(client: Box<dyn ChatClient>) -> Self {
        Self { inner: Arc::from(client) }
    }

    /// Create a FlexibleClient with an OpenAI client
    pub fn openai(config: OpenAIConfig) -> Result<Self, AIError> {
        Ok(Self::new(Box::new(OpenAIClient::new(config)?)))
    }

    /// Create a FlexibleClient with a mock and return the handle for configuration
    pub fn mock() -> (Self, Arc<MockHandle>) {
        let (mock_client, handle) = MockClient::new();
        (Self::new(Box::new(mock_client)), handle)
    }

    /// Create a FlexibleClient mock with predefined responses
    pub fn new_mock_with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let (mock_client, handle) = MockClient::with_responses(responses);
        (Self::new(Box::new(mock_client)), handle)
    }
}

#[async_trait]
impl ChatClient for FlexibleClient {
    async fn ask_raw(&self, request: ChatRequest) -> Result<String, AIError> {
        self.inner.ask_raw(request).await
    }

    fn clone_box(&self) -> Box<dyn ChatClient> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_client_type_case_insensitively() {
        assert_eq!("OpenAI".parse::<ClientType>().unwrap(), ClientType::OpenAI);
        assert_eq!("mock".parse::<ClientType>().unwrap(), ClientType::Mock);
        assert!("claude".parse::<ClientType>().is_err());
    }

    #[test]
    fn default_backend_is_openai_even_without_a_key() {
        assert_eq!(ClientType::default(), ClientType::OpenAI);
    }

    #[tokio::test]
    async fn keyless_openai_client_reports_authentication_failure() {
        let client = FlexibleClient::openai(OpenAIConfig {
            api_key: String::new(),
            ..OpenAIConfig::default()
        })
        .unwrap();

        let err = client.ask_raw(ChatRequest::new("s", "u")).await.unwrap_err();

        assert!(matches!(err, AIError::OpenAI(crate::error::OpenAIError::Authentication)));
    }

    #[tokio::test]
    async fn clones_share_the_mock_queue() {
        let (client, handle) = FlexibleClient::new_mock_with_responses(vec![
            MockResponse::Success("a".into()),
            MockResponse::Success("b".into()),
        ]);
        let other = client.clone();

        assert_eq!(client.ask_raw(ChatRequest::new("s", "u")).await.unwrap(), "a");
        assert_eq!(other.ask_raw(ChatRequest::new("s", "u")).await.unwrap(), "b");
        assert_eq!(handle.call_count(), 2);
    }
}
