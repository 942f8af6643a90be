//! Core service abstractions: the chat-style completion client that the
//! summary and quiz requesters are built on, plus small text helpers shared by
//! both.
//!
//! Every requester receives its client at construction time; nothing in this
//! crate reaches for a global client.

use crate::error::AIError;
use async_trait::async_trait;
use std::fmt::Debug;

/// One chat completion request: a fixed system instruction and the user payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self { system: system.into(), user: user.into() }
    }
}

/// Low-level generative text client.
///
/// Implementors execute a single request and return the text of the first
/// completion. Interpreting that text (free prose or a structured payload) is
/// up to the caller.
#[async_trait]
pub trait ChatClient: Send + Sync + Debug {
    /// The only method that implementations must provide
    async fn ask_raw(&self, request: ChatRequest) -> Result<String, AIError>;

    /// Clone this client into a boxed trait object
    fn clone_box(&self) -> Box<dyn ChatClient>;
}

impl Clone for Box<dyn ChatClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl ChatClient for Box<dyn ChatClient> {
    async fn ask_raw(&self, request: ChatRequest) -> Result<String, AIError> {
        self.as_ref().ask_raw(request).await
    }

    fn clone_box(&self) -> Box<dyn ChatClient> {
        self.as_ref().clone_box()
    }
}

/// Return the first `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
