use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::core::{ChatClient, ChatRequest};
use crate::error::AIError;

/// A scripted reply for [`MockClient`].
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(String),
}

/// Shared control surface for a [`MockClient`]: queue replies, inspect requests.
#[derive(Debug, Default)]
pub struct MockHandle {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockHandle {
    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        let mut queue = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        queue.extend(responses);
    }

    /// Every request the client received, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn next(&self, request: ChatRequest) -> Option<MockResponse> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).push(request);
        self.responses.lock().unwrap_or_else(|e| e.into_inner()).pop_front()
    }
}

/// Mock client for testing that replays queued responses in order.
///
/// An empty queue yields an error, so a test that forgets to script a reply
/// exercises the failure path rather than hanging.
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (Self { handle: handle.clone() }, handle)
    }

    pub fn with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let (client, handle) = Self::new();
        handle.add_responses(responses);
        (client, handle)
    }
}

#[async_trait]
impl ChatClient for MockClient {
    async fn ask_raw(&self, request: ChatRequest) -> Result<String, AIError> {
        match self.handle.next(request) {
            Some(MockResponse::Success(text)) => Ok(text),
            Some(MockResponse::Error(detail)) => Err(AIError::Mock(detail)),
            None => Err(AIError::Mock("no scripted response left".to_string())),
        }
    }

    fn clone_box(&self) -> Box<dyn ChatClient> {
        Box::new(self.clone())
    }
}
