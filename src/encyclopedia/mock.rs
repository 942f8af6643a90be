use super::{Article, EncyclopediaService, PageLookup};
use crate::error::EncyclopediaError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One recorded call against a [`MockEncyclopedia`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncyclopediaCall {
    Page(String),
    Suggest(String),
    Search(String),
}

/// In-memory encyclopedia fixture. Titles match exactly, like a lookup with
/// auto-correction disabled. Clones share the call log.
#[derive(Debug, Clone, Default)]
pub struct MockEncyclopedia {
    articles: HashMap<String, Article>,
    disambiguations: HashMap<String, Vec<String>>,
    suggestions: HashMap<String, String>,
    search_results: HashMap<String, Vec<String>>,
    /// Calls beyond this many fail as if the network were down
    fail_after: Option<usize>,
    calls: Arc<Mutex<Vec<EncyclopediaCall>>>,
}

impl MockEncyclopedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an article; its URL follows the de.wikipedia.org layout.
    #[must_use]
    pub fn with_article(mut self, title: &str, content: &str) -> Self {
        let url = format!("https://de.wikipedia.org/wiki/{}", title.replace(' ', "_"));
        self.articles.insert(
            title.to_string(),
            Article { title: title.to_string(), content: content.to_string(), url },
        );
        self
    }

    #[must_use]
    pub fn with_disambiguation(mut self, title: &str, options: &[&str]) -> Self {
        self.disambiguations
            .insert(title.to_string(), options.iter().map(|s| s.to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, query: &str, suggestion: &str) -> Self {
        self.suggestions.insert(query.to_string(), suggestion.to_string());
        self
    }

    #[must_use]
    pub fn with_search_results(mut self, query: &str, titles: &[&str]) -> Self {
        self.search_results
            .insert(query.to_string(), titles.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Every call fails as if the network were down.
    #[must_use]
    pub fn unavailable(self) -> Self {
        self.unavailable_after(0)
    }

    /// The first `calls` calls behave normally, every later one fails.
    #[must_use]
    pub fn unavailable_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    pub fn calls(&self) -> Vec<EncyclopediaCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn record(&self, call: EncyclopediaCall) -> Result<(), EncyclopediaError> {
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        calls.push(call);
        match self.fail_after {
            Some(limit) if calls.len() > limit => Err(EncyclopediaError::Http("connection refused".to_string())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl EncyclopediaService for MockEncyclopedia {
    async fn page(&self, title: &str) -> Result<PageLookup, EncyclopediaError> {
        self.record(EncyclopediaCall::Page(title.to_string()))?;
        if let Some(article) = self.articles.get(title) {
            return Ok(PageLookup::Article(article.clone()));
        }
        if let Some(options) = self.disambiguations.get(title) {
            return Ok(PageLookup::Disambiguation(options.clone()));
        }
        Ok(PageLookup::Missing)
    }

    async fn suggest(&self, query: &str) -> Result<Option<String>, EncyclopediaError> {
        self.record(EncyclopediaCall::Suggest(query.to_string()))?;
        Ok(self.suggestions.get(query).cloned())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, EncyclopediaError> {
        self.record(EncyclopediaCall::Search(query.to_string()))?;
        Ok(self
            .search_results
            .get(query)
            .map(|titles| titles.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
