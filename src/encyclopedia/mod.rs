//! Encyclopedia access: the low-level lookup abstraction the topic resolver is
//! built on, with an HTTP implementation for Wikipedia and an in-memory fixture.

use crate::error::EncyclopediaError;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod mock;
pub mod wikipedia;

pub use mock::{EncyclopediaCall, MockEncyclopedia};
pub use wikipedia::WikipediaClient;

/// A single article as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub url: String,
}

/// What an exact title lookup found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    Article(Article),
    /// The title is a disambiguation page; these are the linked article titles
    Disambiguation(Vec<String>),
    Missing,
}

/// Low-level encyclopedia operations.
///
/// `page` never auto-corrects the title. Spelling correction is a separate,
/// explicit call so the resolver stays in control of retries.
#[async_trait]
pub trait EncyclopediaService: Send + Sync + Debug {
    async fn page(&self, title: &str) -> Result<PageLookup, EncyclopediaError>;

    /// "Did you mean" for `query`, as a canonical article title when the service has one.
    async fn suggest(&self, query: &str) -> Result<Option<String>, EncyclopediaError>;

    /// Ranked full-text search, at most `limit` titles.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, EncyclopediaError>;
}

#[async_trait]
impl<S: EncyclopediaService + ?Sized> EncyclopediaService for Box<S> {
    async fn page(&self, title: &str) -> Result<PageLookup, EncyclopediaError> {
        self.as_ref().page(title).await
    }

    async fn suggest(&self, query: &str) -> Result<Option<String>, EncyclopediaError> {
        self.as_ref().suggest(query).await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, EncyclopediaError> {
        self.as_ref().search(query, limit).await
    }
}

/// Upper-case the first character, the way MediaWiki normalizes titles.
pub fn capitalize_title(title: &str) -> String {
    let title = title.trim();
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
