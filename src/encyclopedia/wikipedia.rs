use super::{Article, EncyclopediaService, PageLookup};
use crate::error::EncyclopediaError;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const USER_AGENT: &str = concat!(
    "wiki-navigator/",
    env!("CARGO_PKG_VERSION"),
    " (interactive summary and quiz tool)"
);

#[derive(Debug, Deserialize)]
struct ApiEnvelope<Q> {
    query: Option<Q>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    title: Option<String>,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    fullurl: Option<String>,
    extract: Option<String>,
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<PageLink>,
}

impl PageInfo {
    fn is_disambiguation(&self) -> bool {
        self.pageprops.as_ref().and_then(|p| p.disambiguation.as_ref()).is_some()
    }

    /// An existing article needs both a URL and non-empty text.
    fn into_article(self, requested: &str) -> Result<Article, EncyclopediaError> {
        let title = self.title.unwrap_or_else(|| requested.to_string());
        let url = self
            .fullurl
            .ok_or_else(|| EncyclopediaError::Response(format!("no URL for '{title}'")))?;
        let content = self
            .extract
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| EncyclopediaError::Response(format!("no article text for '{title}'")))?;
        Ok(Article { title, content, url })
    }
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PageLink {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
    searchinfo: Option<SearchInfo>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    suggestion: Option<String>,
}

/// Wikipedia over the MediaWiki action API (`formatversion=2` JSON).
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    endpoint: String,
    http: Client,
}

impl WikipediaClient {
    /// Client for the `language` edition, e.g. `de` → de.wikipedia.org.
    pub fn new(language: &str, timeout: Duration) -> Result<Self, EncyclopediaError> {
        Self::with_endpoint(format!("https://{}.wikipedia.org/w/api.php", language.trim()), timeout)
    }

    /// Client for any MediaWiki `api.php` endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, EncyclopediaError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| EncyclopediaError::Http(e.to_string()))?;
        let endpoint = endpoint.into();
        info!(endpoint = %endpoint, "Creating new Wikipedia client");
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query<Q: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<Q, EncyclopediaError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                EncyclopediaError::Http(e.to_string())
            })?;

        debug!(status = %response.status(), "Received response from MediaWiki API");

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "MediaWiki API error");
            return Err(EncyclopediaError::Api(format!("{status}: {error_text}")));
        }

        let envelope: ApiEnvelope<Q> = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse MediaWiki response JSON");
            EncyclopediaError::Response(e.to_string())
        })?;

        if let Some(err) = envelope.error {
            return Err(EncyclopediaError::Api(format!("{}: {}", err.code, err.info)));
        }
        envelope
            .query
            .ok_or_else(|| EncyclopediaError::Response("missing `query` object".to_string()))
    }

    async fn disambiguation_links(&self, title: &str) -> Result<Vec<String>, EncyclopediaError> {
        let query: PagesQuery = self
            .query(&[
                ("prop", "links"),
                ("titles", title),
                ("plnamespace", "0"),
                ("pllimit", "max"),
            ])
            .await?;
        let links = query
            .pages
            .into_iter()
            .next()
            .map(|page| page.links.into_iter().map(|link| link.title).collect())
            .unwrap_or_default();
        Ok(links)
    }

    async fn search_query(&self, query: &str, limit: usize, with_suggestion: bool) -> Result<SearchQuery, EncyclopediaError> {
        let limit = limit.max(1).to_string();
        let mut params = vec![
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("srprop", ""),
        ];
        if with_suggestion {
            params.push(("srinfo", "suggestion"));
        }
        self.query(&params).await
    }
}

#[async_trait]
impl EncyclopediaService for WikipediaClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn page(&self, title: &str) -> Result<PageLookup, EncyclopediaError> {
        let query: PagesQuery = self
            .query(&[
                ("prop", "info|pageprops|extracts"),
                ("inprop", "url"),
                ("ppprop", "disambiguation"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;

        let Some(page) = query.pages.into_iter().next() else {
            return Ok(PageLookup::Missing);
        };
        if page.missing || page.invalid {
            debug!("page missing");
            return Ok(PageLookup::Missing);
        }

        if page.is_disambiguation() {
            let resolved_title = page.title.as_deref().unwrap_or(title);
            debug!(title = %resolved_title, "disambiguation page");
            let links = self.disambiguation_links(resolved_title).await?;
            return Ok(PageLookup::Disambiguation(links));
        }

        page.into_article(title).map(PageLookup::Article)
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn suggest(&self, query: &str) -> Result<Option<String>, EncyclopediaError> {
        let result = self.search_query(query, 1, true).await?;
        let Some(suggestion) = result.searchinfo.and_then(|info| info.suggestion) else {
            return Ok(None);
        };
        debug!(suggestion = %suggestion, "spelling suggestion");

        // Suggestions are lower-cased search strings; the top hit for one is its canonical title
        let hit = self.search_query(&suggestion, 1, false).await?;
        Ok(Some(
            hit.search
                .into_iter()
                .next()
                .map(|h| h.title)
                .unwrap_or(suggestion),
        ))
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, EncyclopediaError> {
        let result = self.search_query(query, limit, false).await?;
        Ok(result.search.into_iter().take(limit).map(|h| h.title).collect())
    }
}
