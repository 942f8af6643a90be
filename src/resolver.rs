//! Topic resolution: turn free-text input into exactly one article, a list of
//! candidates, or a service failure.
//!
//! A lookup is exact (no auto-correction). Only when it comes back ambiguous
//! or missing does the resolver consult the service's spelling suggestion, and
//! it follows that suggestion at most once.

use crate::encyclopedia::{capitalize_title, EncyclopediaService, PageLookup};
use tracing::{debug, info, instrument, warn};

/// Candidate lists never grow beyond this.
pub const MAX_CANDIDATES: usize = 5;
/// Original lookup plus one retry.
pub const MAX_ATTEMPTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Resolved { title: String, content: String, url: String },
    Ambiguous { candidates: Vec<String> },
    NotFound { candidates: Vec<String> },
    ServiceUnavailable { detail: String },
}

impl LookupOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Candidate titles for unresolved outcomes, empty otherwise.
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::Ambiguous { candidates } | Self::NotFound { candidates } => candidates,
            _ => &[],
        }
    }
}

/// Result of one lookup round.
enum Step {
    Done(LookupOutcome),
    Retry { outcome: LookupOutcome, next_title: String },
}

#[derive(Debug, Clone)]
pub struct TopicResolver<E: EncyclopediaService> {
    service: E,
}

impl<E: EncyclopediaService> TopicResolver<E> {
    pub fn new(service: E) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &E {
        &self.service
    }

    /// Resolve `topic`. Callers are expected to have rejected blank input already.
    #[instrument(target = "wiki_navigator::resolver", skip(self))]
    pub async fn resolve(&self, topic: &str) -> LookupOutcome {
        let mut title = topic.trim().to_string();
        let mut previous: Option<LookupOutcome> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            let may_retry = attempt < MAX_ATTEMPTS;
            debug!(attempt, title = %title, "lookup attempt");

            match self.attempt(&title, may_retry).await {
                Step::Done(outcome) => return Self::settle(outcome, previous),
                Step::Retry { outcome, next_title } => {
                    info!(from = %title, to = %next_title, "retrying with suggested title");
                    previous = Some(outcome);
                    title = next_title;
                }
            }
        }

        // Unreachable with MAX_ATTEMPTS >= 1: the last attempt never retries
        previous.unwrap_or(LookupOutcome::NotFound { candidates: Vec::new() })
    }

    /// Final outcome after a retry chain. An empty retry result falls back to
    /// the earlier outcome when that one had candidates to show; a failure on
    /// the retry is only masked by earlier ambiguity candidates.
    fn settle(outcome: LookupOutcome, previous: Option<LookupOutcome>) -> LookupOutcome {
        let Some(previous) = previous else {
            return outcome;
        };
        if previous.candidates().is_empty() {
            return outcome;
        }
        match outcome {
            LookupOutcome::ServiceUnavailable { detail } => {
                warn!(error = %detail, "retry failed, keeping earlier candidates");
                previous
            }
            unresolved @ (LookupOutcome::Ambiguous { .. } | LookupOutcome::NotFound { .. })
                if unresolved.candidates().is_empty() =>
            {
                previous
            }
            other => other,
        }
    }

    async fn attempt(&self, title: &str, may_retry: bool) -> Step {
        let lookup = match self.service.page(title).await {
            Ok(lookup) => lookup,
            Err(e) => return Step::Done(unavailable(e)),
        };

        match lookup {
            PageLookup::Article(article) => {
                info!(title = %article.title, "resolved");
                Step::Done(LookupOutcome::Resolved {
                    title: article.title,
                    content: article.content,
                    url: article.url,
                })
            }
            PageLookup::Disambiguation(links) => {
                // Ranked search hits beat the page's link list, which is alphabetical
                let candidates = match self.service.search(title, MAX_CANDIDATES).await {
                    Ok(mut ranked) if !ranked.is_empty() => {
                        ranked.truncate(MAX_CANDIDATES);
                        ranked
                    }
                    Ok(_) => links.into_iter().take(MAX_CANDIDATES).collect(),
                    Err(e) => return Step::Done(unavailable(e)),
                };
                debug!(count = candidates.len(), "ambiguous title");
                let outcome = LookupOutcome::Ambiguous { candidates };
                if !may_retry {
                    return Step::Done(outcome);
                }
                match self.suggested_title(title).await {
                    Some(next_title) => Step::Retry { outcome, next_title },
                    None => Step::Done(outcome),
                }
            }
            PageLookup::Missing => {
                if may_retry {
                    if let Some(next_title) = self.suggested_title(title).await {
                        return Step::Retry {
                            outcome: LookupOutcome::NotFound { candidates: Vec::new() },
                            next_title,
                        };
                    }
                }
                match self.service.search(title, MAX_CANDIDATES).await {
                    Ok(mut candidates) => {
                        candidates.truncate(MAX_CANDIDATES);
                        debug!(count = candidates.len(), "not found, search candidates");
                        Step::Done(LookupOutcome::NotFound { candidates })
                    }
                    Err(e) => Step::Done(unavailable(e)),
                }
            }
        }
    }

    /// The service's spelling suggestion, if it names a different title.
    async fn suggested_title(&self, title: &str) -> Option<String> {
        match self.service.suggest(title).await {
            Ok(Some(suggestion)) => {
                let suggestion = capitalize_title(&suggestion);
                (!suggestion.is_empty() && suggestion != capitalize_title(title)).then_some(suggestion)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "spelling suggestion failed");
                None
            }
        }
    }
}

fn unavailable(e: crate::error::EncyclopediaError) -> LookupOutcome {
    warn!(error = %e, "encyclopedia service unavailable");
    LookupOutcome::ServiceUnavailable { detail: e.to_string() }
}
