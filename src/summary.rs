use crate::core::{truncate_chars, ChatClient, ChatRequest};
use tracing::{info, instrument, warn};

/// Articles are cut to this many characters before they are sent.
pub const SUMMARY_INPUT_LIMIT: usize = 5000;

/// Prefix of the text returned in place of a summary when the service fails.
pub const SUMMARY_APOLOGY: &str = "Sorry, the AI is currently unavailable.";

#[derive(Debug, Clone)]
pub struct SummaryRequester<C: ChatClient> {
    client: C,
    language: String,
}

impl<C: ChatClient> SummaryRequester<C> {
    pub fn new(client: C, language: impl Into<String>) -> Self {
        Self { client, language: language.into() }
    }

    fn instruction(&self) -> String {
        format!(
            "Summarize the text in 5 simple sentences without using technical jargon. \
             Write the summary in {}.",
            self.language
        )
    }

    /// Always returns text: the summary, or the apology plus the error detail.
    #[instrument(target = "wiki_navigator::summary", skip(self, article_text), fields(article_len = article_text.len()))]
    pub async fn summarize(&self, article_text: &str) -> String {
        let payload = truncate_chars(article_text, SUMMARY_INPUT_LIMIT);
        let request = ChatRequest::new(self.instruction(), payload);

        match self.client.ask_raw(request).await {
            Ok(summary) => {
                info!(target: "wiki_navigator::summary", summary_len = summary.len(), "summary received");
                summary
            }
            Err(e) => {
                warn!(target: "wiki_navigator::summary", error = %e, "summary failed");
                format!("{SUMMARY_APOLOGY} Error: {e}")
            }
        }
    }
}
