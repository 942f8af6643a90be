use crate::config::AppConfig;
use crate::core::ChatClient;
use crate::encyclopedia::EncyclopediaService;
use crate::quiz::{Quiz, QuizRequester};
use crate::resolver::{LookupOutcome, TopicResolver};
use crate::summary::SummaryRequester;
use tracing::info;

/// The core services one console session talks to, built once at startup.
#[derive(Debug, Clone)]
pub struct Navigator<E: EncyclopediaService, C: ChatClient + Clone> {
    resolver: TopicResolver<E>,
    summaries: SummaryRequester<C>,
    quizzes: QuizRequester<C>,
    quiz_questions: usize,
}

impl<E: EncyclopediaService, C: ChatClient + Clone> Navigator<E, C> {
    pub fn new(encyclopedia: E, client: C, config: &AppConfig) -> Self {
        info!(
            wiki_language = %config.wiki_language,
            quiz_language = %config.quiz_language,
            "Creating navigator"
        );
        Self {
            resolver: TopicResolver::new(encyclopedia),
            summaries: SummaryRequester::new(client.clone(), config.quiz_language.clone()),
            quizzes: QuizRequester::new(client, config.quiz_language.clone()),
            quiz_questions: config.quiz_questions,
        }
    }

    pub async fn resolve(&self, topic: &str) -> LookupOutcome {
        self.resolver.resolve(topic).await
    }

    pub async fn summarize(&self, article_text: &str) -> String {
        self.summaries.summarize(article_text).await
    }

    pub async fn quiz(&self, summary: &str) -> Option<Quiz> {
        self.quizzes.quiz_from_summary(summary, self.quiz_questions).await
    }
}
