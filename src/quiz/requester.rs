use super::payload::{parse_quiz, payload_schema};
use super::{QuestionCount, Quiz};
use crate::core::{truncate_chars, ChatClient, ChatRequest};
use crate::error::QuizError;
use tracing::{info, instrument, warn};

/// Summaries are cut to this many characters before they are sent.
pub const QUIZ_INPUT_LIMIT: usize = 2000;

const QUIZ_INSTRUCTION: &str = "You write short multiple-choice quizzes. \
Reply with a single JSON array and nothing else: no prose, no explanations, no code fences.";

/// Asks the generative service for a quiz and accepts only a fully valid one.
#[derive(Debug, Clone)]
pub struct QuizRequester<C: ChatClient> {
    client: C,
    language: String,
}

impl<C: ChatClient> QuizRequester<C> {
    pub fn new(client: C, language: impl Into<String>) -> Self {
        Self { client, language: language.into() }
    }

    fn build_request(&self, summary: &str, count: QuestionCount) -> ChatRequest {
        let user = format!(
            "Create exactly {count} multiple-choice questions from the summary below.\n\n\
             Rules:\n\
             - Each question has exactly 4 options, listed in the order A, B, C, D\n\
             - \"correct\" is the letter of the right option: \"A\", \"B\", \"C\" or \"D\"\n\
             - Ask only about facts stated in the summary\n\
             - Language: {language}\n\n\
             The reply must be valid JSON matching this schema:\n{schema}\n\n\
             SUMMARY:\n{summary}",
            count = count.get(),
            language = self.language,
            schema = payload_schema(),
            summary = truncate_chars(summary, QUIZ_INPUT_LIMIT),
        );
        ChatRequest::new(QUIZ_INSTRUCTION, user)
    }

    /// Request and validate a quiz, reporting why it was rejected.
    #[instrument(target = "wiki_navigator::quiz", skip(self, summary), fields(summary_len = summary.len()))]
    pub async fn request_quiz(&self, summary: &str, requested: usize) -> Result<Quiz, QuizError> {
        let count = QuestionCount::clamped(requested);
        let raw = self.client.ask_raw(self.build_request(summary, count)).await?;
        parse_quiz(&raw, count)
    }

    /// Quiz for `summary`, or `None` when the service fails or its payload is
    /// malformed. The reason is logged for operators; users just get no quiz.
    pub async fn quiz_from_summary(&self, summary: &str, requested: usize) -> Option<Quiz> {
        match self.request_quiz(summary, requested).await {
            Ok(quiz) => {
                info!(target: "wiki_navigator::quiz", questions = quiz.len(), "quiz accepted");
                Some(quiz)
            }
            Err(e) => {
                warn!(target: "wiki_navigator::quiz", error = %e, "quiz rejected");
                None
            }
        }
    }
}
