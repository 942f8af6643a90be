use super::{AnswerLabel, QuestionCount, Quiz, QuizQuestion, OPTIONS_PER_QUESTION};
use crate::error::QuizError;
use crate::json_utils::{find_json_structures, NodeType};
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Wire shape of one generated question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(description = "One multiple-choice question")]
pub struct QuestionPayload {
    /// The question text
    pub question: String,
    /// Exactly four answer options, labeled A, B, C, D in this order
    #[schemars(length(min = 4, max = 4))]
    pub options: Vec<String>,
    /// Label of the correct option
    pub correct: AnswerLabel,
}

/// Pretty-printed JSON schema of the full payload (an array of questions).
pub fn payload_schema() -> String {
    let schema = schema_for!(Vec<QuestionPayload>);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "Schema serialization failed".to_string())
}

/// Strip one surrounding Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.trim_end().strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line
    match body.split_once('\n') {
        Some((info, inner)) if !info.contains('[') => inner.trim(),
        _ => body.trim(),
    }
}

/// Validate a generated quiz payload. Anything but a well-formed array of
/// exactly `expected` questions is rejected as a whole.
#[instrument(target = "wiki_navigator::quiz", skip(raw), fields(raw_len = raw.len(), expected = expected.get()))]
pub fn parse_quiz(raw: &str, expected: QuestionCount) -> Result<Quiz, QuizError> {
    let body = strip_code_fence(raw);

    let roots = find_json_structures(body);
    let root = match roots.first() {
        Some(root) if root.kind == NodeType::Array => root,
        _ => return Err(QuizError::NoPayload),
    };
    if root.start != 0 || root.end + 1 != body.len() {
        let mut outside = String::from(body[..root.start].trim());
        outside.push_str(body[root.end + 1..].trim());
        return Err(QuizError::TrailingProse(outside));
    }

    let payload: Vec<QuestionPayload> = serde_json::from_str(root.slice(body))
        .map_err(|e| QuizError::JsonDeserialization(e, body.to_string()))?;
    debug!(target: "wiki_navigator::quiz", count = payload.len(), "payload decoded");

    if payload.len() != expected.get() {
        return Err(QuizError::QuestionCount { expected: expected.get(), actual: payload.len() });
    }

    let questions = payload
        .into_iter()
        .enumerate()
        .map(|(index, item)| into_question(index, item))
        .collect::<Result<Vec<_>, _>>()?;
    Quiz::new(questions)
}

fn into_question(index: usize, item: QuestionPayload) -> Result<QuizQuestion, QuizError> {
    let actual = item.options.len();
    let options: [String; OPTIONS_PER_QUESTION] = item
        .options
        .try_into()
        .map_err(|_| QuizError::OptionCount { index, actual })?;

    if item.question.trim().is_empty() || options.iter().any(|o| o.trim().is_empty()) {
        return Err(QuizError::BlankText { index });
    }

    Ok(QuizQuestion { prompt: item.question, options, correct: item.correct })
}
