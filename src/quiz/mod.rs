//! Quiz model: validated multiple-choice questions built from generated text.
//!
//! A [`Quiz`] can only be obtained through validation, so holding one means
//! every question has four options and a correct label in A–D.

use crate::error::QuizError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod payload;
pub mod requester;

pub use payload::parse_quiz;
pub use requester::QuizRequester;

/// Fewest questions a quiz may have.
pub const MIN_QUESTIONS: usize = 2;
/// Most questions a quiz may have.
pub const MAX_QUESTIONS: usize = 3;
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Option label, by position: A is the first option, D the fourth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    pub const ALL: [AnswerLabel; OPTIONS_PER_QUESTION] = [Self::A, Self::B, Self::C, Self::D];

    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// Parse what a user typed: surrounding whitespace ignored, any case.
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(letter)
    }
}

/// Requested question count, clamped into [`MIN_QUESTIONS`]..=[`MAX_QUESTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCount(usize);

impl QuestionCount {
    pub fn clamped(requested: usize) -> Self {
        Self(requested.clamp(MIN_QUESTIONS, MAX_QUESTIONS))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct: AnswerLabel,
}

impl QuizQuestion {
    pub fn option(&self, label: AnswerLabel) -> &str {
        &self.options[label.index()]
    }

    pub fn is_correct(&self, label: AnswerLabel) -> bool {
        self.correct == label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Build a quiz from already-shaped questions; only the count can still be wrong.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&questions.len()) {
            return Err(QuizError::QuizSize {
                min: MIN_QUESTIONS,
                max: MAX_QUESTIONS,
                actual: questions.len(),
            });
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
