//! Interactive quiz administration.
//!
//! [`QuizSession`] is a small state machine: it waits for an answer to the
//! current question, scores valid answers and advances, and ignores anything
//! that is not a label A–D. Input arrives through [`AnswerSource`], so a
//! terminal and a test script drive it the same way.

use crate::error::SessionError;
use crate::quiz::{AnswerLabel, Quiz, QuizQuestion};
use std::io;
use tracing::debug;

/// Where answers come from and where the session's prompts go.
pub trait AnswerSource {
    /// Show question `index` (zero-based) before its answer is read.
    fn present(&mut self, index: usize, question: &QuizQuestion) -> io::Result<()>;

    /// Read one raw answer for question `index`; `None` once input is exhausted.
    fn read_answer(&mut self, index: usize) -> io::Result<Option<String>>;

    /// Tell the user `input` was not a valid label.
    fn reject(&mut self, input: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingAnswer(usize),
    Finished,
}

/// What happened to one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted { label: AnswerLabel, correct: bool },
    /// Not a label, or the session is already finished; state unchanged
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    Positive,
    Neutral,
    Encouragement,
}

impl FeedbackTier {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            80.. => Self::Positive,
            50..=79 => Self::Neutral,
            _ => Self::Encouragement,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Positive => "Very good! That looks like solid understanding.",
            Self::Neutral => "Not bad! You understood quite a bit.",
            Self::Encouragement => "Maybe read the summary once more.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSessionResult {
    pub correct_count: usize,
    pub total_count: usize,
}

impl QuizSessionResult {
    /// `100 * correct / total`, rounded half away from zero.
    pub fn percent(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        (100.0 * self.correct_count as f64 / self.total_count as f64).round() as u32
    }

    pub fn tier(&self) -> FeedbackTier {
        FeedbackTier::from_percent(self.percent())
    }
}

#[derive(Debug)]
pub struct QuizSession {
    quiz: Quiz,
    state: SessionState,
    correct: usize,
}

impl QuizSession {
    pub fn new(quiz: Quiz) -> Self {
        let state = if quiz.is_empty() { SessionState::Finished } else { SessionState::AwaitingAnswer(0) };
        Self { quiz, state, correct: 0 }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            SessionState::AwaitingAnswer(index) => self.quiz.questions().get(index),
            SessionState::Finished => None,
        }
    }

    pub fn submit(&mut self, input: &str) -> Submission {
        let SessionState::AwaitingAnswer(index) = self.state else {
            return Submission::Rejected;
        };
        let Some(label) = AnswerLabel::from_input(input) else {
            return Submission::Rejected;
        };

        let correct = self.quiz.questions()[index].is_correct(label);
        if correct {
            self.correct += 1;
        }
        self.state = if index + 1 < self.quiz.len() {
            SessionState::AwaitingAnswer(index + 1)
        } else {
            SessionState::Finished
        };
        debug!(question = index, %label, correct, "answer scored");
        Submission::Accepted { label, correct }
    }

    /// The score, once every question has been answered.
    pub fn result(&self) -> Option<QuizSessionResult> {
        (self.state == SessionState::Finished).then_some(QuizSessionResult {
            correct_count: self.correct,
            total_count: self.quiz.len(),
        })
    }

    /// Ask every question in order, re-prompting on invalid input, and consume the session.
    pub fn run<S: AnswerSource + ?Sized>(mut self, source: &mut S) -> Result<QuizSessionResult, SessionError> {
        while let SessionState::AwaitingAnswer(index) = self.state {
            source.present(index, &self.quiz.questions()[index])?;
            loop {
                let Some(input) = source.read_answer(index)? else {
                    return Err(SessionError::InputClosed(index + 1));
                };
                match self.submit(&input) {
                    Submission::Accepted { .. } => break,
                    Submission::Rejected => source.reject(&input)?,
                }
            }
        }

        Ok(QuizSessionResult { correct_count: self.correct, total_count: self.quiz.len() })
    }
}
