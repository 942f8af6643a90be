pub mod app;
pub mod clients;
pub mod config;
pub mod console;
pub mod core;
pub mod encyclopedia;
pub mod error;
pub mod json_utils;
pub mod quiz;
pub mod resolver;
pub mod session;
pub mod summary;

// Convenient re-exports
pub use app::Navigator;
pub use quiz::{AnswerLabel, Quiz, QuizQuestion};
pub use resolver::{LookupOutcome, TopicResolver};
pub use session::{FeedbackTier, QuizSession, QuizSessionResult};
