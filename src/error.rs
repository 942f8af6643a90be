use thiserror::Error;

#[derive(Error, Debug)]
pub enum AIError {
    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] OpenAIError),
    #[error("Mock error: {0}")]
    Mock(String),
}

#[derive(Error, Debug)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}

#[derive(Error, Debug)]
pub enum EncyclopediaError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Unexpected response shape: {0}")]
    Response(String),
}

/// Reasons a generated quiz payload was rejected.
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("AI error: {0}")]
    Ai(#[from] AIError),
    #[error("no quiz array found in response")]
    NoPayload,
    #[error("text outside the quiz array: {0:?}")]
    TrailingProse(String),
    #[error("JSON deserialization error: {0}. Raw response: {1}")]
    JsonDeserialization(#[source] serde_json::Error, String),
    #[error("expected {expected} questions, got {actual}")]
    QuestionCount { expected: usize, actual: usize },
    #[error("a quiz needs {min} to {max} questions, got {actual}")]
    QuizSize { min: usize, max: usize, actual: usize },
    #[error("question {index} has {actual} options, expected 4")]
    OptionCount { index: usize, actual: usize },
    #[error("question {index} has blank text")]
    BlankText { index: usize },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("answer input closed before question {0}")]
    InputClosed(usize),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
