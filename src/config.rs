use std::env;
use std::time::Duration;

/// File the API key is conventionally kept in, next to the working directory.
pub const KEY_FILE: &str = "openai_key.env";

/// Trait for types that can retrieve their configuration key from environment variables
pub trait KeyFromEnv {
    /// The environment variable name for this client's API key
    const KEY_NAME: &'static str;

    /// Find the API key by checking environment variables first, then the env files
    fn find_key() -> Option<String> {
        if let Ok(key) = env::var(Self::KEY_NAME) {
            return Some(key).filter(|k| !k.trim().is_empty());
        }

        load_env_files();
        env::var(Self::KEY_NAME).ok().filter(|k| !k.trim().is_empty())
    }
}

/// Load `.env` and [`KEY_FILE`] from the working directory into the process
/// environment. Variables that are already set win; missing files are ignored.
pub fn load_env_files() {
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_filename(KEY_FILE);
}

/// Runtime settings shared by the encyclopedia client, the requesters and the console.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Encyclopedia language edition, e.g. `de` for de.wikipedia.org
    pub wiki_language: String,
    /// Language the quiz questions are written in
    pub quiz_language: String,
    /// Chat model id
    pub model: String,
    pub request_timeout: Duration,
    pub terminal_width: usize,
    pub quiz_questions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wiki_language: "de".to_string(),
            quiz_language: "Deutsch".to_string(),
            model: "gpt-5-nano".to_string(),
            request_timeout: Duration::from_secs(30),
            terminal_width: 80,
            quiz_questions: 3,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `WIKI_LANG`, `QUIZ_LANGUAGE` and `OPENAI_MODEL`,
    /// read after the env files are loaded.
    pub fn from_env() -> Self {
        load_env_files();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the variable names.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(lang) = var("WIKI_LANG") {
            config.wiki_language = lang;
        }
        if let Some(lang) = var("QUIZ_LANGUAGE") {
            config.quiz_language = lang;
        }
        if let Some(model) = var("OPENAI_MODEL") {
            config.model = model;
        }
        config
    }

    #[must_use]
    pub fn with_wiki_language(mut self, lang: impl Into<String>) -> Self {
        self.wiki_language = lang.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_terminal_width(mut self, width: usize) -> Self {
        // Narrower than the banners makes no sense
        self.terminal_width = width.max(20);
        self
    }
}
