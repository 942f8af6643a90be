#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpenAIModel {
    #[default]
    Gpt5Nano,
    Gpt5Mini,
    Gpt4oMini,
    Gpt41Mini,
    Override(String),
}

impl OpenAIModel {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Gpt5Nano => "gpt-5-nano",
            Self::Gpt5Mini => "gpt-5-mini",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Override(s) => s.as_str(),
        }
    }

    /// Map a model id onto a known variant, keeping unknown ids as overrides.
    pub fn from_id(id: &str) -> Self {
        match id {
            "gpt-5-nano" => Self::Gpt5Nano,
            "gpt-5-mini" => Self::Gpt5Mini,
            "gpt-4o-mini" => Self::Gpt4oMini,
            "gpt-4.1-mini" => Self::Gpt41Mini,
            other => Self::Override(other.to_string()),
        }
    }

    /// The gpt-5 family only accepts the default sampling temperature.
    pub fn supports_temperature(&self) -> bool {
        !self.id().starts_with("gpt-5")
    }
}
