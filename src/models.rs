use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a single prompt turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a prompt sequence. Turns are append-only;
/// nothing in the crate mutates a turn after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Remote chat-completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Groq,
}

impl Provider {
    /// Fixed chat-completions endpoint for this provider.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
            Provider::Groq => "https://api.groq.com/openai/v1/chat/completions",
        }
    }

    /// The reciprocal provider, suggested to the user on rate limits.
    pub fn other(&self) -> Provider {
        match self {
            Provider::OpenAi => Provider::Groq,
            Provider::Groq => Provider::OpenAi,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "OpenAI"),
            Provider::Groq => write!(f, "Groq"),
        }
    }
}

/// Which provider/model pair handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelSelection {
    #[default]
    Gpt4oMini,
    Llama33Versatile,
}

impl ModelSelection {
    /// Parse a model-name string. Unknown names fall back to the OpenAI
    /// default; this is the defined fallback policy, not an error.
    pub fn from_name(name: &str) -> Self {
        match name {
            "llama-3.3-70b-versatile" => ModelSelection::Llama33Versatile,
            _ => ModelSelection::Gpt4oMini,
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            ModelSelection::Gpt4oMini => Provider::OpenAi,
            ModelSelection::Llama33Versatile => Provider::Groq,
        }
    }

    /// Literal model identifier sent to the provider.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelSelection::Gpt4oMini => "gpt-4o-mini",
            ModelSelection::Llama33Versatile => "llama-3.3-70b-versatile",
        }
    }
}

// Chat-completion API request format (shared by both providers)
#[derive(Debug, Serialize, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: f32,
    pub max_tokens: i32,
}

// Chat-completion API response format
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Message object inside a completion choice. `content` is optional so a
/// structurally-present reply with no text maps to the placeholder string
/// instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub role: Option<Role>,
    pub content: Option<String>,
}
