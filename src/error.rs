use thiserror::Error;

use crate::models::Provider;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Failure of a single HTTP exchange, before any provider-level mapping.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Send(#[from] reqwest::Error),

    /// Non-success HTTP status with whatever body text the provider sent.
    #[error("status {status}: {detail}")]
    Status { status: u16, detail: String },
}

impl TransportError {
    /// Provider-reported "too many requests".
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, TransportError::Status { status: 429, .. })
    }
}

/// Errors surfaced by the conversation core. Callers that need the old
/// flattened behavior go through [`ChatError::user_facing_text`] instead of
/// matching on variants.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No secret configured for the selected provider; detected before any
    /// network I/O is attempted.
    #[error("{0} API key not configured")]
    MissingCredential(Provider),

    /// Provider signaled quota exhaustion. An expected outcome, mapped to a
    /// friendly suggestion to try the other provider.
    #[error("{0} rate limit reached")]
    RateLimited(Provider),

    /// Any other network or protocol fault.
    #[error("{provider} request failed: {source}")]
    Backend {
        provider: Provider,
        #[source]
        source: TransportError,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ChatError {
    /// Flatten into the display string the original UI showed. Every failure
    /// terminates in displayable text; nothing propagates to the screen as a
    /// structured fault.
    pub fn user_facing_text(&self) -> String {
        match self {
            ChatError::RateLimited(provider) => format!(
                "Oops! I've reached my daily thinking limit with {provider} 🥺 \
                 Try switching to {} model or chat again later!",
                provider.other()
            ),
            ChatError::Backend { provider, source } => {
                format!("Something went wrong with {provider} 😢 Error: {source}")
            }
            ChatError::MissingCredential(_) | ChatError::Config(_) => {
                "Oops! Something went wrong on my side 😢 Could you try asking me again?"
                    .to_string()
            }
        }
    }
}
