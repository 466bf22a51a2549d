pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod persona;
pub mod transport;

use std::sync::Arc;

use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::models::ModelSelection;
use crate::orchestrator::{CredentialSet, Orchestrator};
use crate::transport::HttpTransport;

/// Wires a configured orchestrator to the HTTP transport and tracks the
/// currently selected model. The conversation history itself belongs to the
/// caller (the UI), which hands it in on every send and is expected to
/// serialize sends.
pub struct ChatService {
    orchestrator: Orchestrator,
    model: ModelSelection,
    system_prompt: Option<String>,
}

impl ChatService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let transport = HttpTransport::with_timeout(cfg.request_timeout())
            .map_err(|e| ChatError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            orchestrator: Orchestrator::new(Arc::new(transport), cfg.credentials()),
            model: cfg.default_model(),
            system_prompt: cfg.chat.system_prompt.clone(),
        })
    }

    pub fn model(&self) -> ModelSelection {
        self.model
    }

    pub fn select_model(&mut self, model: ModelSelection) {
        self.model = model;
    }

    pub fn update_credentials(&mut self, update: CredentialSet) {
        self.orchestrator.update_credentials(update);
    }

    /// Answer the latest user message given the flat string history
    /// (even indices user, odd indices assistant). Always a displayable
    /// string; backend failures flatten to apology text.
    pub async fn answer(&self, history: &[String]) -> String {
        self.orchestrator
            .respond(history, self.model, self.system_prompt.as_deref())
            .await
    }
}
