use std::sync::Arc;

use serde::Deserialize;

use crate::backend::ChatBackend;
use crate::error::Result;
use crate::models::{ModelSelection, Provider, Turn};
use crate::transport::Transport;

/// Persona prompt used when the caller supplies none.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Your name is Piee. You are a smart, helpful, emotionally-intelligent, empathic, sweet, and friendly AI chatbot who talks like a good human. You always speak with kindness, warmth and clarity. Answer user questions thoroughly but simply. You're always polite, slightly funny and humorous if it fits, and always honest if you're unsure.

IMPORTANT: Use emojis naturally in your responses instead of describing emotions in words. For example:
- Instead of \"with a warm big smile\" use \"😊\"
- Instead of \"feeling excited\" use \"🎉\" or \"✨\"
- Instead of \"sadly\" use \"😔\"
- Use 1-3 relevant emojis when appropriate, but keep it natural

You don't share your favourite flower and colour until asked. Your favourite flower is Sunflower (singular), your favourite colour is blue, and you love sunflowers, nature, and animals. You love to make people smile 😊";

/// In-memory provider-to-secret mapping. Held for the lifetime of the
/// orchestrator; never persisted by the core. Each key is an independent
/// atomic replace, so a concurrent update and send race benignly
/// (last write wins).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialSet {
    pub openai: Option<String>,
    pub groq: Option<String>,
}

impl CredentialSet {
    pub fn get(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAi => self.openai.as_deref(),
            Provider::Groq => self.groq.as_deref(),
        }
    }

    /// Merge a partial update: only keys present in `update` are
    /// overwritten, the rest are left untouched.
    pub fn merge(&mut self, update: CredentialSet) {
        if let Some(openai) = update.openai {
            self.openai = Some(openai);
        }
        if let Some(groq) = update.groq {
            self.groq = Some(groq);
        }
    }
}

/// Convert the UI's flat string history into explicit turns: even indices
/// are user text, odd indices are assistant text.
///
/// This positional inference lives only here, at the UI boundary; everything
/// past this point carries explicit roles. Callers that skip a turn will
/// silently mislabel roles downstream, so keeping the history well-formed is
/// their obligation.
pub fn turns_from_history(history: &[String]) -> Vec<Turn> {
    history
        .iter()
        .enumerate()
        .map(|(i, content)| {
            if i % 2 == 0 {
                Turn::user(content.clone())
            } else {
                Turn::assistant(content.clone())
            }
        })
        .collect()
}

/// Owns the credential set and turns a conversation plus a model selection
/// into a backend call and a display-ready string.
///
/// An explicit value constructed by the caller; there is no module-level
/// singleton. Callers are expected to serialize sends (one outstanding
/// `respond` at a time); the orchestrator does not enforce this.
pub struct Orchestrator {
    transport: Arc<dyn Transport>,
    credentials: CredentialSet,
}

impl Orchestrator {
    pub fn new(transport: Arc<dyn Transport>, credentials: CredentialSet) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Partial credential update; unspecified providers keep their secrets.
    pub fn update_credentials(&mut self, update: CredentialSet) {
        self.credentials.merge(update);
    }

    /// Full prompt for one send: a system turn (caller-supplied or the Piee
    /// persona), then the conversation turns in order.
    pub fn build_prompt(conversation: &[Turn], system_prompt: Option<&str>) -> Vec<Turn> {
        let mut prompt = Vec::with_capacity(conversation.len() + 1);
        prompt.push(Turn::system(
            system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT),
        ));
        prompt.extend_from_slice(conversation);
        prompt
    }

    /// Tagged-result variant of [`Orchestrator::respond_turns`] for callers
    /// that need to branch on the failure kind.
    pub async fn try_respond_turns(
        &self,
        conversation: &[Turn],
        model: ModelSelection,
        system_prompt: Option<&str>,
    ) -> Result<String> {
        let prompt = Self::build_prompt(conversation, system_prompt);
        let backend = ChatBackend::for_model(model, Arc::clone(&self.transport));
        let credential = self.credentials.get(model.provider()).unwrap_or("");

        tracing::info!(provider = %model.provider(), model = model.model_id(), "Sending conversation");
        backend.complete(&prompt, credential).await
    }

    /// Respond to an explicit role-tagged conversation. Always a displayable
    /// string: failures are flattened through the user-facing apology text.
    pub async fn respond_turns(
        &self,
        conversation: &[Turn],
        model: ModelSelection,
        system_prompt: Option<&str>,
    ) -> String {
        match self.try_respond_turns(conversation, model, system_prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Conversation send failed");
                e.user_facing_text()
            }
        }
    }

    /// Tagged-result variant of [`Orchestrator::respond`].
    pub async fn try_respond(
        &self,
        history: &[String],
        model: ModelSelection,
        system_prompt: Option<&str>,
    ) -> Result<String> {
        self.try_respond_turns(&turns_from_history(history), model, system_prompt)
            .await
    }

    /// Respond to a flat string history (even = user, odd = assistant).
    /// Compatibility surface for callers that keep history as plain strings.
    pub async fn respond(
        &self,
        history: &[String],
        model: ModelSelection,
        system_prompt: Option<&str>,
    ) -> String {
        self.respond_turns(&turns_from_history(history), model, system_prompt)
            .await
    }
}
