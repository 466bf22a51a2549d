use std::sync::Arc;

use crate::error::{ChatError, Result};
use crate::models::{ChatRequest, ModelSelection, Provider, Turn};
use crate::transport::Transport;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: i32 = 1000;

/// Shown when the provider replied but the first choice carried no text.
pub const EMPTY_REPLY: &str = "Hmm, I couldn't think of a reply. Try asking me again?";

/// One provider's request/response exchange. Both providers speak the same
/// chat-completions dialect, so a single parameterized adapter serves both;
/// only the endpoint and model identifier differ.
///
/// Stateless across calls: each [`ChatBackend::complete`] is an independent
/// unit with no shared mutable state.
pub struct ChatBackend {
    provider: Provider,
    model_id: String,
    transport: Arc<dyn Transport>,
}

impl ChatBackend {
    pub fn new(provider: Provider, model_id: String, transport: Arc<dyn Transport>) -> Self {
        Self {
            provider,
            model_id,
            transport,
        }
    }

    /// Adapter for the provider/model pair named by `selection`.
    pub fn for_model(selection: ModelSelection, transport: Arc<dyn Transport>) -> Self {
        Self::new(
            selection.provider(),
            selection.model_id().to_string(),
            transport,
        )
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Send `prompt` to the provider and extract the first choice's text.
    ///
    /// An empty credential fails fast with [`ChatError::MissingCredential`]
    /// before any network call. A provider-reported 429 maps to
    /// [`ChatError::RateLimited`]; every other fault to [`ChatError::Backend`].
    pub async fn complete(&self, prompt: &[Turn], credential: &str) -> Result<String> {
        if credential.is_empty() {
            return Err(ChatError::MissingCredential(self.provider));
        }

        let request = ChatRequest {
            model: self.model_id.clone(),
            messages: prompt.to_vec(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(
            provider = %self.provider,
            model = %self.model_id,
            turns = prompt.len(),
            "Dispatching chat completion"
        );

        let response = self
            .transport
            .chat(self.provider.endpoint(), credential, &request)
            .await
            .map_err(|source| {
                if source.is_rate_limit() {
                    ChatError::RateLimited(self.provider)
                } else {
                    ChatError::Backend {
                        provider: self.provider,
                        source,
                    }
                }
            })?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }

    /// Compatibility variant: always a displayable string, never an error.
    pub async fn complete_text(&self, prompt: &[Turn], credential: &str) -> String {
        match self.complete(prompt, credential).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(provider = %self.provider, error = %e, "Completion failed");
                e.user_facing_text()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::models::{ChatResponse, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock Transport for testing: pops canned responses, counts calls, and
    // records every request it saw.
    struct MockTransport {
        responses: Mutex<Vec<std::result::Result<ChatResponse, TransportError>>>,
        calls: AtomicUsize,
        sent: Mutex<Vec<ChatRequest>>,
    }

    impl MockTransport {
        fn new(responses: Vec<std::result::Result<ChatResponse, TransportError>>) -> Self {
            MockTransport {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn chat(
            &self,
            _endpoint: &str,
            _api_key: &str,
            req: &ChatRequest,
        ) -> std::result::Result<ChatResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent
                .lock()
                .expect("Mock transport mutex should not be poisoned")
                .push(req.clone());
            self.responses
                .lock()
                .expect("Mock transport mutex should not be poisoned")
                .pop()
                .unwrap_or_else(|| {
                    Err(TransportError::Status {
                        status: 500,
                        detail: "No more mock responses".to_string(),
                    })
                })
        }
    }

    fn response_with_content(content: &str) -> ChatResponse {
        serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
        .expect("Mock response should deserialize")
    }

    #[tokio::test]
    async fn empty_credential_fails_before_any_network_call() {
        let transport = Arc::new(MockTransport::new(vec![Ok(response_with_content("hello"))]));
        let backend = ChatBackend::for_model(ModelSelection::Gpt4oMini, transport.clone());

        let err = backend
            .complete(&[Turn::user("hi")], "")
            .await
            .expect_err("Empty credential should fail");

        assert!(matches!(err, ChatError::MissingCredential(Provider::OpenAi)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn first_choice_content_is_returned_verbatim() {
        let transport = Arc::new(MockTransport::new(vec![Ok(response_with_content("hello"))]));
        let backend = ChatBackend::for_model(ModelSelection::Llama33Versatile, transport);

        let reply = backend
            .complete(&[Turn::user("hi")], "gsk_test")
            .await
            .expect("Completion should succeed");
        assert_eq!(reply, "hello");
    }

    #[tokio::test]
    async fn empty_choices_map_to_the_placeholder() {
        let empty: ChatResponse =
            serde_json::from_str(r#"{"choices":[]}"#).expect("Should deserialize");
        let transport = Arc::new(MockTransport::new(vec![Ok(empty)]));
        let backend = ChatBackend::for_model(ModelSelection::Gpt4oMini, transport);

        let reply = backend
            .complete(&[Turn::user("hi")], "sk-test")
            .await
            .expect("Completion should succeed");
        assert_eq!(reply, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn missing_content_field_maps_to_the_placeholder() {
        let no_content: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#)
                .expect("Should deserialize");
        let transport = Arc::new(MockTransport::new(vec![Ok(no_content)]));
        let backend = ChatBackend::for_model(ModelSelection::Gpt4oMini, transport);

        let reply = backend
            .complete(&[Turn::user("hi")], "sk-test")
            .await
            .expect("Completion should succeed");
        assert_eq!(reply, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn rate_limit_suggests_the_reciprocal_provider() {
        let limited = || {
            Err(TransportError::Status {
                status: 429,
                detail: "too many requests".to_string(),
            })
        };

        let groq = ChatBackend::for_model(
            ModelSelection::Llama33Versatile,
            Arc::new(MockTransport::new(vec![limited()])),
        );
        let text = groq.complete_text(&[Turn::user("hi")], "gsk_test").await;
        assert!(text.contains("OpenAI"), "got: {text}");

        let openai = ChatBackend::for_model(
            ModelSelection::Gpt4oMini,
            Arc::new(MockTransport::new(vec![limited()])),
        );
        let text = openai.complete_text(&[Turn::user("hi")], "sk-test").await;
        assert!(text.contains("Groq"), "got: {text}");
    }

    #[tokio::test]
    async fn request_carries_fixed_sampling_parameters() {
        let transport = Arc::new(MockTransport::new(vec![Ok(response_with_content("ok"))]));
        let backend = ChatBackend::for_model(ModelSelection::Gpt4oMini, transport.clone());

        backend
            .complete(&[Turn::system("persona"), Turn::user("hi")], "sk-test")
            .await
            .expect("Completion should succeed");

        let sent = transport
            .sent
            .lock()
            .expect("Mock transport mutex should not be poisoned");
        let request = sent.first().expect("One request should have been sent");
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 1000);
        assert_eq!(request.messages[0].role, Role::System);
    }
}
