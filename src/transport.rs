use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::TransportError;
use crate::models::{ChatRequest, ChatResponse};

/// Single request/response exchange with a chat-completions endpoint.
///
/// One invocation is one network call; there is no retry loop in here.
/// Retries, if a caller wants them, are the caller's responsibility.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(
        &self,
        endpoint: &str,
        api_key: &str,
        req: &ChatRequest,
    ) -> Result<ChatResponse, TransportError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Transport with no request timeout, matching the original client.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    /// Optional whole-request timeout. `None` leaves requests unbounded.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn chat(
        &self,
        endpoint: &str,
        api_key: &str,
        req: &ChatRequest,
    ) -> Result<ChatResponse, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::Status { status, detail });
        }

        Ok(response.json().await?)
    }
}
