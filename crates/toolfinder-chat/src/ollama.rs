//! Ollama Transport Implementation
//!
//! Talks to an Ollama-compatible chat endpoint (`POST <endpoint>/api/chat`).
//!
//! # Features
//!
//! - Blocking HTTP communication, meant to run off the async executor
//! - Configurable endpoint, model and timeout
//! - Retry logic with exponential backoff
//!
//! The reply body carries the nested `message.content` shape, which maps
//! straight onto [`ChatReply::Message`].
//!
//! # Examples
//!
//! ```no_run
//! use toolfinder_chat::OllamaTransport;
//! use toolfinder_domain::ChatTransport;
//!
//! let transport = OllamaTransport::new("http://localhost:11434", "llama3");
//! let reply = transport.chat("List three AI coding tools").unwrap();
//! println!("{}", reply.into_text());
//! ```

use crate::ChatError;
use serde::Serialize;
use std::time::Duration;
use toolfinder_domain::{ChatReply, ChatTransport};
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for chat requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per chat call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama chat transport
///
/// The HTTP client is created per call, inside whatever blocking context the
/// caller runs the transport on, so the transport itself can be built and
/// dropped on an async executor.
#[derive(Debug, Clone)]
pub struct OllamaTransport {
    endpoint: String,
    model: String,
    timeout: Duration,
    max_retries: u32,
}

/// Request body for the Ollama chat API
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl OllamaTransport {
    /// Create a new Ollama transport
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a new transport against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model this transport talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint this transport talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send(&self, prompt: &str) -> Result<ChatReply, ChatError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ChatError::Communication(format!("Failed to build client: {}", e)))?;

        let url = format!("{}/api/chat", self.endpoint);
        let request_body = OllamaChatRequest {
            model: &self.model,
            messages: vec![OllamaChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match client.post(&url).json(&request_body).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<ChatReply>().map_err(|e| {
                            ChatError::InvalidResponse(format!("Failed to parse response: {}", e))
                        });
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(ChatError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ChatError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(ChatError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(ChatError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(attempt = attempts, ?delay, "chat request failed, retrying");
                std::thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| ChatError::Communication("Max retries exceeded".to_string())))
    }
}

impl ChatTransport for OllamaTransport {
    type Error = ChatError;

    fn chat(&self, prompt: &str) -> Result<ChatReply, Self::Error> {
        debug!(model = %self.model, prompt_len = prompt.len(), "sending chat request");
        self.send(prompt)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_transport_creation() {
        let transport = OllamaTransport::new("http://localhost:11434/", "llama3");
        assert_eq!(transport.endpoint(), "http://localhost:11434");
        assert_eq!(transport.model(), "llama3");
        assert_eq!(transport.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(transport.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_ollama_transport_default_endpoint() {
        let transport = OllamaTransport::default_endpoint("mistral");
        assert_eq!(transport.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(transport.model(), "mistral");
    }

    #[test]
    fn test_ollama_transport_builders() {
        let transport = OllamaTransport::new("http://localhost:11434", "llama3")
            .with_max_retries(0)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(transport.max_retries, 1);
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_request_body_shape() {
        let body = OllamaChatRequest {
            model: "llama3",
            messages: vec![OllamaChatMessage {
                role: "user",
                content: "hi",
            }],
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_ollama_error_handling() {
        // Nothing listens on port 9, so the request fails fast
        let transport = OllamaTransport::new("http://127.0.0.1:9", "llama3")
            .with_max_retries(1)
            .with_timeout(Duration::from_secs(2));

        let result = transport.chat("test");
        assert!(matches!(result, Err(ChatError::Communication(_))));
    }

    // Integration tests (requires running Ollama)
    #[test]
    #[ignore] // Only run when Ollama is available
    fn test_ollama_chat_integration() {
        let transport = OllamaTransport::default_endpoint("llama3");
        if let Ok(reply) = transport.chat("Say 'hello' and nothing else") {
            assert!(!reply.as_text().is_empty());
        }
    }
}
