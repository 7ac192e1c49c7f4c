//! Toolfinder Chat Transport Layer
//!
//! Pluggable chat service transports.
//!
//! # Architecture
//!
//! This crate provides implementations of the `ChatTransport` trait from
//! `toolfinder-domain`. The discovery service only ever sees the trait, so a
//! deterministic substitute can stand in for the real service in tests.
//!
//! # Transports
//!
//! - `MockTransport`: Deterministic mock for testing
//! - `OllamaTransport`: Ollama-compatible `/api/chat` integration
//!
//! # Examples
//!
//! ```
//! use toolfinder_chat::MockTransport;
//! use toolfinder_domain::ChatTransport;
//!
//! let transport = MockTransport::new("Hello from the chat service!");
//! let reply = transport.chat("test prompt").unwrap();
//! assert_eq!(reply.into_text(), "Hello from the chat service!");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use toolfinder_domain::{ChatReply, ChatTransport};

pub use ollama::OllamaTransport;

/// Errors that can occur during chat operations
#[derive(Error, Debug)]
pub enum ChatError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Reply could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Chat error: {0}")]
    Other(String),
}

/// Canned outcome for a specific prompt
#[derive(Debug, Clone)]
enum Scripted {
    Reply(ChatReply),
    Fail(String),
}

/// Mock chat transport for deterministic testing
///
/// Returns pre-configured replies without making any network calls. Clones
/// share their scripted replies and call counter.
///
/// # Examples
///
/// ```
/// use toolfinder_chat::MockTransport;
/// use toolfinder_domain::{ChatReply, ChatTransport};
///
/// // Simple fixed reply
/// let transport = MockTransport::new("Fixed reply");
/// assert_eq!(transport.chat("any prompt").unwrap().into_text(), "Fixed reply");
///
/// // Per-prompt replies, including the nested message shape
/// let transport = MockTransport::default();
/// transport.add_reply("prompt1", "reply1");
/// transport.add_reply("prompt2", ChatReply::message("reply2"));
/// assert_eq!(transport.chat("prompt1").unwrap().into_text(), "reply1");
/// assert_eq!(transport.chat("prompt2").unwrap().into_text(), "reply2");
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    default_reply: ChatReply,
    scripted: Arc<Mutex<HashMap<String, Scripted>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTransport {
    /// Create a new MockTransport with a fixed reply for all prompts
    pub fn new(reply: impl Into<ChatReply>) -> Self {
        Self {
            default_reply: reply.into(),
            scripted: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific reply for a given prompt
    pub fn add_reply(&self, prompt: impl Into<String>, reply: impl Into<ChatReply>) {
        self.scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(prompt.into(), Scripted::Reply(reply.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>, message: impl Into<String>) {
        self.scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(prompt.into(), Scripted::Fail(message.into()));
    }

    /// Get the number of times chat was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) = 0;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new("Default mock reply")
    }
}

impl ChatTransport for MockTransport {
    type Error = ChatError;

    fn chat(&self, prompt: &str) -> Result<ChatReply, Self::Error> {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;

        let scripted = self.scripted.lock().unwrap_or_else(|e| e.into_inner());
        match scripted.get(prompt) {
            Some(Scripted::Reply(reply)) => Ok(reply.clone()),
            Some(Scripted::Fail(message)) => Err(ChatError::Other(message.clone())),
            None => Ok(self.default_reply.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transport_default() {
        let transport = MockTransport::new("Test reply");
        let result = transport.chat("any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), ChatReply::text("Test reply"));
    }

    #[test]
    fn test_mock_transport_specific_replies() {
        let transport = MockTransport::default();
        transport.add_reply("hello", "world");
        transport.add_reply("foo", ChatReply::message("bar"));

        assert_eq!(transport.chat("hello").unwrap().into_text(), "world");
        assert_eq!(transport.chat("foo").unwrap(), ChatReply::message("bar"));
        assert_eq!(
            transport.chat("unknown").unwrap().into_text(),
            "Default mock reply"
        );
    }

    #[test]
    fn test_mock_transport_call_count() {
        let transport = MockTransport::new("test");

        assert_eq!(transport.call_count(), 0);

        transport.chat("prompt1").unwrap();
        assert_eq!(transport.call_count(), 1);

        transport.chat("prompt2").unwrap();
        assert_eq!(transport.call_count(), 2);

        transport.reset_call_count();
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn test_mock_transport_error() {
        let transport = MockTransport::default();
        transport.add_error("bad prompt", "service unavailable");

        let result = transport.chat("bad prompt");
        assert!(matches!(result, Err(ChatError::Other(ref m)) if m == "service unavailable"));
    }

    #[test]
    fn test_mock_transport_clone_shares_state() {
        let transport1 = MockTransport::new("test");
        let transport2 = transport1.clone();

        transport1.chat("test").unwrap();
        transport2.add_reply("late", "added");

        assert_eq!(transport1.call_count(), 1);
        assert_eq!(transport2.call_count(), 1);
        assert_eq!(transport1.chat("late").unwrap().into_text(), "added");
    }

    #[test]
    fn test_mock_transport_name() {
        assert_eq!(MockTransport::default().name(), "mock");
    }
}
