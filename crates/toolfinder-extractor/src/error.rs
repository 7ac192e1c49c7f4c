//! Error types for discovery
//!
//! Extraction itself never fails; these cover the chat round trip around it.

use thiserror::Error;

/// Errors that can occur during discovery
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Chat transport error
    #[error("Chat error: {0}")]
    Chat(String),

    /// Chat call did not finish in time
    #[error("Chat timeout")]
    Timeout,

    /// Reply exceeds the configured maximum length
    #[error("Reply too long: {0} chars (max: {1})")]
    ReplyTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blocking chat task failed to complete
    #[error("Task join error: {0}")]
    Join(String),
}
