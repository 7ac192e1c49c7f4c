//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::ChatReply;

/// Trait for chat service operations
///
/// Implemented by the infrastructure layer (toolfinder-chat). Components that
/// need to ask a chat service something take a transport explicitly, so they
/// can be tested against a substitute.
pub trait ChatTransport {
    /// Error type for chat operations
    type Error;

    /// Send a prompt and wait for the reply
    fn chat(&self, prompt: &str) -> Result<ChatReply, Self::Error>;

    /// Short name of the transport, used in logs and result metadata
    fn name(&self) -> &str {
        "chat"
    }
}
