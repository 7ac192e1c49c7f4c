//! Toolfinder Domain Layer
//!
//! This crate holds the canonical record schema for the Toolfinder directory
//! and the trait boundary to the chat service that generates tool listings.
//! It depends on nothing but `serde`, and every other crate in the workspace
//! builds on the types defined here.
//!
//! ## Key Concepts
//!
//! - **ToolRecord**: one AI tool, as extracted from a chat reply
//! - **Pricing**: either a free-text label or a list of structured plans
//! - **ChatReply**: the two shapes a chat service answers with
//! - **ChatTransport**: the capability for sending a prompt to a chat service
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Transport implementations live in `toolfinder-chat`
//! - Extraction lives in `toolfinder-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod reply;
pub mod tool;
pub mod traits;

// Re-exports for convenience
pub use reply::{ChatMessage, ChatReply};
pub use tool::{PlanKind, Pricing, PricingPlan, ToolRecord};
pub use traits::ChatTransport;
