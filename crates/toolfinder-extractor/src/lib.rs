//! Toolfinder Extractor
//!
//! Turns free-form chat replies into structured tool records, and drives the
//! chat round trip that produces those replies.
//!
//! # Overview
//!
//! Chat services answer a "list some AI tools" prompt in many shapes: a
//! fenced JSON block, bare JSON, or a numbered plain-text list. The
//! extraction pipeline handles all of them in two tiers:
//!
//! 1. **Structured**: parse the JSON payload strictly; fields are kept as-is.
//! 2. **Heuristic**: walk the text line by line, opening a record at each
//!    numbered/bulleted/heading line and filling fields from keyword lines;
//!    every field gets a default.
//!
//! Extraction never fails. A reply with nothing recognizable yields an empty
//! batch, and every recovered problem is reported through `tracing`.
//!
//! # Architecture
//!
//! ```text
//! DiscoveryRequest → PromptBuilder → ChatTransport → extract → Vec<ToolRecord>
//!                                                         ↘ BatchCache
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use toolfinder_chat::MockTransport;
//! use toolfinder_extractor::{Discovery, DiscoveryConfig, DiscoveryKind, DiscoveryRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = MockTransport::new("1. CodeHelper: Writes code\nCategory: Coding");
//! let discovery = Discovery::new(transport, DiscoveryConfig::default())?;
//!
//! let result = discovery
//!     .discover(DiscoveryRequest::new(DiscoveryKind::Trending).with_count(5))
//!     .await?;
//!
//! for tool in &result.records {
//!     println!("{} ({})", tool.name, tool.id);
//! }
//! println!("Tier: {}", result.metadata.tier);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod discovery;
mod error;
mod heuristic;
mod parser;
mod prompt;
mod structured;
mod types;


pub use config::DiscoveryConfig;
pub use discovery::Discovery;
pub use error::ExtractorError;
pub use parser::{extract, extract_tools};
pub use prompt::{DiscoveryKind, PromptBuilder};
pub use types::{
    DiscoveryMetadata, DiscoveryRequest, DiscoveryResult, Extraction, ExtractionTier,
};
