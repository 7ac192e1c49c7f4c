//! Request and response types for extraction and discovery

use crate::prompt::DiscoveryKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use toolfinder_domain::ToolRecord;

/// Which extraction strategy produced a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionTier {
    /// Parsed from a JSON payload in the reply
    Structured,
    /// Assembled line by line from plain text
    Heuristic,
    /// Nothing could be extracted
    Empty,
}

impl fmt::Display for ExtractionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionTier::Structured => write!(f, "structured"),
            ExtractionTier::Heuristic => write!(f, "heuristic"),
            ExtractionTier::Empty => write!(f, "empty"),
        }
    }
}

/// Records extracted from one reply, with the tier that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Records in order of appearance
    pub records: Vec<ToolRecord>,

    /// Strategy that produced the records
    pub tier: ExtractionTier,
}

/// Request to discover tools through a chat service
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    /// What to ask for
    pub kind: DiscoveryKind,

    /// Number of tools to ask for (defaults per kind)
    pub count: Option<usize>,

    /// Optional category focus
    pub category: Option<String>,

    /// Skip the cache and ask again
    pub force_refresh: bool,
}

impl DiscoveryRequest {
    /// Create a request with the kind's defaults
    pub fn new(kind: DiscoveryKind) -> Self {
        Self {
            kind,
            count: None,
            category: None,
            force_refresh: false,
        }
    }

    /// Ask for a specific number of tools
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Focus the request on one category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Bypass the cache
    pub fn refresh(mut self) -> Self {
        self.force_refresh = true;
        self
    }
}

/// Result of a discovery operation
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    /// Extracted records; empty means nothing was found
    pub records: Vec<ToolRecord>,

    /// Metadata about the discovery
    pub metadata: DiscoveryMetadata,
}

/// Metadata about a discovery operation
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryMetadata {
    /// Label of the discovery kind
    pub kind: String,

    /// Name of the chat transport used
    pub transport: String,

    /// Length of the normalized reply in characters (0 on cache hits)
    pub reply_length: usize,

    /// Strategy that produced the records
    pub tier: ExtractionTier,

    /// Whether the batch came from the cache
    pub from_cache: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// ISO-8601 time the result was produced
    pub timestamp: String,
}
