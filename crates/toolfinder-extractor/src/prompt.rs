//! Prompt engineering for tool discovery

use std::fmt;

/// What kind of tool listing to ask the chat service for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryKind {
    /// A short list of standout tools across categories
    Featured,
    /// Tools that are popular right now
    Trending,
    /// Tools released in the past week
    New,
    /// Tools matching a free-form query
    Search(String),
}

impl DiscoveryKind {
    /// Number of tools asked for when the request does not say
    pub fn default_count(&self) -> usize {
        match self {
            DiscoveryKind::Featured => 5,
            DiscoveryKind::Trending => 20,
            DiscoveryKind::New => 20,
            DiscoveryKind::Search(_) => 10,
        }
    }

    /// Short label for logs and metadata
    pub fn label(&self) -> &'static str {
        match self {
            DiscoveryKind::Featured => "featured",
            DiscoveryKind::Trending => "trending",
            DiscoveryKind::New => "new",
            DiscoveryKind::Search(_) => "search",
        }
    }
}

impl fmt::Display for DiscoveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryKind::Search(query) => write!(f, "search \"{}\"", query),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// Builds prompts that ask a chat service for tool listings
pub struct PromptBuilder {
    kind: DiscoveryKind,
    count: usize,
    category: Option<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(kind: DiscoveryKind) -> Self {
        let count = kind.default_count();
        Self {
            kind,
            count,
            category: None,
        }
    }

    /// Ask for a specific number of tools (at least one)
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.max(1);
        self
    }

    /// Focus on a single category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let category = category.trim();
        self.category = (!category.is_empty()).then(|| category.to_string());
        self
    }

    /// Build the complete discovery prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. What to research
        prompt.push_str(&self.task());
        prompt.push_str("\n\n");

        // 2. Optional category focus
        if let Some(category) = &self.category {
            prompt.push_str(&format!(
                "Only include tools whose main category is {}.\n\n",
                category
            ));
        } else {
            prompt.push_str(DIVERSITY_HINT);
            prompt.push_str("\n\n");
        }

        // 3. Details to gather and the record shape
        prompt.push_str(DETAIL_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(RECORD_SCHEMA);
        prompt.push_str("\n\n");

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    fn task(&self) -> String {
        let n = self.count;
        match &self.kind {
            DiscoveryKind::Featured => {
                format!("Research and list the top {} featured AI tools available today.", n)
            }
            DiscoveryKind::Trending => {
                format!("Research and list the top {} trending AI tools right now.", n)
            }
            DiscoveryKind::New => format!(
                "Research and list {} AI tools that were newly released in the past week.",
                n
            ),
            DiscoveryKind::Search(query) => format!(
                "Research and list up to {} AI tools that best match this request: \"{}\".",
                n,
                query.trim()
            ),
        }
    }
}

const DIVERSITY_HINT: &str = "Cover a diverse range of categories such as coding assistants, \
design tools, automation, productivity and data analytics.";

const DETAIL_INSTRUCTIONS: &str = r#"For each tool, gather:
- its primary use case and target audience
- key features and standout functionality
- pricing, company, country of origin and tags when available
- whether it is trending and whether it is featured
- its pros and cons"#;

const RECORD_SCHEMA: &str = r#"Each tool must be a JSON object with these fields:

{
  "id": "unique identifier",
  "name": "tool name",
  "description": "one or two sentences on use case, audience and what sets it apart",
  "category": "main category, e.g. Coding, Design, Automation",
  "subcategory": "optional narrower category",
  "url": "official website",
  "logoUrl": "logo image URL",
  "pricing": [{"type": "free or premium", "plan": "plan name", "cost": "price"}],
  "company": "company behind the tool",
  "origin": "country or region",
  "trending": true,
  "featured": false,
  "tags": ["tag"],
  "features": ["feature"],
  "pros": ["strength"],
  "cons": ["weakness"],
  "created": "ISO-8601 timestamp",
  "updated": "ISO-8601 timestamp"
}

Use null or an empty list for details that are not available."#;

const OUTPUT_FORMAT_REMINDER: &str = "Output format: a JSON array of tool objects only, with no \
commentary before or after it.";
