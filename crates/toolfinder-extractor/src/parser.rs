//! Turn chat replies into tool records
//!
//! Two tiers, tried in order: a JSON payload in the reply (structured), then
//! line heuristics over the plain text. Neither tier can fail the call; the
//! worst outcome is an empty batch.

use crate::heuristic::parse_heuristic;
use crate::structured::parse_structured;
use crate::types::{Extraction, ExtractionTier};
use chrono::{SecondsFormat, Utc};
use std::collections::HashSet;
use toolfinder_domain::tool::fallback_id;
use toolfinder_domain::ToolRecord;
use tracing::{debug, warn};

/// Extract tool records from a chat reply
///
/// Records come back in order of appearance. An empty batch is the normal
/// "nothing found" outcome, not an error.
///
/// # Examples
///
/// ```
/// use toolfinder_extractor::extract_tools;
///
/// let tools = extract_tools("```json\n[{\"id\":\"x1\",\"name\":\"Foo\"}]\n```");
/// assert_eq!(tools.len(), 1);
/// assert_eq!(tools[0].id, "x1");
/// assert!(tools[0].description.is_none());
///
/// let tools = extract_tools("1. CodeHelper: Writes code\nCategory: Coding");
/// assert_eq!(tools[0].category.as_deref(), Some("coding"));
/// ```
pub fn extract_tools(raw: &str) -> Vec<ToolRecord> {
    extract(raw).records
}

/// Extract tool records and report which tier produced them
pub fn extract(raw: &str) -> Extraction {
    let mut records = parse_structured(raw);
    let mut tier = ExtractionTier::Structured;

    if records.is_empty() {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        records = parse_heuristic(raw, &now);
        tier = ExtractionTier::Heuristic;
    }

    if records.is_empty() {
        debug!("No tools could be extracted from reply ({} chars)", raw.len());
        return Extraction {
            records,
            tier: ExtractionTier::Empty,
        };
    }

    assign_ids(&mut records);
    debug!("Extracted {} tools via {} tier", records.len(), tier);

    Extraction { records, tier }
}

/// Give every record a batch-unique id
///
/// Records without an id, and records repeating an id already used earlier
/// in the batch, get the next free `ai-tool-<n>`. Generated ids never take a
/// value that some record in the batch supplied itself.
pub(crate) fn assign_ids(records: &mut [ToolRecord]) {
    let supplied: HashSet<String> = records
        .iter()
        .filter(|r| r.has_id())
        .map(|r| r.id.clone())
        .collect();
    let mut used = HashSet::with_capacity(records.len());
    let mut counter = 0;

    for record in records.iter_mut() {
        if record.has_id() {
            if used.insert(record.id.clone()) {
                continue;
            }
            warn!("Duplicate id '{}' for '{}', re-keying", record.id, record.name);
        }

        let id = loop {
            counter += 1;
            let candidate = fallback_id(counter);
            if !supplied.contains(&candidate) && !used.contains(&candidate) {
                break candidate;
            }
        };
        used.insert(id.clone());
        record.id = id;
    }
}
