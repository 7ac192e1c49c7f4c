//! Structured extraction: JSON payloads inside a reply

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use toolfinder_domain::ToolRecord;
use tracing::{debug, warn};

/// Locate the JSON payload in a reply
///
/// Prefers the first ```` ```json ```` fenced block. Without one, a reply
/// that is itself a bare JSON array or object is taken whole.
pub(crate) fn find_json_payload(raw: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?is)```json\b(.*?)```").unwrap());

    if let Some(caps) = re.captures(raw) {
        return caps.get(1).map(|m| m.as_str().trim());
    }

    let trimmed = raw.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Some(trimmed);
    }

    None
}

/// Parse the reply's JSON payload into records
///
/// Returns an empty batch when there is no payload, when it is not valid
/// JSON, or when it is neither an array nor an object; the caller then falls
/// back to line heuristics. Fields are taken as-is, with no defaults.
pub(crate) fn parse_structured(raw: &str) -> Vec<ToolRecord> {
    let Some(payload) = find_json_payload(raw) else {
        debug!("No JSON payload found in reply");
        return Vec::new();
    };

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            warn!("JSON payload did not parse, falling back to heuristics: {}", e);
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            warn!(
                "JSON payload is neither an array nor an object ({}), ignoring it",
                json_kind(&other)
            );
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!("Item {} is a JSON {}, not an object; skipping", idx, json_kind(&item));
            continue;
        }

        match serde_json::from_value::<ToolRecord>(item) {
            Ok(record) if record.has_name() => records.push(record),
            Ok(_) => warn!("Item {} has no name; skipping", idx),
            Err(e) => warn!("Failed to parse item {}: {}", idx, e),
        }
    }

    records
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolfinder_domain::Pricing;

    #[test]
    fn test_fenced_array_copied_verbatim() {
        let raw = "```json\n[{\"id\":\"x1\",\"name\":\"Foo\"}]\n```";
        let records = parse_structured(raw);
        assert_eq!(records, vec![ToolRecord::new("x1", "Foo")]);
    }

    #[test]
    fn test_fenced_block_surrounded_by_prose() {
        let raw = r#"Sure! Here are the tools you asked for:

```json
[
  {"id": "a", "name": "Alpha", "category": "Coding", "pricing": "Free"},
  {"id": "b", "name": "Beta", "trending": false}
]
```

Let me know if you need more."#;

        let records = parse_structured(raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alpha");
        // No lower-casing or defaults on the structured path
        assert_eq!(records[0].category.as_deref(), Some("Coding"));
        assert_eq!(records[0].pricing, Some(Pricing::Label("Free".into())));
        assert_eq!(records[1].trending, Some(false));
        assert!(records[1].url.is_none());
    }

    #[test]
    fn test_fenced_object_wrapped() {
        let raw = "```json\n{\"id\":\"solo\",\"name\":\"Solo\"}\n```";
        let records = parse_structured(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "solo");
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let raw = "```JSON\n[{\"name\":\"Upper\"}]\n```";
        assert_eq!(parse_structured(raw).len(), 1);
    }

    #[test]
    fn test_fence_on_one_line() {
        let raw = "```json[{\"name\":\"Inline\"}]```";
        assert_eq!(parse_structured(raw)[0].name, "Inline");
    }

    #[test]
    fn test_bare_json_reply() {
        let raw = "  [{\"name\":\"Bare\",\"url\":\"https://bare.example\"}]  ";
        let records = parse_structured(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url.as_deref(), Some("https://bare.example"));
    }

    #[test]
    fn test_invalid_json_yields_nothing() {
        let raw = "```json\n[{\"name\": \"Broken\",]\n```";
        assert!(parse_structured(raw).is_empty());
    }

    #[test]
    fn test_scalar_payload_yields_nothing() {
        assert!(parse_structured("```json\n\"just a string\"\n```").is_empty());
        assert!(parse_structured("```json\n42\n```").is_empty());
    }

    #[test]
    fn test_unmarked_fence_is_not_structured() {
        let raw = "Here you go:\n```\n[{\"name\":\"Nope\"}]\n```";
        assert!(find_json_payload(raw).is_none());
    }

    #[test]
    fn test_skips_items_without_name_or_not_objects() {
        let raw = r#"```json
[{"name": "Keep"}, {"id": "no-name"}, {"name": "  "}, "text", 3, {"name": "Also"}]
```"#;
        let records = parse_structured(raw);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Keep", "Also"]);
    }

    #[test]
    fn test_skips_items_with_wrong_field_types() {
        let raw = r#"```json
[{"name": "Good"}, {"name": "Bad", "tags": "not-a-list"}]
```"#;
        let records = parse_structured(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Good");
    }

    #[test]
    fn test_null_details_keep_the_record() {
        let raw = r#"```json
[
  {"name": "Alpha", "pricing": [{"type": null, "plan": "Pro", "cost": "$20"}]},
  {"name": "Beta", "pricing": [{"plan": "Team", "cost": "$30"}]},
  {"name": "Gamma", "tags": ["x", null], "features": null}
]
```"#;
        let records = parse_structured(raw);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(records[0].pricing.as_ref().unwrap().to_string(), "Pro: $20");
        assert_eq!(records[2].tags, Some(vec!["x".to_string()]));
        assert!(records[2].features.is_none());
    }

    #[test]
    fn test_first_fenced_block_wins() {
        let raw = "```json\n[{\"name\":\"First\"}]\n```\n```json\n[{\"name\":\"Second\"}]\n```";
        let records = parse_structured(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "First");
    }
}
