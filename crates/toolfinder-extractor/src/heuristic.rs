//! Heuristic extraction: tool listings written as plain text
//!
//! Walks the reply line by line. Entry lines (numbered, bulleted, shouted in
//! capitals, or a lone `Heading:`) open a new record; keyword lines such as
//! `Website: ...` fill its fields; anything else accumulates into its
//! description.

use regex::Regex;
use std::sync::OnceLock;
use toolfinder_domain::tool::{
    fallback_id, DEFAULT_CATEGORY, DEFAULT_COMPANY, DEFAULT_DESCRIPTION, DEFAULT_LOGO_URL,
    DEFAULT_URL,
};
use toolfinder_domain::{Pricing, ToolRecord};
use tracing::debug;

/// Record fields that keyword lines can set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Description,
    Url,
    Category,
    Pricing,
    Company,
}

/// Recognized keywords, matched case-insensitively anywhere in a line
const FIELD_KEYWORDS: &[(&str, Field)] = &[
    ("description:", Field::Description),
    ("website:", Field::Url),
    ("url:", Field::Url),
    ("link:", Field::Url),
    ("category:", Field::Category),
    ("type:", Field::Category),
    ("pricing:", Field::Pricing),
    ("price:", Field::Pricing),
    ("cost:", Field::Pricing),
    ("company:", Field::Company),
    ("developed by:", Field::Company),
    ("creator:", Field::Company),
];

/// How a single trimmed, non-empty line reads
#[derive(Debug, PartialEq)]
enum Line<'a> {
    /// Opens a new record
    Entry {
        name: String,
        description: Option<String>,
    },
    /// Sets a field on the open record
    Field(Field, &'a str),
    /// Free text for the open record's description
    Text(&'a str),
}

/// A record under construction
#[derive(Debug, Default)]
struct Partial {
    name: String,
    description: Option<String>,
    url: Option<String>,
    category: Option<String>,
    pricing: Option<String>,
    company: Option<String>,
}

impl Partial {
    fn opened(name: String, description: Option<String>) -> Self {
        Self {
            name,
            description,
            ..Self::default()
        }
    }

    fn apply(&mut self, field: Field, value: &str) {
        if value.is_empty() {
            return;
        }
        let value = value.to_string();
        match field {
            Field::Description => self.description = Some(value),
            Field::Url => self.url = Some(value),
            Field::Category => self.category = Some(value.to_lowercase()),
            Field::Pricing => self.pricing = Some(value),
            Field::Company => self.company = Some(value),
        }
    }

    fn append(&mut self, text: &str) {
        match &mut self.description {
            Some(description) if !description.is_empty() => {
                description.push(' ');
                description.push_str(text);
            }
            _ => self.description = Some(text.to_string()),
        }
    }

    /// Turn into a complete record, with every field defaulted
    fn finish(self, id: String, now: &str) -> ToolRecord {
        let mut record = ToolRecord::new(id, self.name);
        record.description = Some(
            self.description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        );
        record.url = Some(self.url.unwrap_or_else(|| DEFAULT_URL.to_string()));
        record.logo_url = Some(DEFAULT_LOGO_URL.to_string());
        record.category = Some(self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()));
        record.pricing = Some(self.pricing.map(Pricing::Label).unwrap_or_else(Pricing::unknown));
        record.company = Some(self.company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()));
        record.trending = Some(true);
        record.created = Some(now.to_string());
        record.updated = Some(now.to_string());
        record
    }
}

/// Extract records from a plain-text listing
///
/// `now` stamps `created`/`updated` on every record. Ids are sequential
/// fallbacks in order of appearance.
pub(crate) fn parse_heuristic(raw: &str, now: &str) -> Vec<ToolRecord> {
    let mut records = Vec::new();
    let mut current: Option<Partial> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match classify(line) {
            Line::Entry { name, description } => {
                if let Some(done) = current.take() {
                    finalize(done, &mut records, now);
                }
                current = Some(Partial::opened(name, description));
            }
            Line::Field(field, value) => {
                if let Some(partial) = current.as_mut() {
                    partial.apply(field, value);
                }
            }
            Line::Text(text) => {
                if let Some(partial) = current.as_mut() {
                    partial.append(text);
                }
            }
        }
    }

    if let Some(done) = current.take() {
        finalize(done, &mut records, now);
    }

    records
}

fn finalize(partial: Partial, records: &mut Vec<ToolRecord>, now: &str) {
    if partial.name.is_empty() {
        debug!("Dropping unnamed entry");
        return;
    }
    let id = fallback_id(records.len() + 1);
    records.push(partial.finish(id, now));
}

fn classify(line: &str) -> Line<'_> {
    if let Some(rest) = strip_list_prefix(line) {
        let (name, description) = split_entry(rest);
        return Line::Entry { name, description };
    }

    if is_shouted(line) || is_heading(line) {
        return Line::Entry {
            name: clean_name(&line.replace(':', "")),
            description: None,
        };
    }

    match field_of(line) {
        Some(field) => {
            let value = line.split_once(':').map(|(_, v)| v.trim()).unwrap_or("");
            Line::Field(field, value)
        }
        None => Line::Text(line),
    }
}

/// Text after an ordinal (`1.` / `1)`) or bullet glyph, when the line has one
fn strip_list_prefix(line: &str) -> Option<&str> {
    static ORDINAL: OnceLock<Regex> = OnceLock::new();
    static BULLET: OnceLock<Regex> = OnceLock::new();
    let ordinal = ORDINAL.get_or_init(|| Regex::new(r"^\d+[.)](?:\s+(.*))?$").unwrap());
    let bullet = BULLET.get_or_init(|| Regex::new(r"^[-*•◦▪‣](?:\s+(.*))?$").unwrap());

    [ordinal, bullet].into_iter().find_map(|re| {
        re.captures(line)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
    })
}

/// Whole line in capitals, with at least one letter
fn is_shouted(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase)
}

/// A lone `Capitalized Words:` line
fn is_heading(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[A-Z][A-Za-z0-9'&.-]*(?:\s+[A-Z][A-Za-z0-9'&.-]*)*:$").unwrap()
    });
    re.is_match(line)
}

/// Split `Name: summary` into the name and an optional seed description
///
/// Only a colon followed by whitespace (or ending the line) separates the
/// two, so URLs in the name line stay intact.
fn split_entry(rest: &str) -> (String, Option<String>) {
    let separator = rest.char_indices().find(|&(idx, c)| {
        c == ':'
            && rest[idx + 1..]
                .chars()
                .next()
                .map_or(true, char::is_whitespace)
    });

    match separator {
        Some((idx, _)) => {
            let tail = rest[idx + 1..].trim();
            let description = (!tail.is_empty()).then(|| tail.to_string());
            (clean_name(&rest[..idx]), description)
        }
        None => (clean_name(rest), None),
    }
}

fn clean_name(name: &str) -> String {
    name.trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
        .to_string()
}

/// The field named by the earliest keyword in the line
fn field_of(line: &str) -> Option<Field> {
    let lower = line.to_lowercase();
    FIELD_KEYWORDS
        .iter()
        .filter_map(|&(keyword, field)| lower.find(keyword).map(|pos| (pos, field)))
        .min_by_key(|&(pos, _)| pos)
        .map(|(_, field)| field)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2026-10-19T00:00:00.000Z";

    #[test]
    fn test_two_tool_listing() {
        let raw = "1. CodeHelper: A tool for writing code.\n\
                   Website: https://codehelper.example\n\
                   Category: Coding\n\
                   Pricing: Free\n\
                   2. ImageGen\n\
                   Description: Generates images from prompts.";

        let records = parse_heuristic(raw, NOW);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "ai-tool-1");
        assert_eq!(first.name, "CodeHelper");
        assert_eq!(first.description.as_deref(), Some("A tool for writing code."));
        assert_eq!(first.url.as_deref(), Some("https://codehelper.example"));
        assert_eq!(first.category.as_deref(), Some("coding"));
        assert_eq!(first.pricing, Some(Pricing::Label("Free".into())));
        assert_eq!(first.company.as_deref(), Some(DEFAULT_COMPANY));
        assert_eq!(first.trending, Some(true));
        assert_eq!(first.created.as_deref(), Some(NOW));
        assert_eq!(first.updated.as_deref(), Some(NOW));

        let second = &records[1];
        assert_eq!(second.id, "ai-tool-2");
        assert_eq!(second.name, "ImageGen");
        assert_eq!(second.description.as_deref(), Some("Generates images from prompts."));
        assert_eq!(second.url.as_deref(), Some("#"));
        assert_eq!(second.category.as_deref(), Some("general"));
        assert_eq!(second.pricing, Some(Pricing::unknown()));
        assert_eq!(second.logo_url.as_deref(), Some(DEFAULT_LOGO_URL));
    }

    #[test]
    fn test_no_markers_yields_nothing() {
        let raw = "I could not find any tools.\nWebsite: https://nowhere.example\nTry again.";
        assert!(parse_heuristic(raw, NOW).is_empty());
    }

    #[test]
    fn test_lines_before_first_entry_are_ignored() {
        let raw = "Here are some options you might like.\n1) Writer\nDrafts blog posts.";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description.as_deref(), Some("Drafts blog posts."));
    }

    #[test]
    fn test_multiline_description_accumulates() {
        let raw = "- Summarizer\nCondenses long documents.\n\nWorks with PDFs.\n- Next";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(
            records[0].description.as_deref(),
            Some("Condenses long documents. Works with PDFs.")
        );
        assert_eq!(records[1].name, "Next");
        assert_eq!(records[1].description.as_deref(), Some(DEFAULT_DESCRIPTION));
    }

    #[test]
    fn test_free_text_extends_seeded_description() {
        let raw = "1. Tool: Short summary.\nMore detail here.";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(
            records[0].description.as_deref(),
            Some("Short summary. More detail here.")
        );
    }

    #[test]
    fn test_unnamed_entries_are_dropped() {
        let raw = "1.\nSome text\n2. Named\n-\n";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Named");
        assert_eq!(records[0].id, "ai-tool-1");
    }

    #[test]
    fn test_shouted_and_heading_entries() {
        let raw = "CHATGPT\nConversational assistant.\nMidjourney Art:\nCategory: Image";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "CHATGPT");
        assert_eq!(records[1].name, "Midjourney Art");
        assert_eq!(records[1].category.as_deref(), Some("image"));
    }

    #[test]
    fn test_rules_and_numbers_are_not_entries() {
        assert_eq!(classify("---"), Line::Text("---"));
        assert_eq!(classify("2024"), Line::Text("2024"));
        assert_eq!(classify("3.5x faster than before"), Line::Text("3.5x faster than before"));
    }

    #[test]
    fn test_field_value_keeps_later_colons() {
        let raw = "1. Tool\nWebsite: https://tool.example:8080/path";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(records[0].url.as_deref(), Some("https://tool.example:8080/path"));
    }

    #[test]
    fn test_earliest_keyword_governs() {
        assert_eq!(field_of("Pricing: free tier, type: saas"), Some(Field::Pricing));
        assert_eq!(field_of("Type: saas, pricing: free"), Some(Field::Category));
        assert_eq!(field_of("Developed by: Acme"), Some(Field::Company));
        assert_eq!(field_of("LINK: x"), Some(Field::Url));
        assert_eq!(field_of("nothing here"), None);
    }

    #[test]
    fn test_keyword_value_is_after_first_colon_of_line() {
        // The value starts after the first colon, not after the keyword
        let raw = "1. Tool\nNote: see website: tool.example";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(records[0].url.as_deref(), Some("see website: tool.example"));
    }

    #[test]
    fn test_company_aliases() {
        let raw = "1. A\nCreator: Jane\n2. B\nDeveloped by: Acme Labs\n3. C\nCompany: Big Co";
        let companies: Vec<_> = parse_heuristic(raw, NOW)
            .into_iter()
            .map(|r| r.company.unwrap_or_default())
            .collect();
        assert_eq!(companies, vec!["Jane", "Acme Labs", "Big Co"]);
    }

    #[test]
    fn test_empty_field_value_is_ignored() {
        let raw = "1. Tool\nurl:\nprice:   ";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(records[0].url.as_deref(), Some(DEFAULT_URL));
        assert_eq!(records[0].pricing, Some(Pricing::unknown()));
    }

    #[test]
    fn test_entry_name_cleanup() {
        assert_eq!(
            split_entry("**CodeHelper**: Writes code"),
            ("CodeHelper".to_string(), Some("Writes code".to_string()))
        );
        assert_eq!(split_entry("CodeHelper:"), ("CodeHelper".to_string(), None));
        assert_eq!(
            split_entry("CodeHelper (https://codehelper.example)"),
            ("CodeHelper (https://codehelper.example)".to_string(), None)
        );
    }

    #[test]
    fn test_bullet_glyphs() {
        for line in ["- Alpha", "* Alpha", "• Alpha", "◦ Alpha", "▪ Alpha", "‣ Alpha"] {
            assert_eq!(
                classify(line),
                Line::Entry {
                    name: "Alpha".to_string(),
                    description: None
                },
                "line {:?}",
                line
            );
        }
        // Emphasis is not a bullet
        assert_eq!(classify("**bold** text"), Line::Text("**bold** text"));
    }

    #[test]
    fn test_windows_line_endings() {
        let raw = "1. Tool\r\nCategory: Audio\r\n";
        let records = parse_heuristic(raw, NOW);
        assert_eq!(records[0].category.as_deref(), Some("audio"));
    }
}
