//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use toolfinder_domain::ToolRecord;
use toolfinder_extractor::DiscoveryMetadata;

/// Longest description shown in a table cell.
const DESCRIPTION_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a batch of tool records.
    pub fn format_tools(&self, tools: &[ToolRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(tools)?),
            OutputFormat::Table => Ok(self.format_tools_table(tools)),
            OutputFormat::Quiet => Ok(Self::format_tools_quiet(tools)),
        }
    }

    fn format_tools_table(&self, tools: &[ToolRecord]) -> String {
        if tools.is_empty() {
            return self.colorize("No tools found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Category", "Pricing", "Description", "URL"]);

        for tool in tools {
            let pricing = tool
                .pricing
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            builder.push_record([
                tool.id.clone(),
                tool.name.clone(),
                tool.category.clone().unwrap_or_default(),
                pricing,
                truncate(tool.description.as_deref().unwrap_or_default(), DESCRIPTION_WIDTH),
                tool.url.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Names only, one per line.
    fn format_tools_quiet(tools: &[ToolRecord]) -> String {
        tools
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line summary of a discovery run.
    pub fn discovery_summary(&self, metadata: &DiscoveryMetadata, count: usize) -> String {
        self.info(&format!(
            "{} {} tool(s) from {} ({} tier) in {}ms",
            count, metadata.kind, metadata.transport, metadata.tier, metadata.processing_time_ms
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
