//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::io::{self, Read};
use toolfinder_extractor::{extract, ExtractionTier};
use tracing::debug;

/// Execute the extract command.
///
/// Reads from `--file` or, with `--stdin`, from standard input.
pub fn execute_extract(args: ExtractArgs, formatter: &Formatter) -> Result<()> {
    let raw = match (&args.file, args.stdin) {
        (Some(path), _) => fs::read_to_string(path)?,
        (None, true) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        (None, false) => {
            return Err(CliError::InvalidInput(
                "Either --file or --stdin must be specified".into(),
            ))
        }
    };
    debug!("Read {} bytes of reply text", raw.len());

    println!("{}", render_extraction(&raw, formatter)?);
    Ok(())
}

fn render_extraction(raw: &str, formatter: &Formatter) -> Result<String> {
    let extraction = extract(raw);

    if extraction.tier == ExtractionTier::Empty {
        eprintln!("{}", formatter.warning("No tools recognized in the reply"));
    } else {
        debug!(
            "Extracted {} tool(s) via {} tier",
            extraction.records.len(),
            extraction.tier
        );
    }

    formatter.format_tools(&extraction.records)
}
