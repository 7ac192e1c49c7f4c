//! Discover command implementation.

use crate::cli::DiscoverArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fmt::Display;
use toolfinder_domain::ChatTransport;
use toolfinder_extractor::{Discovery, DiscoveryConfig, DiscoveryRequest, DiscoveryResult};

/// Execute the discover command.
pub async fn execute_discover<T>(
    args: DiscoverArgs,
    transport: T,
    config: DiscoveryConfig,
    formatter: &Formatter,
) -> Result<()>
where
    T: ChatTransport + Send + Sync + 'static,
    T::Error: Display,
{
    let result = discover(args, transport, config).await?;

    if formatter.format() == OutputFormat::Table {
        eprintln!(
            "{}",
            formatter.discovery_summary(&result.metadata, result.records.len())
        );
    }
    println!("{}", formatter.format_tools(&result.records)?);
    Ok(())
}

async fn discover<T>(
    args: DiscoverArgs,
    transport: T,
    config: DiscoveryConfig,
) -> Result<DiscoveryResult>
where
    T: ChatTransport + Send + Sync + 'static,
    T::Error: Display,
{
    let kind = args
        .discovery_kind()
        .ok_or_else(|| CliError::InvalidInput("search needs a non-empty query".into()))?;

    let mut request = DiscoveryRequest::new(kind);
    if let Some(count) = args.count {
        if count == 0 {
            return Err(CliError::InvalidInput("--count must be at least 1".into()));
        }
        request = request.with_count(count);
    }
    if let Some(category) = args.category {
        request = request.with_category(category);
    }

    let discovery = Discovery::new(transport, config)?;
    Ok(discovery.discover(request).await?)
}
