//! Toolfinder CLI - Discover AI tools through a chat service.

use clap::Parser;
use toolfinder_chat::OllamaTransport;
use toolfinder_cli::commands;
use toolfinder_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> toolfinder_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &formatter)?;
        }
        Command::Discover(args) => {
            let profile = config.resolve_profile(cli.profile.as_deref())?;
            let endpoint = cli.endpoint.unwrap_or_else(|| profile.endpoint.clone());
            let model = cli.model.unwrap_or_else(|| profile.model.clone());
            let discovery_config = config.discovery.to_config();
            let transport = OllamaTransport::new(endpoint, model)
                .with_timeout(discovery_config.chat_timeout());

            commands::execute_discover(args, transport, discovery_config, &formatter).await?;
        }
        // Profile management always acts on the saved active profile
        Command::Profile(args) => {
            if commands::execute_profile(args, &mut config, &formatter)? {
                config.save_to(&config_path)?;
            }
        }
    }

    Ok(())
}
