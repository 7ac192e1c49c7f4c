//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;

/// Execute a profile action, returning whether the config changed.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<bool> {
    match args.action {
        ProfileAction::List => {
            let mut names: Vec<&String> = config.profiles.keys().collect();
            names.sort();
            for name in names {
                let marker = if *name == config.active_profile { "*" } else { " " };
                let profile = &config.profiles[name];
                println!("{} {} ({} @ {})", marker, name, profile.model, profile.endpoint);
            }
            Ok(false)
        }
        ProfileAction::Show => {
            let profile = config.get_active_profile()?;
            println!("Profile:  {}", config.active_profile);
            println!("Endpoint: {}", profile.endpoint);
            println!("Model:    {}", profile.model);
            Ok(false)
        }
        ProfileAction::Switch { name } => {
            config.switch_profile(name.clone())?;
            println!("{}", formatter.success(&format!("Switched to profile '{}'", name)));
            Ok(true)
        }
        ProfileAction::Set {
            name,
            endpoint,
            model,
        } => {
            config.set_profile(name.clone(), Profile { endpoint, model });
            println!("{}", formatter.success(&format!("Saved profile '{}'", name)));
            Ok(true)
        }
        ProfileAction::Delete { name } => {
            config.delete_profile(&name)?;
            println!("{}", formatter.success(&format!("Deleted profile '{}'", name)));
            Ok(true)
        }
    }
}
