//! `stencil config` - manage saved variable defaults

use anyhow::Result;
use clap::Subcommand;

use crate::global_config::{get_config_path, load_global_config, save_global_config, GlobalConfig};
use crate::output::OutputStyle;

/// Subcommands for `stencil config`
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show all saved defaults
    List,
    /// Show the saved default for one variable
    Get {
        /// Variable name
        key: String,
    },
    /// Save a default value for a variable
    Set {
        /// Variable name
        key: String,
        /// Default value
        value: String,
    },
    /// Remove a saved default
    Unset {
        /// Variable name
        key: String,
    },
    /// Remove all saved defaults
    Reset,
}

/// Dispatch a `stencil config` subcommand
pub fn handle_config_command(action: ConfigAction) -> Result<()> {
    let style = OutputStyle::default();

    match action {
        ConfigAction::List => {
            let config = load_global_config();
            if config.defaults.is_empty() {
                println!("No defaults saved. Set one with: stencil config set <key> <value>");
                return Ok(());
            }
            println!("Saved defaults ({}):", style.dim(&get_config_path().display().to_string()));
            let mut entries: Vec<_> = config.defaults.iter().collect();
            entries.sort_by_key(|(k, _)| k.as_str());
            for (key, value) in entries {
                println!("  {} = {}", style.var(key), value);
            }
        }
        ConfigAction::Get { key } => {
            let config = load_global_config();
            match config.defaults.get(&key) {
                Some(value) => println!("{}", value),
                None => anyhow::bail!("No saved default for '{}'", key),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_global_config();
            config.defaults.insert(key.clone(), value);
            save_global_config(&config)?;
            println!("{}", style.success(&format!("Saved default for '{}'", key)));
        }
        ConfigAction::Unset { key } => {
            let mut config = load_global_config();
            if config.defaults.remove(&key).is_none() {
                anyhow::bail!("No saved default for '{}'", key);
            }
            save_global_config(&config)?;
            println!("{}", style.success(&format!("Removed default for '{}'", key)));
        }
        ConfigAction::Reset => {
            save_global_config(&GlobalConfig::default())?;
            println!("{}", style.success("Cleared all saved defaults"));
        }
    }
    Ok(())
}
