//! Stencil CLI entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stencil_cli::commands::{
    add_template, create_project, handle_config_command, list_templates, remove_template,
    show_template_info, validate_template, ConfigAction,
};

#[derive(Parser)]
#[command(name = "stencil")]
#[command(version, about = "Materialize project templates into ready-to-run projects", long_about = None)]
struct Cli {
    /// Enable debug logging (also honors RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates
    List,
    /// Create a new project from a template
    Create {
        /// Name of the template to use (interactive if not provided)
        template: Option<String>,
        /// Directory where the project will be created
        #[arg(short, long)]
        output: Option<String>,
        /// Template variable in key=value format (e.g., -v name=myapp -v author="Jo Doe")
        #[arg(short, long, value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
        /// Skip prompts and use defaults for missing values
        #[arg(short, long)]
        yes: bool,
        /// Preview the render plan without creating files
        #[arg(long)]
        dry_run: bool,
        /// Allow rendering into an existing non-empty directory
        #[arg(long)]
        force: bool,
    },
    /// Add a new template from a local path or git URL
    Add {
        /// Local path or git URL (use #path for a subdirectory, e.g. https://github.com/org/repo.git#templates/api)
        path: String,
        /// Name to register the template under
        name: String,
    },
    /// Show detailed information about a template
    Info {
        /// Name of the template
        template: String,
    },
    /// Remove a template
    Remove {
        /// Name of the template to remove
        template: String,
    },
    /// Validate a template's structure, manifest, and variable coverage
    Validate {
        /// Path to the template directory
        path: String,
    },
    /// Manage global configuration (saved defaults for variables)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s.split_once('=').ok_or_else(|| {
        anyhow::anyhow!("Invalid key=value pair: '{}'. Expected format: key=value", s)
    })?;
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "stencil_core=debug,stencil_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let templates_dir = PathBuf::from(".templates");

    match cli.command {
        Commands::List => list_templates(&templates_dir),
        Commands::Create {
            template,
            output,
            vars,
            yes,
            dry_run,
            force,
        } => create_project(&templates_dir, template, output, vars, yes, dry_run, force),
        Commands::Add { path, name } => add_template(&templates_dir, &path, &name),
        Commands::Info { template } => show_template_info(&templates_dir, &template),
        Commands::Remove { template } => remove_template(&templates_dir, &template),
        Commands::Validate { path } => validate_template(&path),
        Commands::Config { action } => handle_config_command(action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val_valid() {
        let result = parse_key_val("key=value").unwrap();
        assert_eq!(result, ("key".to_string(), "value".to_string()));
    }

    #[test]
    fn test_parse_key_val_with_equals_in_value() {
        let result = parse_key_val("key=val=ue").unwrap();
        assert_eq!(result, ("key".to_string(), "val=ue".to_string()));
    }

    #[test]
    fn test_parse_key_val_empty_value() {
        let result = parse_key_val("key=").unwrap();
        assert_eq!(result, ("key".to_string(), "".to_string()));
    }

    #[test]
    fn test_parse_key_val_invalid() {
        assert!(parse_key_val("invalid").is_err());
    }
}
