//! `stencil list` - enumerate available templates

use std::path::Path;

use anyhow::Result;

use stencil_core::{DirSource, TemplateSource};

use crate::output::OutputStyle;

/// List all templates found under `templates_dir`
pub fn list_templates(templates_dir: &Path) -> Result<()> {
    let style = OutputStyle::default();
    let source = DirSource::new(templates_dir);
    let templates = source.list_templates()?;

    if templates.is_empty() {
        println!("No templates found in {}", style.value(&templates_dir.display().to_string()));
        println!("Add one with: stencil add <path-or-url> <name>");
        return Ok(());
    }

    println!("Available templates:\n");
    for info in &templates {
        println!("  {}", style.name(&info.id));
        if !info.manifest.description.is_empty() {
            println!("    {}", style.dim(&info.manifest.description));
        }
        if !info.manifest.variables.is_empty() {
            let names: Vec<&str> = info
                .manifest
                .variables
                .iter()
                .map(|v| v.name.as_str())
                .collect();
            println!("    variables: {}", style.dim(&names.join(", ")));
        }
        println!();
    }

    Ok(())
}
