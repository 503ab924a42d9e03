//! `stencil info` - show template details

use std::path::Path;

use anyhow::Result;

use stencil_core::{DirSource, TemplateSource};

use crate::output::OutputStyle;

/// Show detailed information about a registered template
pub fn show_template_info(templates_dir: &Path, template: &str) -> Result<()> {
    let style = OutputStyle::default();
    let source = DirSource::new(templates_dir);
    let tree = source.open(template)?;
    let manifest = &tree.manifest;

    println!("Template: {}", style.name(&manifest.name));
    if !manifest.description.is_empty() {
        println!("  {}", manifest.description);
    }
    println!("  path: {}", style.dim(&tree.root.display().to_string()));

    if manifest.variables.is_empty() {
        println!("\nNo variables declared.");
    } else {
        println!("\nVariables:");
        for var in &manifest.variables {
            let requirement = if var.is_required() {
                style.warning("required")
            } else {
                style.dim(&format!(
                    "default: {}",
                    var.default.as_deref().unwrap_or("")
                ))
            };
            println!("  {} ({})", style.var(&var.name), requirement);
            if !var.description.is_empty() {
                println!("    {}", style.dim(&var.description));
            }
            if !var.choices.is_empty() {
                println!("    choices: {}", style.dim(&var.choices.join(", ")));
            }
        }
    }

    if !manifest.conditionals.is_empty() {
        println!("\nConditional files:");
        for cond in &manifest.conditionals {
            let (polarity, path) = match (&cond.include, &cond.exclude) {
                (Some(path), _) => ("include", path.as_str()),
                (None, Some(path)) => ("exclude", path.as_str()),
                (None, None) => continue,
            };
            println!(
                "  when {} -> {} {}",
                style.value(&cond.when),
                polarity,
                style.dim(path)
            );
        }
    }

    let post_steps = manifest.post_steps();
    if !post_steps.is_empty() {
        println!("\nPost-create steps:");
        for step in &post_steps {
            println!("  {}", style.dim(step));
        }
    }

    Ok(())
}
