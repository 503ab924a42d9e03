//! `stencil remove` - unregister a template

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::output::OutputStyle;

/// Remove a registered template by deleting its directory
pub fn remove_template(templates_dir: &Path, template: &str) -> Result<()> {
    let style = OutputStyle::default();
    let path = templates_dir.join(template);

    if !path.is_dir() {
        anyhow::bail!("Template '{}' not found", template);
    }

    fs::remove_dir_all(&path)
        .with_context(|| format!("Failed to remove template at '{}'", path.display()))?;

    println!("{}", style.success(&format!("Removed template '{}'", template)));
    Ok(())
}
