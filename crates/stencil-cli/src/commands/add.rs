//! `stencil add` - register a template from a local path or git remote

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

use stencil_core::MANIFEST_FILE;

use crate::git;
use crate::output::OutputStyle;

/// Register a template under `name`, copying it into `templates_dir`.
///
/// `path` is either a local directory or a git URL (optionally with a
/// `#subdir` fragment). The copy is verbatim: token substitution happens
/// at render time, never at registration time.
pub fn add_template(templates_dir: &Path, path: &str, name: &str) -> Result<()> {
    let style = OutputStyle::default();
    validate_name(name)?;

    let target = templates_dir.join(name);
    if target.exists() {
        anyhow::bail!(
            "Template '{}' already exists. Remove it first with: stencil remove {}",
            name,
            name
        );
    }

    if git::is_git_url(path) {
        let remote = git::parse_git_url(path);
        let clone_dir = git::clone_repo(&remote.repo_url)?;
        let source = match &remote.subpath {
            Some(sub) => clone_dir.join(sub),
            None => clone_dir.clone(),
        };
        let result = copy_template(&source, &target);
        // Best-effort cleanup; the clone lives under the temp dir anyway.
        let _ = fs::remove_dir_all(&clone_dir);
        result?;
    } else {
        copy_template(Path::new(path), &target)?;
    }

    println!(
        "{}",
        style.success(&format!(
            "Added template '{}' from {}",
            style.name(name),
            style.dim(path)
        ))
    );
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Template name cannot be empty");
    }
    if name.starts_with('.') {
        anyhow::bail!("Template name cannot start with '.'");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!(
            "Template name '{}' is invalid: use letters, digits, '-' and '_'",
            name
        );
    }
    Ok(())
}

fn copy_template(source: &Path, target: &Path) -> Result<()> {
    if !source.is_dir() {
        anyhow::bail!("'{}' is not a directory", source.display());
    }
    if !source.join(MANIFEST_FILE).exists() {
        anyhow::bail!(
            "'{}' is not a template: missing {}",
            source.display(),
            MANIFEST_FILE
        );
    }
    copy_dir_all(source, target)
        .with_context(|| format!("Failed to copy template from '{}'", source.display()))
}

fn copy_dir_all(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;
    let walker = WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        // A cloned template keeps its own history out of the registry.
        .filter_entry(|e| e.file_name() != ".git");
    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("walked entry outside the source root")?;
        let dest = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            debug!(path = %relative.display(), "copying template file");
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}
