//! Acquiring templates from git remotes

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};

use crate::output::OutputStyle;

/// Parsed remote URL with optional subpath
pub struct RemoteUrl {
    /// The clonable repository URL
    pub repo_url: String,
    /// Path inside the repository holding the template, if any
    pub subpath: Option<String>,
}

/// Check if a path looks like a git URL
pub fn is_git_url(path: &str) -> bool {
    path.starts_with("https://")
        || path.starts_with("http://")
        || path.starts_with("git@")
        || path.starts_with("git://")
        || path.starts_with("github:")
}

/// Parse a git URL, extracting the repo URL and optional subpath.
/// Supports: `https://github.com/org/repo.git#path/to/template` and the
/// `github:org/repo#path/to/template` shorthand.
pub fn parse_git_url(url: &str) -> RemoteUrl {
    let (url, is_github_shorthand) = if let Some(rest) = url.strip_prefix("github:") {
        (rest.to_string(), true)
    } else {
        (url.to_string(), false)
    };

    let (repo_part, subpath) = if let Some((repo, path)) = url.split_once('#') {
        (repo.to_string(), Some(path.to_string()))
    } else {
        (url, None)
    };

    let repo_url = if is_github_shorthand {
        format!("https://github.com/{}.git", repo_part)
    } else {
        repo_part
    };

    RemoteUrl { repo_url, subpath }
}

/// Clone a git repository (shallow) to a temporary directory
pub fn clone_repo(url: &str) -> Result<PathBuf> {
    let temp_dir = std::env::temp_dir().join(format!("stencil-{}", std::process::id()));

    // Clean up leftovers from a previous failed run.
    if temp_dir.exists() {
        fs::remove_dir_all(&temp_dir).context("Failed to clean up temp directory")?;
    }

    let style = OutputStyle::default();
    println!("Cloning {}...", style.dim(url));

    let temp_path = temp_dir
        .to_str()
        .context("Temp directory path contains invalid UTF-8")?;

    let output = Command::new("git")
        .args(["clone", "--depth", "1", url, temp_path])
        .output()
        .context("Failed to execute git clone. Is git installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("Git clone failed: {}", stderr.trim());
    }

    Ok(temp_dir)
}
