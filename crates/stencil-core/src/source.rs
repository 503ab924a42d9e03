//! Template sources
//!
//! A [`TemplateSource`] yields template trees for the engine to render; the
//! engine only ever reads through this interface. [`DirSource`] is the
//! filesystem implementation: a directory whose subdirectories are
//! templates, each carrying a `template.toml` manifest.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::RenderError;
use crate::manifest::{TemplateManifest, MANIFEST_FILE};

/// A template available from a source
#[derive(Debug)]
pub struct TemplateInfo {
    /// Identifier used to open the template (directory name for [`DirSource`])
    pub id: String,
    /// Parsed manifest
    pub manifest: TemplateManifest,
    /// Filesystem root of the template tree
    pub path: PathBuf,
}

/// An opened template, ready for walking
#[derive(Debug)]
pub struct TemplateTree {
    /// Root directory of the template
    pub root: PathBuf,
    /// Parsed manifest
    pub manifest: TemplateManifest,
}

impl TemplateTree {
    /// Open the template rooted at `root` directly, without a source.
    ///
    /// Used by the `validate` operation, which works on bare directories.
    pub fn open(root: &Path) -> Result<Self, RenderError> {
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(RenderError::Manifest {
                path: manifest_path,
                message: "manifest not found".to_string(),
            });
        }
        let manifest = TemplateManifest::load(&manifest_path)?;
        Ok(Self {
            root: root.to_path_buf(),
            manifest,
        })
    }
}

/// Read-only provider of template trees
pub trait TemplateSource {
    /// Enumerate the templates this source can open
    fn list_templates(&self) -> Result<Vec<TemplateInfo>, RenderError>;

    /// Open a template by identifier
    fn open(&self, id: &str) -> Result<TemplateTree, RenderError>;
}

/// Filesystem-backed template source
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source over `root`; the directory may not exist yet
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this source scans
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirSource {
    fn list_templates(&self) -> Result<Vec<TemplateInfo>, RenderError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut templates = Vec::new();
        let mut entries: Vec<_> = fs::read_dir(&self.root)?
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let id = entry.file_name().to_string_lossy().to_string();
            if id.starts_with('.') {
                continue;
            }

            let manifest_path = path.join(MANIFEST_FILE);
            if !manifest_path.exists() {
                warn!(template = %id, "skipping template without a manifest");
                continue;
            }
            match TemplateManifest::load(&manifest_path) {
                Ok(manifest) => templates.push(TemplateInfo { id, manifest, path }),
                Err(e) => {
                    warn!(template = %id, error = %e, "skipping template with a broken manifest");
                }
            }
        }

        Ok(templates)
    }

    fn open(&self, id: &str) -> Result<TemplateTree, RenderError> {
        let path = self.root.join(id);
        if !path.is_dir() {
            return Err(RenderError::TemplateNotFound(id.to_string()));
        }
        TemplateTree::open(&path)
    }
}
