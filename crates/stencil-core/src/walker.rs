//! Template tree traversal
//!
//! The walker enumerates a template tree lazily, one node at a time,
//! parents before children, in deterministic (name-sorted) order. The
//! manifest file is never yielded. Classification comes from the manifest's
//! declared globs; a file matching neither list is binary, so unknown
//! content is never run through substitution.

use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::RenderError;
use crate::manifest::{Classifier, MANIFEST_FILE};
use crate::models::{NodeKind, TemplateNode};
use crate::source::TemplateTree;

/// Lazy iterator over the nodes of a template tree
pub struct Walker {
    root: PathBuf,
    classifier: Classifier,
    iter: walkdir::IntoIter,
}

impl Walker {
    /// Start a walk over `tree`. The same tree can be walked again for a
    /// different render; each walk is an independent pass.
    pub fn new(tree: &TemplateTree) -> Result<Self, RenderError> {
        let classifier = tree.manifest.classifier()?;
        let iter = WalkDir::new(&tree.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();
        Ok(Self {
            root: tree.root.clone(),
            classifier,
            iter,
        })
    }

    fn node_for(&self, entry: &walkdir::DirEntry) -> Result<Option<TemplateNode>, RenderError> {
        let relative = entry
            .path()
            .strip_prefix(&self.root)
            .expect("walkdir yields paths under the root");

        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();

        // The manifest drives rendering; it is not part of the output tree.
        if segments.len() == 1 && segments[0] == MANIFEST_FILE {
            return Ok(None);
        }

        if entry.file_type().is_dir() {
            return Ok(Some(TemplateNode {
                kind: NodeKind::Directory,
                segments,
                content: Vec::new(),
            }));
        }

        let relative_str = segments.join("/");
        let content = fs::read(entry.path())?;
        let kind = if self.classifier.is_text(&relative_str) {
            // A text classification is an authoring claim; hold it to account.
            if std::str::from_utf8(&content).is_err() {
                return Err(RenderError::Manifest {
                    path: entry.path().to_path_buf(),
                    message: "classified as text but is not valid UTF-8".to_string(),
                });
            }
            NodeKind::Text
        } else {
            NodeKind::Binary
        };

        Ok(Some(TemplateNode {
            kind,
            segments,
            content,
        }))
    }
}

impl Iterator for Walker {
    type Item = Result<TemplateNode, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.iter.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let io = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk failed"));
                    return Some(Err(RenderError::Io(io)));
                }
            };

            match self.node_for(&entry) {
                Ok(Some(node)) => return Some(Ok(node)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
