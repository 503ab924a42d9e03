//! Render orchestration: validate, plan, commit
//!
//! A render moves through Idle → Validating → Planning → Committing and
//! ends Committed or RolledBack. Every failure before the commit leaves
//! the filesystem untouched; a failure during the commit rolls back every
//! path this render created, restoring the pre-render state. There are no
//! retries here; retry policy belongs to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::RenderError;
use crate::models::{
    PlannedContent, RenderOptions, RenderPlan, RenderReport, VariableMap,
};
use crate::plan::build_plan;
use crate::schema::validate;
use crate::source::TemplateTree;

/// One reversible action taken during commit, journaled in execution order
enum JournalEntry {
    CreatedDir(PathBuf),
    CreatedFile(PathBuf),
    /// An existing file was overwritten; its previous bytes are kept so
    /// rollback can restore them.
    ReplacedFile(PathBuf, Vec<u8>),
}

/// Renders template trees into project directories
#[derive(Debug, Clone, Copy, Default)]
pub struct Materializer {
    options: RenderOptions,
}

impl Materializer {
    /// Create a materializer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Validate variables and build the render plan without writing.
    ///
    /// This is the preview path: everything up to (but excluding) the
    /// commit, including collision and path checks.
    pub fn plan(
        &self,
        tree: &TemplateTree,
        vars: &VariableMap,
    ) -> Result<RenderPlan, RenderError> {
        let validated = validate(&tree.manifest.variables, vars)?;
        let mut plan = build_plan(tree, &validated.values)?;
        plan.warnings.extend(validated.warnings);
        Ok(plan)
    }

    /// Render `tree` into `output_root` with `vars`.
    ///
    /// All-or-nothing: either the full plan is materialized and a
    /// [`RenderReport`] is returned, or the filesystem is left as it was.
    pub fn render(
        &self,
        tree: &TemplateTree,
        vars: &VariableMap,
        output_root: &Path,
    ) -> Result<RenderReport, RenderError> {
        let plan = self.plan(tree, vars)?;
        self.check_destination(output_root)?;
        debug!(output = %output_root.display(), files = plan.file_count(), "committing render plan");
        self.commit(&plan, output_root, tree)
    }

    fn check_destination(&self, output_root: &Path) -> Result<(), RenderError> {
        if !output_root.exists() {
            return Ok(());
        }
        if output_root.is_file() {
            return Err(RenderError::DestinationConflict(output_root.to_path_buf()));
        }
        if self.options.overwrite {
            return Ok(());
        }
        let mut entries = fs::read_dir(output_root)?;
        if entries.next().is_some() {
            return Err(RenderError::DestinationConflict(output_root.to_path_buf()));
        }
        Ok(())
    }

    fn commit(
        &self,
        plan: &RenderPlan,
        output_root: &Path,
        tree: &TemplateTree,
    ) -> Result<RenderReport, RenderError> {
        let mut journal: Vec<JournalEntry> = Vec::new();
        let mut files_written = 0usize;
        let mut dirs_created = 0usize;

        let result = self.execute(plan, output_root, &mut journal, &mut files_written, &mut dirs_created);

        match result {
            Ok(()) => {
                debug!(files = files_written, dirs = dirs_created, "render committed");
                Ok(RenderReport {
                    output_root: output_root.to_path_buf(),
                    files_written,
                    dirs_created,
                    warnings: plan.warnings.clone(),
                    post_steps: tree.manifest.post_steps(),
                })
            }
            Err((failed_path, io_err)) => {
                warn!(path = %failed_path.display(), error = %io_err, "commit failed, rolling back");
                match rollback(&journal) {
                    Ok(()) => Err(RenderError::Commit {
                        path: failed_path,
                        source: io_err,
                    }),
                    Err((rollback_path, rollback_err)) => {
                        Err(RenderError::CommitAndRollbackFailed {
                            path: failed_path,
                            commit: io_err.to_string(),
                            rollback_path,
                            rollback: rollback_err.to_string(),
                        })
                    }
                }
            }
        }
    }

    /// Execute the plan, journaling every mutation. On error, returns the
    /// failing path with the underlying cause; the journal holds exactly
    /// what must be undone.
    fn execute(
        &self,
        plan: &RenderPlan,
        output_root: &Path,
        journal: &mut Vec<JournalEntry>,
        files_written: &mut usize,
        dirs_created: &mut usize,
    ) -> Result<(), (PathBuf, std::io::Error)> {
        // Create missing ancestors one at a time so each lands in the
        // journal; rollback must remove intermediate directories too, not
        // just the leaf.
        for dir in missing_ancestors(output_root).iter().rev() {
            fs::create_dir(dir).map_err(|e| (dir.clone(), e))?;
            journal.push(JournalEntry::CreatedDir(dir.clone()));
            *dirs_created += 1;
        }

        // Plan order already puts parents before children.
        for entry in &plan.entries {
            let target = output_root.join(&entry.output_path);
            match &entry.content {
                PlannedContent::Directory => {
                    if target.is_dir() {
                        continue;
                    }
                    fs::create_dir(&target).map_err(|e| (target.clone(), e))?;
                    journal.push(JournalEntry::CreatedDir(target));
                    *dirs_created += 1;
                }
                PlannedContent::Text(text) => {
                    self.write_file(&target, text.as_bytes(), journal)?;
                    *files_written += 1;
                }
                PlannedContent::Bytes(bytes) => {
                    self.write_file(&target, bytes, journal)?;
                    *files_written += 1;
                }
            }
        }

        Ok(())
    }

    fn write_file(
        &self,
        target: &Path,
        bytes: &[u8],
        journal: &mut Vec<JournalEntry>,
    ) -> Result<(), (PathBuf, std::io::Error)> {
        let previous = if target.exists() {
            Some(fs::read(target).map_err(|e| (target.to_path_buf(), e))?)
        } else {
            None
        };

        fs::write(target, bytes).map_err(|e| (target.to_path_buf(), e))?;

        journal.push(match previous {
            Some(old) => JournalEntry::ReplacedFile(target.to_path_buf(), old),
            None => JournalEntry::CreatedFile(target.to_path_buf()),
        });
        Ok(())
    }
}

/// The chain of directories under `path` (leaf first) that do not exist
/// yet and must be created for the commit.
fn missing_ancestors(path: &Path) -> Vec<PathBuf> {
    let mut missing = Vec::new();
    let mut cursor = path;
    while !cursor.as_os_str().is_empty() && !cursor.exists() {
        missing.push(cursor.to_path_buf());
        match cursor.parent() {
            Some(parent) => cursor = parent,
            None => break,
        }
    }
    missing
}

/// Undo journaled mutations in reverse order: files go before the
/// directories containing them, nested directories before their parents.
fn rollback(journal: &[JournalEntry]) -> Result<(), (PathBuf, std::io::Error)> {
    for entry in journal.iter().rev() {
        match entry {
            JournalEntry::CreatedFile(path) => {
                fs::remove_file(path).map_err(|e| (path.clone(), e))?;
            }
            JournalEntry::ReplacedFile(path, old) => {
                fs::write(path, old).map_err(|e| (path.clone(), e))?;
            }
            JournalEntry::CreatedDir(path) => {
                fs::remove_dir(path).map_err(|e| (path.clone(), e))?;
            }
        }
    }
    Ok(())
}
