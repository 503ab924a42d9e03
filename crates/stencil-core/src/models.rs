//! Data model for template rendering

use std::collections::HashMap;
use std::path::PathBuf;

/// Mapping from variable name to resolved string value.
///
/// Built once per render invocation by the caller (CLI prompts, config
/// defaults, `-v key=value` flags) and treated as immutable by the engine.
pub type VariableMap = HashMap<String, String>;

/// How a template node is treated during rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A directory; recreated in the output tree
    Directory,
    /// A text file; contents pass through token substitution
    Text,
    /// A binary file; copied byte-for-byte, never substituted
    Binary,
}

/// A single node enumerated from a template tree
#[derive(Debug, Clone)]
pub struct TemplateNode {
    /// Classification of this node
    pub kind: NodeKind,
    /// Path segments relative to the template root
    pub segments: Vec<String>,
    /// File contents; empty for directories
    pub content: Vec<u8>,
}

impl TemplateNode {
    /// The template-relative path as a display string (always `/`-joined)
    pub fn relative_path(&self) -> String {
        self.segments.join("/")
    }
}

/// Variables after schema validation: defaults merged in, extras noted
#[derive(Debug, Clone)]
pub struct ValidatedVariables {
    /// The effective variable map used for substitution
    pub values: VariableMap,
    /// Non-fatal findings, e.g. supplied variables the schema does not declare
    pub warnings: Vec<String>,
}

/// What a planned entry will write
#[derive(Debug, Clone)]
pub enum PlannedContent {
    /// A directory to create
    Directory,
    /// Substituted text content
    Text(String),
    /// Source bytes copied verbatim
    Bytes(Vec<u8>),
}

/// One fully-resolved entry of a render plan
#[derive(Debug, Clone)]
pub struct PlannedEntry {
    /// Output path relative to the output root
    pub output_path: PathBuf,
    /// Template-relative path of the source node (for diagnostics)
    pub source_path: String,
    /// Resolved content to materialize
    pub content: PlannedContent,
}

impl PlannedEntry {
    /// Whether this entry creates a directory
    pub fn is_directory(&self) -> bool {
        matches!(self.content, PlannedContent::Directory)
    }
}

/// The fully-resolved, pre-write representation of the output tree.
///
/// Built entirely in memory; no two entries share an output path. The plan
/// is discarded after the commit, only [`RenderReport`] escapes the render.
#[derive(Debug, Clone, Default)]
pub struct RenderPlan {
    /// Entries in write order: parent directories before their children
    pub entries: Vec<PlannedEntry>,
    /// Non-fatal findings accumulated while planning
    pub warnings: Vec<String>,
}

impl RenderPlan {
    /// Number of files (not directories) the plan will write
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_directory()).count()
    }
}

/// Options controlling a single render
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Permit rendering into an existing non-empty output directory.
    ///
    /// Files replaced during the commit have their previous contents
    /// journaled, so a failed render still restores them.
    pub overwrite: bool,
}

/// Summary of a committed render
#[derive(Debug, Clone)]
pub struct RenderReport {
    /// Root of the materialized project
    pub output_root: PathBuf,
    /// Number of files written
    pub files_written: usize,
    /// Number of directories created
    pub dirs_created: usize,
    /// Non-fatal findings (unused extra variables, skipped entries)
    pub warnings: Vec<String>,
    /// Post-generation steps declared by the template, for an external
    /// runner to execute. The engine never runs these itself.
    pub post_steps: Vec<String>,
}
