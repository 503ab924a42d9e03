#![warn(missing_docs)]

//! Template rendering and project materialization engine
//!
//! Turns a template tree (files and directories whose contents and names
//! may contain `{{variable}}` tokens) plus a variable map into a fully
//! materialized project directory. Rendering is plan-then-commit: the
//! whole output tree is resolved and checked in memory before any disk
//! write, and a failing commit rolls back to the pre-render state.

pub mod conditions;
pub mod error;
pub mod manifest;
pub mod materializer;
pub mod models;
pub mod path;
pub mod plan;
pub mod schema;
pub mod source;
pub mod substitute;
pub mod walker;

// Re-export public API
pub use conditions::{evaluate_condition, excluded_paths};
pub use error::RenderError;
pub use manifest::{
    Classifier, Conditional, FileClassification, HooksConfig, TemplateManifest, Variable,
    MANIFEST_FILE,
};
pub use materializer::Materializer;
pub use models::{
    NodeKind, PlannedContent, PlannedEntry, RenderOptions, RenderPlan, RenderReport,
    TemplateNode, ValidatedVariables, VariableMap,
};
pub use path::resolve_segments;
pub use plan::{build_plan, referenced_tokens};
pub use schema::{coverage, validate, Coverage};
pub use source::{DirSource, TemplateInfo, TemplateSource, TemplateTree};
pub use substitute::{contains_token, substitute, token_names};
pub use walker::Walker;
