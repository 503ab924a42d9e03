//! Error types for template rendering

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering a template into a project
#[derive(Debug, Error)]
pub enum RenderError {
    /// A required variable was not supplied and has no default
    #[error("Missing required variable: {0}")]
    MissingVariable(String),

    /// A token in template content or a path names an unknown variable
    #[error("Unresolved token '{{{{{token}}}}}' in {location}")]
    UnresolvedToken {
        /// Name of the token that could not be resolved
        token: String,
        /// Where the token was found (file path or path segment)
        location: String,
    },

    /// A path segment resolved to something unusable as a file name
    #[error("Invalid path segment '{segment}' in '{path}': {reason}")]
    InvalidPath {
        /// The resolved segment that was rejected
        segment: String,
        /// The template-relative path being resolved
        path: String,
        /// Why the segment was rejected
        reason: String,
    },

    /// Two source nodes resolved to the same output path
    #[error(
        "Path collision: '{first}' and '{second}' both resolve to '{output}'"
    )]
    PathCollision {
        /// The colliding output path
        output: PathBuf,
        /// Template-relative path of the first source node
        first: String,
        /// Template-relative path of the second source node
        second: String,
    },

    /// The output directory already exists and is not empty
    #[error("Destination '{0}' already exists and is not empty")]
    DestinationConflict(PathBuf),

    /// A filesystem write failed during commit; the render was rolled back
    #[error("Commit failed at '{path}': {source} (all changes rolled back)")]
    Commit {
        /// Path of the write that failed
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A commit write failed and the subsequent rollback also failed
    #[error(
        "Commit failed at '{path}': {commit}; rollback also failed at \
         '{rollback_path}': {rollback} (destination must be treated as contaminated)"
    )]
    CommitAndRollbackFailed {
        /// Path of the write that failed
        path: PathBuf,
        /// The original commit failure
        commit: String,
        /// Path the rollback could not remove
        rollback_path: PathBuf,
        /// The rollback failure
        rollback: String,
    },

    /// A template manifest could not be read or parsed
    #[error("Invalid template manifest at '{path}': {message}")]
    Manifest {
        /// Path to the manifest file
        path: PathBuf,
        /// Parse or validation failure detail
        message: String,
    },

    /// The requested template does not exist in the source
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// IO error outside the commit phase (reading the template tree)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
