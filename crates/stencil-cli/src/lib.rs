//! CLI surface for the stencil project scaffolder
//!
//! The engine lives in `stencil-core`; this crate adds the interactive
//! collaborators around it: prompting, template registry management,
//! git-based template acquisition, post-create hook execution, and the
//! global defaults config.

pub mod commands;
pub mod git;
pub mod global_config;
pub mod hooks;
pub mod output;
pub mod prompt;
