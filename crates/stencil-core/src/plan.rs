//! Render planning
//!
//! The planner turns a template tree plus resolved variables into a
//! [`RenderPlan`]: every output path computed, every text file substituted,
//! every collision caught, all before a single byte reaches the disk.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use tracing::debug;

use crate::conditions::excluded_paths;
use crate::error::RenderError;
use crate::models::{NodeKind, PlannedContent, PlannedEntry, RenderPlan, VariableMap};
use crate::path::resolve_segments;
use crate::source::TemplateTree;
use crate::substitute::{substitute, token_names};
use crate::walker::Walker;

/// Build the fully-resolved plan for rendering `tree` with `vars`.
///
/// `vars` must already be schema-validated; the planner assumes defaults
/// are merged. Fails on the first unresolved token, invalid path, or
/// output path collision.
pub fn build_plan(tree: &TemplateTree, vars: &VariableMap) -> Result<RenderPlan, RenderError> {
    let excluded = excluded_paths(&tree.manifest.conditionals, vars);
    let mut plan = RenderPlan::default();
    // Resolved output path -> source path, for collision diagnostics.
    let mut seen: HashMap<PathBuf, String> = HashMap::new();

    for node in Walker::new(tree)? {
        let node = node?;
        let source_path = node.relative_path();

        if is_excluded(&source_path, &excluded) {
            continue;
        }

        let resolved = resolve_segments(&node.segments, vars)?;
        let output_path: PathBuf = resolved.iter().collect();

        if let Some(first) = seen.get(&output_path) {
            return Err(RenderError::PathCollision {
                output: output_path,
                first: first.clone(),
                second: source_path,
            });
        }
        seen.insert(output_path.clone(), source_path.clone());

        let content = match node.kind {
            NodeKind::Directory => PlannedContent::Directory,
            NodeKind::Binary => PlannedContent::Bytes(node.content),
            NodeKind::Text => {
                let text = String::from_utf8(node.content)
                    .expect("walker verified text nodes are UTF-8");
                PlannedContent::Text(substitute(&text, vars, &source_path)?)
            }
        };

        plan.entries.push(PlannedEntry {
            output_path,
            source_path,
            content,
        });
    }

    debug!(
        entries = plan.entries.len(),
        files = plan.file_count(),
        "render plan built"
    );
    Ok(plan)
}

/// Collect every token referenced anywhere in the template: text file
/// contents plus all path segments. Used by schema coverage checks.
pub fn referenced_tokens(tree: &TemplateTree) -> Result<BTreeSet<String>, RenderError> {
    let mut tokens = BTreeSet::new();

    for node in Walker::new(tree)? {
        let node = node?;
        for segment in &node.segments {
            tokens.extend(token_names(segment));
        }
        if node.kind == NodeKind::Text {
            let text = String::from_utf8(node.content)
                .expect("walker verified text nodes are UTF-8");
            tokens.extend(token_names(&text));
        }
    }

    Ok(tokens)
}

fn is_excluded(source_path: &str, excluded: &HashSet<String>) -> bool {
    excluded
        .iter()
        .any(|p| source_path == p || source_path.starts_with(&format!("{p}/")))
}
