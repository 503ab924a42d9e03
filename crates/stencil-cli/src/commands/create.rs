//! `stencil create` - materialize a project from a template

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use stencil_core::{
    DirSource, Materializer, PlannedContent, RenderOptions, TemplateSource, TemplateTree,
    VariableMap,
};

use crate::global_config::load_global_config;
use crate::hooks::execute_post_steps;
use crate::output::OutputStyle;
use crate::prompt;

/// Create a new project from a template.
///
/// Variables come from `-v key=value` flags first, then (unless `yes`)
/// interactive prompts, with template and global-config defaults filling
/// the rest. The render itself is all-or-nothing.
#[allow(clippy::too_many_arguments)]
pub fn create_project(
    templates_dir: &Path,
    template: Option<String>,
    output: Option<String>,
    vars: Vec<(String, String)>,
    yes: bool,
    dry_run: bool,
    force: bool,
) -> Result<()> {
    let style = OutputStyle::default();
    let source = DirSource::new(templates_dir);

    let tree = resolve_template(&source, template)?;
    println!(
        "Using template {} - {}",
        style.name(&tree.manifest.name),
        style.dim(&tree.manifest.description)
    );

    let mut variables: VariableMap = vars.into_iter().collect();
    seed_project_name(&mut variables, output.as_deref(), &tree);
    let global = load_global_config();
    prompt::collect_variables(&tree.manifest.variables, &mut variables, &global.defaults, yes)?;

    let output_root = resolve_output(output, &variables, &tree);

    let materializer = Materializer::new(RenderOptions { overwrite: force });

    if dry_run {
        return preview(&materializer, &tree, &variables, &output_root, &style);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").context("invalid spinner template")?,
    );
    spinner.set_message(format!("Rendering into {}", output_root.display()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let report = match materializer.render(&tree, &variables, &output_root) {
        Ok(report) => {
            spinner.finish_and_clear();
            report
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };

    for warning in &report.warnings {
        println!("{}", style.warning(warning));
    }
    println!(
        "{}",
        style.success(&format!(
            "Created {} ({} files, {} directories)",
            style.value(&report.output_root.display().to_string()),
            report.files_written,
            report.dirs_created
        ))
    );

    if !report.post_steps.is_empty() {
        println!("\nRunning post-create steps:");
        execute_post_steps(&report.post_steps, &report.output_root)?;
    }

    println!("\nNext steps:");
    println!("  cd {}", report.output_root.display());

    Ok(())
}

/// If the template declares a `project_name` variable and the caller gave
/// an output directory but no value, seed the variable from the directory
/// name so `-o my-app -y` just works.
fn seed_project_name(variables: &mut VariableMap, output: Option<&str>, tree: &TemplateTree) {
    if variables.contains_key("project_name") {
        return;
    }
    if !tree.manifest.variables.iter().any(|v| v.name == "project_name") {
        return;
    }
    let Some(output) = output else { return };
    if let Some(name) = Path::new(output).file_name().and_then(|n| n.to_str()) {
        variables.insert("project_name".to_string(), name.to_string());
    }
}

fn resolve_template(source: &DirSource, template: Option<String>) -> Result<TemplateTree> {
    match template {
        Some(id) => Ok(source.open(&id)?),
        None => {
            let templates = source.list_templates()?;
            if templates.is_empty() {
                anyhow::bail!(
                    "No templates available in '{}'. Add one with: stencil add <path-or-url> <name>",
                    source.root().display()
                );
            }
            let chosen = prompt::select_template(&templates)?;
            Ok(source.open(&chosen.id)?)
        }
    }
}

/// Pick the output directory: an explicit `--output` wins, then a
/// `project_name` or `name` variable, then the template's own name.
fn resolve_output(output: Option<String>, variables: &VariableMap, tree: &TemplateTree) -> PathBuf {
    let name = output
        .or_else(|| variables.get("project_name").cloned())
        .or_else(|| variables.get("name").cloned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| tree.manifest.name.clone());
    PathBuf::from(name)
}

fn preview(
    materializer: &Materializer,
    tree: &TemplateTree,
    variables: &VariableMap,
    output_root: &Path,
    style: &OutputStyle,
) -> Result<()> {
    let plan = materializer.plan(tree, variables)?;

    println!(
        "Plan for {} ({} files):\n",
        style.value(&output_root.display().to_string()),
        plan.file_count()
    );
    for entry in &plan.entries {
        let kind = match &entry.content {
            PlannedContent::Directory => "dir ",
            PlannedContent::Text(_) => "text",
            PlannedContent::Bytes(_) => "bin ",
        };
        println!(
            "  {} {}",
            style.dim(kind),
            output_root.join(&entry.output_path).display()
        );
    }
    for warning in &plan.warnings {
        println!("{}", style.warning(warning));
    }
    println!("\n{}", style.dim("Dry run: no files were written."));
    Ok(())
}
