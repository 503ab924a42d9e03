//! Interactive prompting for template and variable selection
//!
//! This is the collaborator that turns a template's declared schema into a
//! finished variable map. The engine itself never prompts; it receives the
//! map this module produces.

use std::collections::HashMap;

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input, Select};

use stencil_core::{TemplateInfo, Variable, VariableMap};

/// Pick a template interactively from the available set
pub fn select_template(templates: &[TemplateInfo]) -> Result<&TemplateInfo> {
    let theme = ColorfulTheme::default();
    println!("Select a template:");
    let items: Vec<String> = templates
        .iter()
        .map(|t| format!("{} - {}", t.id, t.manifest.description))
        .collect();

    let selection = FuzzySelect::with_theme(&theme)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(&templates[selection])
}

/// Fill in every declared variable missing from `variables`.
///
/// Resolution order per variable: already-supplied value, then (when
/// `use_defaults`) the template default or global default, otherwise an
/// interactive prompt shaped by the variable's prompt hints.
pub fn collect_variables(
    schema: &[Variable],
    variables: &mut VariableMap,
    global_defaults: &HashMap<String, String>,
    use_defaults: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    for var in schema {
        if variables.contains_key(&var.name) {
            continue;
        }

        let var_type = var.var_type.as_deref().unwrap_or("string");
        let effective_default = var
            .default
            .clone()
            .or_else(|| global_defaults.get(&var.name).cloned());

        if use_defaults {
            // A required variable with no default at all stays unset; the
            // engine reports it as missing rather than silently rendering
            // an empty value.
            let value = match var_type {
                "bool" => Some(effective_default.unwrap_or_else(|| "false".to_string())),
                "choice" => effective_default.or_else(|| var.choices.first().cloned()),
                _ => effective_default,
            };
            if let Some(value) = value {
                variables.insert(var.name.clone(), value);
            }
            continue;
        }

        let value = match var_type {
            "bool" => {
                let default_bool = effective_default
                    .as_ref()
                    .is_some_and(|d| d == "true" || d == "yes");
                Confirm::with_theme(&theme)
                    .with_prompt(&var.description)
                    .default(default_bool)
                    .interact()?
                    .to_string()
            }
            "choice" => {
                if var.choices.is_empty() {
                    anyhow::bail!(
                        "Variable '{}' is type 'choice' but has no choices defined",
                        var.name
                    );
                }
                let default_idx = effective_default
                    .as_ref()
                    .and_then(|d| var.choices.iter().position(|c| c == d))
                    .unwrap_or(0);
                let selection = Select::with_theme(&theme)
                    .with_prompt(&var.description)
                    .items(&var.choices)
                    .default(default_idx)
                    .interact()?;
                var.choices[selection].clone()
            }
            _ => {
                let prompt_text = if var.description.is_empty() {
                    var.name.clone()
                } else {
                    format!("{} ({})", var.description, &var.name)
                };

                match &effective_default {
                    Some(default) => Input::with_theme(&theme)
                        .with_prompt(&prompt_text)
                        .default(default.clone())
                        .interact_text()?,
                    None => Input::with_theme(&theme)
                        .with_prompt(&prompt_text)
                        .allow_empty(true)
                        .interact_text()?,
                }
            }
        };

        variables.insert(var.name.clone(), value);
    }

    Ok(())
}
