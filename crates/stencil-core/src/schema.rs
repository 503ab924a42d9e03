//! Variable schema validation
//!
//! Runs once, before any tree walk, so an invalid invocation fails fast
//! with no partial I/O. Defaults are merged; extra caller-supplied
//! variables are kept but reported as warnings.

use std::collections::BTreeSet;

use crate::error::RenderError;
use crate::manifest::Variable;
use crate::models::{ValidatedVariables, VariableMap};

/// Validate `vars` against the declared schema.
///
/// For each declared variable: absent with no default is
/// [`RenderError::MissingVariable`]; absent with a default gets the default
/// merged in; present values are used as-is (everything is a string).
pub fn validate(schema: &[Variable], vars: &VariableMap) -> Result<ValidatedVariables, RenderError> {
    let mut values = vars.clone();
    let mut warnings = Vec::new();

    for variable in schema {
        if values.contains_key(&variable.name) {
            continue;
        }
        match &variable.default {
            Some(default) => {
                values.insert(variable.name.clone(), default.clone());
            }
            None => return Err(RenderError::MissingVariable(variable.name.clone())),
        }
    }

    // Undeclared extras are forward-compatible, but worth flagging.
    let declared: BTreeSet<&str> = schema.iter().map(|v| v.name.as_str()).collect();
    let mut extras: Vec<&str> = vars
        .keys()
        .map(String::as_str)
        .filter(|name| !declared.contains(name))
        .collect();
    extras.sort_unstable();
    for name in extras {
        warnings.push(format!("variable '{name}' is not declared by the template"));
    }

    Ok(ValidatedVariables { values, warnings })
}

/// Schema coverage report for template authoring checks
#[derive(Debug, Default)]
pub struct Coverage {
    /// Tokens referenced in the template but not declared in the schema
    pub undeclared: Vec<String>,
    /// Variables declared in the schema but never referenced
    pub unused: Vec<String>,
}

impl Coverage {
    /// Whether every referenced token is declared and vice versa
    pub fn is_complete(&self) -> bool {
        self.undeclared.is_empty() && self.unused.is_empty()
    }
}

/// Compare the declared schema against the set of tokens actually
/// referenced in template content and paths.
pub fn coverage(schema: &[Variable], referenced: &BTreeSet<String>) -> Coverage {
    let declared: BTreeSet<String> = schema.iter().map(|v| v.name.clone()).collect();
    Coverage {
        undeclared: referenced.difference(&declared).cloned().collect(),
        unused: declared.difference(referenced).cloned().collect(),
    }
}
