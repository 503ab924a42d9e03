//! Variable-dependent file selection
//!
//! Conditions are deliberately tiny: `var == value`, with optional single
//! or double quotes around the value. No boolean operators, no nesting.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::manifest::Conditional;
use crate::models::VariableMap;

static CONDITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(\w+)\s*==\s*(?:["']([^"']*)["']|(\S+))\s*$"#)
        .expect("condition pattern is valid")
});

/// Evaluate a condition like `use_docker == true` or `license == 'MIT'`.
///
/// A malformed expression or a missing variable evaluates to false.
pub fn evaluate_condition(condition: &str, vars: &VariableMap) -> bool {
    let Some(caps) = CONDITION_PATTERN.captures(condition) else {
        return false;
    };
    let var_name = &caps[1];
    let expected = caps
        .get(2)
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or("");

    vars.get(var_name).is_some_and(|actual| actual == expected)
}

/// Compute the set of template-relative paths excluded by `conditionals`
/// for this render's variables.
///
/// An `include` rule excludes its path when the condition does NOT hold;
/// an `exclude` rule excludes its path when the condition DOES hold.
pub fn excluded_paths(conditionals: &[Conditional], vars: &VariableMap) -> HashSet<String> {
    let mut excluded = HashSet::new();

    for conditional in conditionals {
        let holds = evaluate_condition(&conditional.when, vars);

        if let Some(path) = &conditional.include {
            if !holds {
                excluded.insert(path.clone());
            }
        }
        if let Some(path) = &conditional.exclude {
            if holds {
                excluded.insert(path.clone());
            }
        }
    }

    excluded
}
