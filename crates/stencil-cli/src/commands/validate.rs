//! `stencil validate` - template authoring checks

use std::path::Path;

use anyhow::Result;

use stencil_core::{plan::referenced_tokens, schema, TemplateTree};

use crate::output::OutputStyle;

/// Validate the template at `path`: manifest parses, the tree walks
/// cleanly, and the declared schema covers every referenced token.
///
/// Undeclared tokens are an error (they would fail every render); unused
/// declarations and missing descriptions are warnings.
pub fn validate_template(path: &str) -> Result<()> {
    let style = OutputStyle::default();
    let root = Path::new(path);

    let tree = TemplateTree::open(root)?;
    println!("{}", style.success("manifest parses"));

    let mut warnings = 0usize;
    for var in &tree.manifest.variables {
        if var.description.is_empty() {
            println!(
                "{}",
                style.warning(&format!("variable '{}' has no description", var.name))
            );
            warnings += 1;
        }
        if var.var_type.as_deref() == Some("choice") && var.choices.is_empty() {
            println!(
                "{}",
                style.warning(&format!(
                    "variable '{}' is type 'choice' but declares no choices",
                    var.name
                ))
            );
            warnings += 1;
        }
    }

    // Walks every file and parses every token, so malformed trees and
    // non-UTF-8 text files surface here.
    let referenced = referenced_tokens(&tree)?;
    println!(
        "{}",
        style.success(&format!(
            "template walks cleanly ({} referenced token{})",
            referenced.len(),
            if referenced.len() == 1 { "" } else { "s" }
        ))
    );

    let report = schema::coverage(&tree.manifest.variables, &referenced);
    for name in &report.unused {
        println!(
            "{}",
            style.warning(&format!("variable '{}' is declared but never referenced", name))
        );
        warnings += 1;
    }

    if !report.undeclared.is_empty() {
        for name in &report.undeclared {
            println!(
                "{}",
                style.error(&format!("token '{{{{{}}}}}' is not declared as a variable", name))
            );
        }
        anyhow::bail!(
            "Validation failed: {} undeclared token(s)",
            report.undeclared.len()
        );
    }

    if warnings == 0 {
        println!("{}", style.success("schema covers all referenced tokens"));
    } else {
        println!(
            "{}",
            style.warning(&format!("valid with {} warning(s)", warnings))
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stencil_core::MANIFEST_FILE;
    use tempfile::TempDir;

    #[test]
    fn test_valid_template_passes() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(MANIFEST_FILE),
            r#"
name = "T"
description = "d"

[[variables]]
name = "project_name"
description = "The project name"

[files]
text = ["**/*.md"]
"#,
        )
        .unwrap();
        fs::write(temp.path().join("README.md"), "# {{project_name}}").unwrap();

        validate_template(temp.path().to_str().unwrap()).unwrap();
    }

    #[test]
    fn test_undeclared_token_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(MANIFEST_FILE),
            "name = \"T\"\ndescription = \"d\"\n\n[files]\ntext = [\"**/*.md\"]\n",
        )
        .unwrap();
        fs::write(temp.path().join("README.md"), "# {{rogue}}").unwrap();

        assert!(validate_template(temp.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_missing_manifest_fails() {
        let temp = TempDir::new().unwrap();
        assert!(validate_template(temp.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_unused_variable_is_only_a_warning() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(MANIFEST_FILE),
            r#"
name = "T"
description = "d"

[[variables]]
name = "never_used"
description = "dormant"
default = "x"
"#,
        )
        .unwrap();

        validate_template(temp.path().to_str().unwrap()).unwrap();
    }
}
