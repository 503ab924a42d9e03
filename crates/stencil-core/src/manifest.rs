//! Template manifest (`template.toml`)
//!
//! Every template declares its variable schema, file classification,
//! conditional files, and post-create steps in a TOML manifest at the
//! template root. The manifest itself is never part of the output tree.

use std::fs;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// File name of the manifest inside a template root
pub const MANIFEST_FILE: &str = "template.toml";

/// Parsed template manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Human-readable template name
    pub name: String,
    /// One-line description shown in listings
    pub description: String,
    /// Declared variable schema, in prompt order
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Text/binary classification of template files
    #[serde(default)]
    pub files: FileClassification,
    /// Variable-dependent file inclusion rules
    #[serde(default)]
    pub conditionals: Vec<Conditional>,
    /// Post-generation steps for an external runner
    #[serde(default)]
    pub hooks: Option<HooksConfig>,
}

/// One declared template variable.
///
/// A variable is required exactly when it has no default; every value is a
/// string as far as the engine is concerned. `var_type` and `choices` are
/// prompt hints for the interactive layer only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name as referenced by `{{name}}` tokens
    pub name: String,
    /// Prompt text / documentation
    pub description: String,
    /// Value used when the caller supplies none
    #[serde(default)]
    pub default: Option<String>,
    /// Prompt hint: "string" (default), "bool", or "choice"
    #[serde(rename = "type", default)]
    pub var_type: Option<String>,
    /// Allowed values for "choice" variables
    #[serde(default)]
    pub choices: Vec<String>,
}

impl Variable {
    /// Whether a render must supply this variable
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Glob lists classifying template files as text or binary.
///
/// Paths are matched relative to the template root. `binary` wins over
/// `text`; anything matching neither is treated as binary so that
/// unclassified content is never corrupted by substitution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileClassification {
    /// Globs of files whose contents go through token substitution
    #[serde(default)]
    pub text: Vec<String>,
    /// Globs of files always copied byte-for-byte
    #[serde(default)]
    pub binary: Vec<String>,
}

/// Conditional inclusion/exclusion of a file or directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditional {
    /// Path included only when the condition holds
    #[serde(default)]
    pub include: Option<String>,
    /// Path excluded when the condition holds
    #[serde(default)]
    pub exclude: Option<String>,
    /// Condition expression, e.g. `use_docker == true` or `license == 'MIT'`
    pub when: String,
}

/// Declared post-generation steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Shell commands to run in the output root after a committed render
    #[serde(default)]
    pub post_create: Vec<String>,
}

impl TemplateManifest {
    /// Load and parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let content = fs::read_to_string(path).map_err(|e| RenderError::Manifest {
            path: path.to_path_buf(),
            message: format!("failed to read: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| RenderError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Declared post-create steps, empty when the manifest has none
    pub fn post_steps(&self) -> Vec<String> {
        self.hooks
            .as_ref()
            .map(|h| h.post_create.clone())
            .unwrap_or_default()
    }

    /// Compile the file classification into a matcher
    pub fn classifier(&self) -> Result<Classifier, RenderError> {
        Classifier::new(&self.files)
    }
}

/// Compiled text/binary matcher for template-relative paths
#[derive(Debug)]
pub struct Classifier {
    text: GlobSet,
    binary: GlobSet,
}

impl Classifier {
    fn new(classification: &FileClassification) -> Result<Self, RenderError> {
        Ok(Self {
            text: build_globset(&classification.text)?,
            binary: build_globset(&classification.binary)?,
        })
    }

    /// Whether the file at `relative_path` is substitutable text
    pub fn is_text(&self, relative_path: &str) -> bool {
        if self.binary.is_match(relative_path) {
            return false;
        }
        self.text.is_match(relative_path)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, RenderError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| RenderError::Manifest {
            path: MANIFEST_FILE.into(),
            message: format!("invalid glob '{pattern}': {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| RenderError::Manifest {
        path: MANIFEST_FILE.into(),
        message: format!("failed to compile globs: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_with_hooks() {
        let content = r#"
name = "Test Template"
description = "Test description"

[[variables]]
name = "project_name"
description = "Project name"
default = "my-project"

[hooks]
post_create = ["npm install", "git init"]
"#;
        let manifest: TemplateManifest = toml::from_str(content).unwrap();
        assert_eq!(manifest.name, "Test Template");
        assert_eq!(
            manifest.post_steps(),
            vec!["npm install".to_string(), "git init".to_string()]
        );
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let content = r#"
name = "Bare"
description = "No variables"
"#;
        let manifest: TemplateManifest = toml::from_str(content).unwrap();
        assert!(manifest.variables.is_empty());
        assert!(manifest.hooks.is_none());
        assert!(manifest.post_steps().is_empty());
    }

    #[test]
    fn test_required_is_derived_from_default() {
        let content = r#"
name = "T"
description = "d"

[[variables]]
name = "required_one"
description = "no default"

[[variables]]
name = "optional_one"
description = "has default"
default = ""
"#;
        let manifest: TemplateManifest = toml::from_str(content).unwrap();
        assert!(manifest.variables[0].is_required());
        assert!(!manifest.variables[1].is_required());
    }

    #[test]
    fn test_classifier_text_and_binary() {
        let manifest: TemplateManifest = toml::from_str(
            r#"
name = "T"
description = "d"

[files]
text = ["**/*.ts", "README.md"]
binary = ["assets/**"]
"#,
        )
        .unwrap();
        let classifier = manifest.classifier().unwrap();
        assert!(classifier.is_text("src/index.ts"));
        assert!(classifier.is_text("README.md"));
        // Unclassified defaults to binary.
        assert!(!classifier.is_text("logo.png"));
        // Binary globs win even over matching text globs.
        assert!(!classifier.is_text("assets/shim.ts"));
    }

    #[test]
    fn test_classifier_empty_classification_is_all_binary() {
        let manifest: TemplateManifest = toml::from_str(
            r#"
name = "T"
description = "d"
"#,
        )
        .unwrap();
        let classifier = manifest.classifier().unwrap();
        assert!(!classifier.is_text("src/index.ts"));
    }

    #[test]
    fn test_invalid_glob_is_a_manifest_error() {
        let manifest: TemplateManifest = toml::from_str(
            r#"
name = "T"
description = "d"

[files]
text = ["src/[bad"]
"#,
        )
        .unwrap();
        assert!(manifest.classifier().is_err());
    }

    #[test]
    fn test_parse_conditionals() {
        let manifest: TemplateManifest = toml::from_str(
            r#"
name = "T"
description = "d"

[[conditionals]]
include = "Dockerfile"
when = "use_docker == true"

[[conditionals]]
exclude = "src/cli.ts"
when = "kind == 'lib'"
"#,
        )
        .unwrap();
        assert_eq!(manifest.conditionals.len(), 2);
        assert_eq!(manifest.conditionals[0].include.as_deref(), Some("Dockerfile"));
        assert_eq!(manifest.conditionals[1].exclude.as_deref(), Some("src/cli.ts"));
    }
}
