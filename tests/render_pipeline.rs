//! End-to-end engine tests: template tree in, materialized project out

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use stencil_core::{Materializer, RenderError, TemplateTree, VariableMap};

fn vars(pairs: &[(&str, &str)]) -> VariableMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn write_template(root: &Path, manifest: &str, files: &[(&str, &[u8])]) -> TemplateTree {
    fs::write(root.join("template.toml"), manifest).unwrap();
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    TemplateTree::open(root).unwrap()
}

const MANIFEST: &str = r#"
name = "Service"
description = "A service skeleton"

[[variables]]
name = "service_name"
description = "Service name"

[[variables]]
name = "author"
description = "Author"
default = "Anonymous"

[files]
text = ["**/*.md", "**/*.ts", "**/*.toml"]
binary = ["assets/**"]
"#;

#[test]
fn full_render_substitutes_content_paths_and_defaults() {
    let tpl = TempDir::new().unwrap();
    let tree = write_template(
        tpl.path(),
        MANIFEST,
        &[
            ("README.md", b"# {{service_name}} by {{author}}"),
            ("src/{{service_name}}.ts", b"export const name = '{{service_name}}';"),
            ("assets/logo.png", b"\x89PNG{{service_name}}"),
        ],
    );
    let out = TempDir::new().unwrap();
    let dest = out.path().join("svc");

    let report = Materializer::default()
        .render(&tree, &vars(&[("service_name", "billing")]), &dest)
        .unwrap();

    assert_eq!(report.files_written, 3);
    assert_eq!(
        fs::read_to_string(dest.join("README.md")).unwrap(),
        "# billing by Anonymous"
    );
    assert_eq!(
        fs::read_to_string(dest.join("src/billing.ts")).unwrap(),
        "export const name = 'billing';"
    );
    // Binary-classified content is copied byte-for-byte, token included.
    assert_eq!(
        fs::read(dest.join("assets/logo.png")).unwrap(),
        b"\x89PNG{{service_name}}"
    );
    // The manifest never lands in the output.
    assert!(!dest.join("template.toml").exists());
}

#[test]
fn missing_required_variable_fails_before_any_write() {
    let tpl = TempDir::new().unwrap();
    let tree = write_template(tpl.path(), MANIFEST, &[("README.md", b"{{service_name}}")]);
    let out = TempDir::new().unwrap();
    let dest = out.path().join("svc");

    let err = Materializer::default()
        .render(&tree, &vars(&[]), &dest)
        .unwrap_err();
    assert!(matches!(err, RenderError::MissingVariable(_)));
    assert!(!dest.exists());
}

#[test]
fn unresolved_token_in_text_fails_before_any_write() {
    let tpl = TempDir::new().unwrap();
    let tree = write_template(
        tpl.path(),
        MANIFEST,
        &[("README.md", b"{{service_name}} {{undeclared}}")],
    );
    let out = TempDir::new().unwrap();
    let dest = out.path().join("svc");

    let err = Materializer::default()
        .render(&tree, &vars(&[("service_name", "x")]), &dest)
        .unwrap_err();
    assert!(matches!(err, RenderError::UnresolvedToken { .. }));
    assert!(!dest.exists());
}

#[test]
fn colliding_output_paths_fail_before_any_write() {
    let tpl = TempDir::new().unwrap();
    let manifest = r#"
name = "T"
description = "d"

[files]
text = ["**/*.md"]
"#;
    let tree = write_template(
        tpl.path(),
        manifest,
        &[("{{a}}.md", b"1"), ("{{b}}.md", b"2")],
    );
    let out = TempDir::new().unwrap();
    let dest = out.path().join("svc");

    let err = Materializer::default()
        .render(&tree, &vars(&[("a", "same"), ("b", "same")]), &dest)
        .unwrap_err();
    assert!(matches!(err, RenderError::PathCollision { .. }));
    assert!(!dest.exists());
}

#[test]
fn traversal_shaped_values_are_rejected() {
    let tpl = TempDir::new().unwrap();
    let manifest = r#"
name = "T"
description = "d"
"#;
    let tree = write_template(tpl.path(), manifest, &[("{{dir}}/file.bin", b"x")]);
    let out = TempDir::new().unwrap();

    for bad in ["..", ".", "", "a/b", "a\\b"] {
        let dest = out.path().join("svc");
        let err = Materializer::default()
            .render(&tree, &vars(&[("dir", bad)]), &dest)
            .unwrap_err();
        assert!(
            matches!(err, RenderError::InvalidPath { .. }),
            "value {bad:?} should be rejected, got: {err}"
        );
        assert!(!dest.exists());
    }
}

#[test]
fn unclassified_files_are_copied_verbatim() {
    let tpl = TempDir::new().unwrap();
    // No [files] section at all: nothing is text, nothing gets corrupted.
    let manifest = "name = \"T\"\ndescription = \"d\"\n";
    let tree = write_template(tpl.path(), manifest, &[("script.sh", b"echo {{whatever}}")]);
    let out = TempDir::new().unwrap();
    let dest = out.path().join("svc");

    Materializer::default()
        .render(&tree, &vars(&[]), &dest)
        .unwrap();
    assert_eq!(
        fs::read(dest.join("script.sh")).unwrap(),
        b"echo {{whatever}}"
    );
}

#[test]
fn extra_variables_warn_but_render() {
    let tpl = TempDir::new().unwrap();
    let tree = write_template(tpl.path(), MANIFEST, &[("README.md", b"{{service_name}}")]);
    let out = TempDir::new().unwrap();
    let dest = out.path().join("svc");

    let report = Materializer::default()
        .render(
            &tree,
            &vars(&[("service_name", "x"), ("surplus", "y")]),
            &dest,
        )
        .unwrap();
    assert!(report.warnings.iter().any(|w| w.contains("surplus")));
    assert!(dest.join("README.md").exists());
}

#[test]
fn conditional_paths_follow_variable_values() {
    let tpl = TempDir::new().unwrap();
    let manifest = r#"
name = "T"
description = "d"

[[variables]]
name = "use_docker"
description = "Docker support"
default = "false"

[[conditionals]]
include = "docker"
when = "use_docker == true"
"#;
    let tree = write_template(
        tpl.path(),
        manifest,
        &[("docker/Dockerfile", b"FROM x"), ("keep.bin", b"k")],
    );
    let out = TempDir::new().unwrap();

    let skipped = out.path().join("without");
    Materializer::default()
        .render(&tree, &vars(&[]), &skipped)
        .unwrap();
    assert!(!skipped.join("docker").exists());
    assert!(skipped.join("keep.bin").exists());

    let included = out.path().join("with");
    Materializer::default()
        .render(&tree, &vars(&[("use_docker", "true")]), &included)
        .unwrap();
    assert!(included.join("docker/Dockerfile").exists());
}

#[test]
fn deep_trees_render_parents_before_children() {
    let tpl = TempDir::new().unwrap();
    let manifest = "name = \"T\"\ndescription = \"d\"\n";
    let tree = write_template(
        tpl.path(),
        manifest,
        &[("a/b/c/d/e.bin", b"deep"), ("a/b/x.bin", b"mid")],
    );
    let out = TempDir::new().unwrap();
    let dest = out.path().join("svc");

    let report = Materializer::default()
        .render(&tree, &vars(&[]), &dest)
        .unwrap();
    assert_eq!(report.files_written, 2);
    assert_eq!(fs::read(dest.join("a/b/c/d/e.bin")).unwrap(), b"deep");
}
