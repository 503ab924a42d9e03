//! Post-create hook execution
//!
//! The engine only reports the steps a template declares; running them is
//! this external runner's job. A failing step is a warning, not an abort:
//! the project is already materialized at this point.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use crate::output::OutputStyle;

/// Execute declared post-create steps in `working_dir`.
///
/// On Unix, steps run via `sh -c`; on Windows, via `cmd /C`.
pub fn execute_post_steps(steps: &[String], working_dir: &Path) -> Result<()> {
    let style = OutputStyle::default();

    for step in steps {
        println!("  Running: {}", style.dim(step));

        let output = if cfg!(target_os = "windows") {
            Command::new("cmd")
                .args(["/C", step])
                .current_dir(working_dir)
                .output()
        } else {
            Command::new("sh")
                .arg("-c")
                .arg(step)
                .current_dir(working_dir)
                .output()
        }
        .with_context(|| format!("Failed to execute post-create step: {}", step))?;

        if output.status.success() {
            println!("  {}", style.success("done"));
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eprintln!("  {}", style.warning(&format!("step failed: {}", stderr.trim())));
        }
    }
    Ok(())
}
