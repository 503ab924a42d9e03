//! Output formatting and styling

use colored::Colorize;

/// Output styling configuration
pub struct OutputStyle {
    /// Whether to colorize output
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl OutputStyle {
    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ok".green().bold(), msg)
        } else {
            format!("ok {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "x".red().bold(), msg)
        } else {
            format!("x {}", msg)
        }
    }

    /// Format warning message
    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "!".yellow(), msg)
        } else {
            format!("! {}", msg)
        }
    }

    /// Format a template or project name
    pub fn name(&self, name: &str) -> String {
        if self.use_colors {
            name.cyan().bold().to_string()
        } else {
            name.to_string()
        }
    }

    /// Format a variable name
    pub fn var(&self, name: &str) -> String {
        if self.use_colors {
            name.green().bold().to_string()
        } else {
            name.to_string()
        }
    }

    /// Format secondary detail text
    pub fn dim(&self, msg: &str) -> String {
        if self.use_colors {
            msg.dimmed().to_string()
        } else {
            msg.to_string()
        }
    }

    /// Format a path or value worth highlighting
    pub fn value(&self, msg: &str) -> String {
        if self.use_colors {
            msg.cyan().to_string()
        } else {
            msg.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> OutputStyle {
        OutputStyle { use_colors: false }
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let style = plain();
        assert_eq!(style.success("done"), "ok done");
        assert_eq!(style.error("bad"), "x bad");
        assert_eq!(style.warning("hm"), "! hm");
        assert_eq!(style.name("demo"), "demo");
        assert_eq!(style.dim("aside"), "aside");
    }

    #[test]
    fn test_colored_output_contains_message() {
        let style = OutputStyle { use_colors: true };
        assert!(style.success("done").contains("done"));
        assert!(style.error("bad").contains("bad"));
    }
}
