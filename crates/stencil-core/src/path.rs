//! Output path resolution
//!
//! Path segments are substituted independently, then each resolved segment
//! is checked so that no variable value can escape the output root or
//! produce an unwritable name.

use crate::error::RenderError;
use crate::models::VariableMap;
use crate::substitute::substitute;

/// Resolve template-relative path segments against the variable map.
///
/// Each segment goes through token substitution on its own; afterwards a
/// segment that is empty, contains a path separator, or is `.` / `..` is
/// rejected with [`RenderError::InvalidPath`].
pub fn resolve_segments(
    segments: &[String],
    vars: &VariableMap,
) -> Result<Vec<String>, RenderError> {
    let display_path = segments.join("/");
    let mut resolved = Vec::with_capacity(segments.len());

    for segment in segments {
        let location = format!("path segment '{segment}'");
        let value = substitute(segment, vars, &location)?;
        check_segment(&value, &display_path)?;
        resolved.push(value);
    }

    Ok(resolved)
}

fn check_segment(segment: &str, path: &str) -> Result<(), RenderError> {
    let reject = |reason: &str| {
        Err(RenderError::InvalidPath {
            segment: segment.to_string(),
            path: path.to_string(),
            reason: reason.to_string(),
        })
    };

    if segment.is_empty() {
        return reject("resolves to an empty name");
    }
    if segment.contains('/') || segment.contains('\\') {
        return reject("contains a path separator");
    }
    if segment == "." || segment == ".." {
        return reject("is a relative path reference");
    }
    // NUL is not representable in any target filesystem.
    if segment.contains('\0') {
        return reject("contains a NUL byte");
    }

    Ok(())
}
