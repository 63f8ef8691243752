//! Centralized UI formatting and color utilities
//!
//! This module provides a unified interface for status colors, icons, and
//! formatting patterns used throughout the groundwork CLI.

use colored::{ColoredString, Colorize};

/// Check if quiet mode is enabled via environment variable
///
/// Quiet mode suppresses groundwork's own status lines. It never touches
/// pip's output, which is inherited by the child process directly.
pub fn is_quiet() -> bool {
    std::env::var("GROUNDWORK_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Print an informational status line unless quiet mode is enabled.
pub fn status(line: &str) {
    if !is_quiet() {
        println!("{}", line);
    }
}

/// Returns a colored icon for a check outcome.
///
/// Icons:
/// - passed: ● (green)
/// - failed: ✗ (red)
pub fn check_icon(passed: bool) -> ColoredString {
    if passed {
        "●".green()
    } else {
        "✗".red()
    }
}

/// Color scheme for status-related text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for success/completion
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for errors/failures
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for identifiers (interpreter paths, manifest names)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Blue for informational text
    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }
}
