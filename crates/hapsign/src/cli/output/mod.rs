//! Output formatting utilities

use console::{style, Style};

/// Create a styled success line
pub fn success(message: &str) -> String {
    format!("{} {}", style("✓").green().bold(), message)
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}
