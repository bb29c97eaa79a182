//! CLI theme and styling.

use colored::Colorize;

use tabula_core::TableKind;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a separator line.
    pub(crate) fn separator() -> String {
        "━".repeat(72).dimmed().to_string()
    }

    /// Format a table kind, padded to `width` before coloring.
    pub(crate) fn kind(kind: TableKind, width: usize) -> String {
        match kind {
            TableKind::Data => format!("{:<width$}", "data").green().to_string(),
            TableKind::Metadata => format!("{:<width$}", "metadata").magenta().to_string(),
        }
    }
}
