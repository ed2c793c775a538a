//! Forest rendering

mod json;
mod outline;

pub use self::{json::JsonFormatter, outline::OutlineFormatter};
use crate::model::Forest;

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Number of spaces for indentation
    pub indent_spaces: usize,
    /// Whether to render empty attribute maps and empty child lists
    pub include_empty: bool,
}

/// Default configuration for formatting
impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_spaces: 2,
            include_empty: false,
        }
    }
}

/// Trait for formatting a Forest as a string
pub trait Formatter {
    fn format(&self, forest: &Forest, config: &FormatConfig) -> String;
}

/// Common formatting functionality shared between formatters
pub trait CommonFormatter {
    /// Creates indentation strings
    fn create_indentation(indent: usize, config: &FormatConfig) -> (String, String) {
        let indent_str = " ".repeat(indent * config.indent_spaces);
        let inner_indent = " ".repeat((indent + 1) * config.indent_spaces);
        (indent_str, inner_indent)
    }

    /// Quotes a string, escaping quotes, backslashes and control characters
    fn quote(value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for c in value.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

/// Helper functions for formatting collections
pub mod helpers {
    pub fn format_empty_array() -> String {
        "[]".to_string()
    }

    pub fn format_empty_object() -> String {
        "{}".to_string()
    }

    pub fn join_with_commas(items: Vec<String>) -> String {
        items.join(",\n")
    }
}
