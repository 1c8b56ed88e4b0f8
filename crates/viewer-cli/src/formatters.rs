//! Output formatters for CLI commands.
//!
//! Provides consistent formatting across all CLI commands for JSON, text, and pretty output modes.

use anyhow::Result;
use colored::Colorize;
use html_viewer_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use html_viewer_cli::formatters::format_output;
/// use html_viewer_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Row {
///     path: String,
///     size: usize,
/// }
///
/// let row = Row {
///     path: "index.html".to_string(),
///     size: 42,
/// };
///
/// let output = format_output(&row, OutputFormat::Json)?;
/// assert!(output.contains("\"path\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Format data as plain text.
    ///
    /// Objects become `key: value` lines, arrays one line per element with
    /// object fields separated by tabs in key order. Suitable for piping to
    /// `cut` or `awk`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(match &value {
            Value::Array(items) => items
                .iter()
                .map(row)
                .collect::<Vec<_>>()
                .join("\n"),
            Value::Object(obj) => obj
                .iter()
                .map(|(key, val)| format!("{key}: {}", scalar(val)))
                .collect::<Vec<_>>()
                .join("\n"),
            other => scalar(other),
        })
    }

    fn row(value: &Value) -> String {
        match value {
            Value::Object(obj) => obj.values().map(scalar).collect::<Vec<_>>().join("\t"),
            other => scalar(other),
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use std::fmt::Write;

    /// Format data as colorized, human-readable output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(format_value(&value, 0))
    }

    /// Recursively format a JSON value with colors and indentation.
    fn format_value(value: &serde_json::Value, indent: usize) -> String {
        use serde_json::Value;

        let indent_str = "  ".repeat(indent);
        let next_indent_str = "  ".repeat(indent + 1);

        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => format!("\"{}\"", s.green()),
            Value::Array(arr) => {
                if arr.is_empty() {
                    return "[]".to_string();
                }

                let mut result = "[\n".to_string();
                for (i, item) in arr.iter().enumerate() {
                    result.push_str(&next_indent_str);
                    result.push_str(&format_value(item, indent + 1));
                    if i < arr.len() - 1 {
                        result.push(',');
                    }
                    result.push('\n');
                }
                result.push_str(&indent_str);
                result.push(']');
                result
            }
            Value::Object(obj) => {
                if obj.is_empty() {
                    return "{}".to_string();
                }

                let mut result = "{\n".to_string();
                let last = obj.len() - 1;
                for (i, (key, val)) in obj.iter().enumerate() {
                    let _ = write!(
                        result,
                        "{next_indent_str}\"{}\": {}",
                        key.blue().bold(),
                        format_value(val, indent + 1)
                    );
                    if i < last {
                        result.push(',');
                    }
                    result.push('\n');
                }
                result.push_str(&indent_str);
                result.push('}');
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        path: String,
        size: usize,
        preview: Option<String>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                path: "index.html".to_string(),
                size: 12,
                preview: Some("text".to_string()),
            },
            Row {
                path: "data.bin".to_string(),
                size: 3,
                preview: None,
            },
        ]
    }

    #[test]
    fn test_format_json() {
        let output = format_output(&rows(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["path"], "index.html");
        assert!(parsed[1]["preview"].is_null());
    }

    #[test]
    fn test_format_text_rows() {
        let output = format_output(&rows(), OutputFormat::Text).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines, vec!["index.html\ttext\t12", "data.bin\t-\t3"]);
    }

    #[test]
    fn test_format_text_object() {
        let output = format_output(
            &serde_json::json!({"key": "user_agent", "value": null}),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(output, "key: user_agent\nvalue: -");
    }

    #[test]
    fn test_format_pretty_contains_fields() {
        colored::control::set_override(false);
        let output = format_output(&rows(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("\"path\": \"index.html\""));
        assert!(output.contains("null"));
    }
}
