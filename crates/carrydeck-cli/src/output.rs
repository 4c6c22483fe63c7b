//! Shared output layer for human/JSON parity across the one-shot commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: labeled text for humans, stable JSON for scripts.

use serde::Serialize;
use std::io::{self, Write};

/// Shared width for human output separators.
pub const RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by human output.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per command).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Trait implemented by any CLI result type that can be rendered in both modes.
pub trait Renderable {
    /// Render for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a self-contained JSON object.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;
}

/// Render a single [`Renderable`] item to stdout using the given output mode.
pub fn render_item<R: Renderable>(item: &R, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Human => item.render_human(&mut out),
        OutputMode::Json => {
            item.render_json(&mut out)?;
            writeln!(out)
        }
    }
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E3001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create an error with a suggestion and error code.
    pub fn with_details(
        message: impl Into<String>,
        suggestion: Option<&str>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.map(str::to_string),
            error_code: Some(error_code.into()),
        }
    }

    /// Render to the given writer in the requested format.
    pub fn render(&self, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
        match mode {
            OutputMode::Json => {
                serde_json::to_writer(&mut *w, self)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
                writeln!(w)
            }
            OutputMode::Human => {
                writeln!(w, "error: {}", self.message)?;
                if let Some(suggestion) = &self.suggestion {
                    writeln!(w, "  hint: {suggestion}")?;
                }
                Ok(())
            }
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    error.render(mode, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Renderable for Probe {
        fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "human")
        }

        fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
            write!(w, "{{\"probe\":true}}")
        }
    }

    #[test]
    fn modes_dispatch_to_the_right_renderer() {
        let mut buf = Vec::new();
        Probe.render_human(&mut buf).expect("human");
        assert_eq!(String::from_utf8_lossy(&buf), "human\n");

        let mut buf = Vec::new();
        Probe.render_json(&mut buf).expect("json");
        let value: serde_json::Value =
            serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(value["probe"], true);
    }

    #[test]
    fn cli_error_json_is_stable() {
        let err = CliError::with_details("no order found for cnv-9", Some("check the id"), "E3001");
        let mut buf = Vec::new();
        err.render(OutputMode::Json, &mut buf).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(value["message"], "no order found for cnv-9");
        assert_eq!(value["error_code"], "E3001");
    }

    #[test]
    fn cli_error_human_includes_hint() {
        let err = CliError::with_details("boom", Some("try again"), "E9001");
        let mut buf = Vec::new();
        err.render(OutputMode::Human, &mut buf).expect("render");
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("error: boom"));
        assert!(text.contains("hint: try again"));
    }

    #[test]
    fn kv_aligns_keys() {
        let mut buf = Vec::new();
        kv(&mut buf, "Customer", "Maya Singh").expect("kv");
        assert_eq!(String::from_utf8_lossy(&buf), "Customer:      Maya Singh\n");
    }
}
