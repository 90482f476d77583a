//! Report rendering.
//!
//! Reports are written to stdout in the selected [`OutputFormat`]; logs go to
//! stderr so the two never interleave in a pipe.

mod json;
mod text;

pub use json::render_json;
pub use text::{render_summary, render_text};

use crate::config::OutputFormat;
use crate::models::ValidationReport;

/// Renders a batch of reports in `format`.
///
/// # Errors
///
/// Returns a `serde_json::Error` if JSON serialization fails.
pub fn render(reports: &[ValidationReport], format: &OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(reports
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => render_json(reports),
    }
}
