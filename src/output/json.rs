use crate::models::ValidationReport;

/// Pretty-printed JSON array of reports.
pub fn render_json(reports: &[ValidationReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
