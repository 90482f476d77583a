//! Plain-text rendering for terminals.

use std::fmt::Write;

use crate::error_handling::ValidationStats;
use crate::models::ValidationReport;

fn verdict(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "FAILED"
    }
}

/// Renders one report as an indented block, errors before advisories.
pub fn render_text(report: &ValidationReport) -> String {
    let mut out = String::new();
    let header = if report.overall_ok() { "PASS" } else { "FAIL" };
    // Writing into a String cannot fail
    let _ = writeln!(out, "{header} {}", report.domain());

    let dns = report.dns();
    let a_records = if dns.a_records.is_empty() {
        "-".to_string()
    } else {
        dns.a_records.join(", ")
    };
    let _ = writeln!(
        out,
        "  DNS    {:<6} A: {a_records}  CNAME: {}",
        verdict(dns.ok),
        dns.cname.as_deref().unwrap_or("-")
    );
    for error in &dns.errors {
        let _ = writeln!(out, "    error: {error}");
    }
    for note in &dns.notes {
        let _ = writeln!(out, "    note: {note}");
    }

    let https = report.https();
    let status = https
        .status
        .map_or_else(|| "no response".to_string(), |s| format!("HTTP {s}"));
    let _ = writeln!(out, "  HTTPS  {:<6} {status}", verdict(https.ok));
    for error in &https.errors {
        let _ = writeln!(out, "    error: {error}");
    }

    let cert = report.cert();
    let expiry = match (&cert.not_after, cert.days_left) {
        (Some(not_after), Some(days)) => format!("expires {not_after} ({days} days left)"),
        _ => "no expiry".to_string(),
    };
    let _ = writeln!(out, "  CERT   {:<6} {expiry}", verdict(cert.ok));
    if !cert.sans.is_empty() {
        let _ = writeln!(out, "    names: {}", cert.sans.join(", "));
    }
    for error in &cert.errors {
        let _ = writeln!(out, "    error: {error}");
    }
    for warning in &cert.warnings {
        let _ = writeln!(out, "    warning: {warning}");
    }

    out
}

/// Batch totals followed by error counts per kind, most frequent first.
pub fn render_summary(stats: &ValidationStats) -> String {
    let total = stats.total();
    let mut out = format!(
        "Validated {total} domain{} ({} passed, {} failed)\n",
        if total == 1 { "" } else { "s" },
        stats.passed(),
        stats.failed()
    );

    let breakdown = stats.error_breakdown();
    if !breakdown.is_empty() {
        let _ = writeln!(out, "Error Counts ({} total):", stats.total_errors());
        for (kind, count) in breakdown {
            let _ = writeln!(out, "   {}: {count}", kind.as_str());
        }
    }
    out
}
