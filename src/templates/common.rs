//! Shared helpers for certificate markup.
//!
//! Every variant formats scores, dates and the verification glyph the same
//! way; only the surrounding markup differs.

use chrono::{DateTime, Utc};

/// Base of the public verification URL embedded in every certificate.
pub const VERIFICATION_BASE_URL: &str = "https://verify.example.com/certificates";

/// Format a score for display: whole numbers without a decimal point,
/// everything else with one decimal place.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

/// Qualitative grade label from fixed score thresholds.
pub fn grade_label(score: f64) -> &'static str {
    if score >= 95.0 {
        "Excellent"
    } else if score >= 85.0 {
        "Very Good"
    } else if score >= 75.0 {
        "Good"
    } else if score >= 65.0 {
        "Satisfactory"
    } else {
        "Pass"
    }
}

/// Format a completion date like "January 2, 2026".
pub fn format_completion_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Escape a value for interpolation into HTML text or attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn verification_url(certificate_number: &str) -> String {
    format!("{VERIFICATION_BASE_URL}/{certificate_number}")
}

/// Placeholder verification glyph: an inline SVG square carrying the
/// verification URL. Stands in for a scannable code so the markup stays
/// self-contained.
pub fn verification_badge(certificate_number: &str) -> String {
    let url = escape_html(&verification_url(certificate_number));
    format!(
        r##"<svg class="verification-badge" width="96" height="96" viewBox="0 0 96 96" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="verification code">
  <rect x="2" y="2" width="92" height="92" fill="#ffffff" stroke="#1f2937" stroke-width="4"/>
  <rect x="14" y="14" width="20" height="20" fill="#1f2937"/>
  <rect x="62" y="14" width="20" height="20" fill="#1f2937"/>
  <rect x="14" y="62" width="20" height="20" fill="#1f2937"/>
  <text x="48" y="54" font-size="7" text-anchor="middle" font-family="monospace" fill="#1f2937">VERIFY</text>
  <desc>{url}</desc>
</svg>"##
    )
}
