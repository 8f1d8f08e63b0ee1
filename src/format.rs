//! Output format registry.
//!
//! Static mapping from requested output formats to their generator category
//! and content type. The tables here are fixed; adding a format means adding
//! one enum case and extending the match arms.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raised whenever a caller asks for a format the pipeline does not produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported output format '{0}'")]
pub struct UnsupportedFormat(pub String);

/// Every output format the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Html,
    Png,
    Jpg,
    Jpeg,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Pdf,
        OutputFormat::Html,
        OutputFormat::Png,
        OutputFormat::Jpg,
        OutputFormat::Jpeg,
    ];

    /// Parse a caller-supplied format string, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, UnsupportedFormat> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "html" => Ok(OutputFormat::Html),
            "png" => Ok(OutputFormat::Png),
            "jpg" => Ok(OutputFormat::Jpg),
            "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(UnsupportedFormat(raw.trim().to_string())),
        }
    }

    /// Canonical lowercase name, doubling as the file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Html => "html",
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn category(&self) -> FormatCategory {
        match self {
            OutputFormat::Pdf => FormatCategory::Pdf,
            OutputFormat::Html => FormatCategory::Html,
            OutputFormat::Png | OutputFormat::Jpg | OutputFormat::Jpeg => FormatCategory::Image,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Html => "text/html",
            OutputFormat::Png => "image/png",
            OutputFormat::Jpg | OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generator categories. Each category owns one generator implementation and,
/// for non-HTML categories, one renderer chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCategory {
    Pdf,
    Html,
    Image,
}

impl FormatCategory {
    pub const ALL: [FormatCategory; 3] = [
        FormatCategory::Pdf,
        FormatCategory::Html,
        FormatCategory::Image,
    ];

    /// Formats served by this category, in registry order.
    pub fn formats(&self) -> &'static [OutputFormat] {
        match self {
            FormatCategory::Pdf => &[OutputFormat::Pdf],
            FormatCategory::Html => &[OutputFormat::Html],
            FormatCategory::Image => &[OutputFormat::Png, OutputFormat::Jpg, OutputFormat::Jpeg],
        }
    }

    /// Human description used by listing UIs.
    pub fn description(&self) -> &'static str {
        match self {
            FormatCategory::Pdf => "Printable PDF document rendered by an external tool chain",
            FormatCategory::Html => "Self-contained HTML document, no external rendering",
            FormatCategory::Image => "Raster image (PNG or JPEG) rendered by an external tool chain",
        }
    }
}

/// Content type for an arbitrary file extension. Unknown extensions fall back
/// to `application/octet-stream`.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.trim().to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "html" => "text/html",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(OutputFormat::parse("PDF").unwrap(), OutputFormat::Pdf);
        assert_eq!(OutputFormat::parse(" jpeg ").unwrap(), OutputFormat::Jpeg);
    }

    #[test]
    fn parse_rejects_unknown_format() {
        let err = OutputFormat::parse("docx").unwrap_err();
        assert_eq!(err, UnsupportedFormat("docx".to_string()));
    }

    #[test]
    fn category_registry_is_exact() {
        assert_eq!(OutputFormat::Pdf.category(), FormatCategory::Pdf);
        assert_eq!(OutputFormat::Html.category(), FormatCategory::Html);
        assert_eq!(OutputFormat::Png.category(), FormatCategory::Image);
        assert_eq!(OutputFormat::Jpg.category(), FormatCategory::Image);
        assert_eq!(OutputFormat::Jpeg.category(), FormatCategory::Image);
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(content_type_for_extension("pdf"), "application/pdf");
        assert_eq!(
            content_type_for_extension("docx"),
            "application/octet-stream"
        );
    }
}
