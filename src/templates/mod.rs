//! Certificate template engine.
//!
//! Pure markup generation: each variant turns a certificate record into one
//! self-contained HTML document (inline CSS, no external fetches). The
//! variants share a single data contract and differ only in visual
//! structure. No network or disk access happens here.

pub mod common;
mod default_style;
mod elegant;
mod modern;

use thiserror::Error;

use crate::model::CertificateRecord;

#[derive(Debug, Error)]
pub enum TemplateError {
    /// The certificate record is missing required fields or carries an
    /// out-of-range score. Never retried; no renderer is invoked.
    #[error("invalid certificate data: {reason}")]
    InvalidCertificateData { reason: String },
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
}

/// The closed set of visual styles. Adding a style means adding one case
/// here plus one pure render function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateVariant {
    Default,
    Elegant,
    Modern,
}

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 3] = [
        TemplateVariant::Default,
        TemplateVariant::Elegant,
        TemplateVariant::Modern,
    ];

    pub fn parse(name: &str) -> Result<Self, TemplateError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(TemplateVariant::Default),
            "elegant" => Ok(TemplateVariant::Elegant),
            "modern" => Ok(TemplateVariant::Modern),
            other => Err(TemplateError::UnknownTemplate(other.to_string())),
        }
    }

    /// Canonical name, used as the template segment of storage keys.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateVariant::Default => "default",
            TemplateVariant::Elegant => "elegant",
            TemplateVariant::Modern => "modern",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateVariant::Default => "Classic Certificate",
            TemplateVariant::Elegant => "Elegant Certificate",
            TemplateVariant::Modern => "Modern Certificate",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateVariant::Default => "Traditional centered layout with a serif face and double border",
            TemplateVariant::Elegant => "Script headings, gold accents and an ornamental frame",
            TemplateVariant::Modern => "Flat two-column layout with a bold accent bar",
        }
    }

    /// Render the certificate into markup.
    ///
    /// Validates the record first and fails with
    /// [`TemplateError::InvalidCertificateData`] before any markup is built.
    pub fn render(&self, certificate: &CertificateRecord) -> Result<String, TemplateError> {
        validate(certificate)?;
        Ok(match self {
            TemplateVariant::Default => default_style::render(certificate),
            TemplateVariant::Elegant => elegant::render(certificate),
            TemplateVariant::Modern => modern::render(certificate),
        })
    }
}

/// Check the minimal field set every variant requires.
fn validate(certificate: &CertificateRecord) -> Result<(), TemplateError> {
    let mut problems: Vec<String> = Vec::new();

    if certificate.user_name.trim().is_empty() {
        problems.push("user name is empty".to_string());
    }
    if certificate.title.trim().is_empty() {
        problems.push("achievement title is empty".to_string());
    }
    if certificate.certificate_number.trim().is_empty() {
        problems.push("certificate number is empty".to_string());
    }
    if !certificate.score.is_finite() || !(0.0..=100.0).contains(&certificate.score) {
        problems.push(format!(
            "score {} is outside the 0-100 range",
            certificate.score
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(TemplateError::InvalidCertificateData {
            reason: problems.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn certificate() -> CertificateRecord {
        CertificateRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: "Ada Lovelace".to_string(),
            test_id: Uuid::new_v4(),
            title: "Advanced Rust".to_string(),
            score: 97.5,
            completed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            certificate_number: "CERT-2025-AB1234".to_string(),
            expires_at: None,
            template: "default".to_string(),
        }
    }

    #[test]
    fn every_variant_renders_the_shared_fields() {
        let cert = certificate();
        for variant in TemplateVariant::ALL {
            let markup = variant.render(&cert).unwrap();
            assert!(markup.contains("Ada Lovelace"), "{}", variant.name());
            assert!(markup.contains("Advanced Rust"));
            assert!(markup.contains("97.5"));
            assert!(markup.contains("CERT-2025-AB1234"));
            assert!(markup.contains(common::VERIFICATION_BASE_URL));
        }
    }

    #[test]
    fn score_out_of_range_is_rejected_before_rendering() {
        let mut cert = certificate();
        cert.score = 101.0;
        assert!(matches!(
            TemplateVariant::Default.render(&cert),
            Err(TemplateError::InvalidCertificateData { .. })
        ));

        cert.score = -1.0;
        assert!(matches!(
            TemplateVariant::Default.render(&cert),
            Err(TemplateError::InvalidCertificateData { .. })
        ));
    }

    #[test]
    fn empty_certificate_number_is_rejected() {
        let mut cert = certificate();
        cert.certificate_number = "".to_string();
        let err = TemplateVariant::Modern.render(&cert).unwrap_err();
        assert!(err.to_string().contains("certificate number"));
    }

    #[test]
    fn unknown_template_name_is_rejected() {
        assert!(matches!(
            TemplateVariant::parse("baroque"),
            Err(TemplateError::UnknownTemplate(_))
        ));
        assert_eq!(
            TemplateVariant::parse("Default").unwrap(),
            TemplateVariant::Default
        );
    }

    #[test]
    fn user_data_is_html_escaped() {
        let mut cert = certificate();
        cert.user_name = "Eve <script>alert(1)</script>".to_string();
        let markup = TemplateVariant::Default.render(&cert).unwrap();
        assert!(!markup.contains("<script>alert"));
        assert!(markup.contains("&lt;script&gt;"));
    }
}
