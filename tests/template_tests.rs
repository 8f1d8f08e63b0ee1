mod common;

use certigen::templates::common::{
    format_completion_date, format_score, grade_label, verification_url,
};
use certigen::{TemplateError, TemplateVariant};

use common::sample_certificate;

#[test]
fn grade_labels_follow_the_fixed_thresholds() {
    assert_eq!(grade_label(100.0), "Excellent");
    assert_eq!(grade_label(95.0), "Excellent");
    assert_eq!(grade_label(94.9), "Very Good");
    assert_eq!(grade_label(85.0), "Very Good");
    assert_eq!(grade_label(80.0), "Good");
    assert_eq!(grade_label(75.0), "Good");
    assert_eq!(grade_label(70.0), "Satisfactory");
    assert_eq!(grade_label(65.0), "Satisfactory");
    assert_eq!(grade_label(64.9), "Pass");
    assert_eq!(grade_label(0.0), "Pass");
}

#[test]
fn scores_format_without_spurious_decimals() {
    assert_eq!(format_score(100.0), "100");
    assert_eq!(format_score(92.0), "92");
    assert_eq!(format_score(87.5), "87.5");
}

#[test]
fn completion_dates_are_human_readable() {
    let cert = sample_certificate();
    assert_eq!(format_completion_date(&cert.completed_at), "June 1, 2025");
}

#[test]
fn verification_url_embeds_the_certificate_number() {
    assert_eq!(
        verification_url("CERT-2025-AB1234"),
        "https://verify.example.com/certificates/CERT-2025-AB1234"
    );
}

#[test]
fn variants_share_the_data_contract_but_differ_in_markup() {
    let cert = sample_certificate();
    let default = TemplateVariant::Default.render(&cert).unwrap();
    let elegant = TemplateVariant::Elegant.render(&cert).unwrap();
    let modern = TemplateVariant::Modern.render(&cert).unwrap();

    for markup in [&default, &elegant, &modern] {
        assert!(markup.contains("Ada Lovelace"));
        assert!(markup.contains("CERT-2025-AB1234"));
        assert!(markup.contains("Very Good"));
    }
    assert_ne!(default, elegant);
    assert_ne!(elegant, modern);
}

#[test]
fn listing_metadata_is_present_for_every_variant() {
    for variant in TemplateVariant::ALL {
        assert!(!variant.name().is_empty());
        assert!(!variant.display_name().is_empty());
        assert!(!variant.description().is_empty());
        assert_eq!(TemplateVariant::parse(variant.name()).unwrap(), variant);
    }
}

#[test]
fn expiry_appears_only_when_set() {
    let mut cert = sample_certificate();
    let without = TemplateVariant::Default.render(&cert).unwrap();
    assert!(!without.contains("Valid until"));

    cert.expires_at = Some(cert.completed_at + chrono::Duration::days(365));
    let with = TemplateVariant::Default.render(&cert).unwrap();
    assert!(with.contains("Valid until June 1, 2026"));
}

#[test]
fn validation_reports_every_problem_at_once() {
    let mut cert = sample_certificate();
    cert.user_name = "  ".to_string();
    cert.certificate_number = String::new();
    cert.score = 101.0;

    let err = TemplateVariant::Elegant.render(&cert).unwrap_err();
    let TemplateError::InvalidCertificateData { reason } = err else {
        panic!("expected InvalidCertificateData");
    };
    assert!(reason.contains("user name"));
    assert!(reason.contains("certificate number"));
    assert!(reason.contains("score"));
}
