//! Elegant variant: script headings, gold accents, ornamental frame.

use super::common::{
    escape_html, format_completion_date, format_score, grade_label, verification_badge,
};
use crate::model::CertificateRecord;

pub(super) fn render(certificate: &CertificateRecord) -> String {
    let user_name = escape_html(&certificate.user_name);
    let title = escape_html(&certificate.title);
    let number = escape_html(&certificate.certificate_number);
    let score = format_score(certificate.score);
    let grade = grade_label(certificate.score);
    let completed = format_completion_date(&certificate.completed_at);
    let badge = verification_badge(&certificate.certificate_number);
    let expiry_line = match &certificate.expires_at {
        Some(expires) => format!(
            r#"<p class="expiry">This certificate remains valid until {}</p>"#,
            format_completion_date(expires)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Certificate {number}</title>
<style>
  body {{ margin: 0; background: #12100d; font-family: 'Palatino Linotype', Palatino, serif; }}
  .frame {{ width: 920px; margin: 48px auto; padding: 10px; background: linear-gradient(135deg, #c9a227, #f1d77e, #c9a227); }}
  .certificate {{ background: #1c1914; color: #f4ecd8; padding: 70px 90px; text-align: center; }}
  h1 {{ font-family: 'Brush Script MT', cursive; font-size: 56px; font-weight: normal;
        color: #f1d77e; margin: 0 0 4px; }}
  .rule {{ width: 180px; height: 1px; background: #c9a227; margin: 18px auto; }}
  .presented {{ font-size: 15px; letter-spacing: 3px; text-transform: uppercase; color: #bfae82; }}
  .recipient {{ font-size: 40px; color: #f1d77e; margin: 18px 0; }}
  .achievement {{ font-size: 20px; line-height: 1.6; }}
  .result {{ margin-top: 26px; font-size: 17px; }}
  .grade {{ color: #f1d77e; font-weight: bold; }}
  .date {{ margin-top: 24px; font-size: 15px; color: #bfae82; }}
  .expiry {{ font-size: 13px; color: #8f8468; }}
  .footer {{ margin-top: 44px; display: flex; justify-content: space-between; align-items: flex-end; }}
  .number {{ font-family: monospace; font-size: 12px; color: #8f8468; }}
</style>
</head>
<body>
<div class="frame">
<div class="certificate">
  <h1>Certificate of Achievement</h1>
  <div class="rule"></div>
  <p class="presented">Presented to</p>
  <div class="recipient">{user_name}</div>
  <p class="achievement">in recognition of the successful completion of<br><em>{title}</em></p>
  <p class="result">Score {score} / 100 &mdash; <span class="grade">{grade}</span></p>
  <p class="date">Awarded {completed}</p>
  {expiry_line}
  <div class="footer">
    <span class="number">No. {number}</span>
    {badge}
  </div>
</div>
</div>
</body>
</html>
"#
    )
}
