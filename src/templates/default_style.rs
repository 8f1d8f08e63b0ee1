//! The classic certificate layout: centered serif text inside a double
//! border, the style most callers issue under the name "default".

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
            r#"<p class="expiry">Valid until {}</p>"#,
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
  body {{ margin: 0; background: #f5f1e8; font-family: Georgia, 'Times New Roman', serif; color: #2b2b2b; }}
  .certificate {{ width: 960px; margin: 40px auto; padding: 60px 80px; background: #fffdf7;
                  border: 6px double #8a6d3b; text-align: center; }}
  h1 {{ font-size: 42px; letter-spacing: 4px; text-transform: uppercase; margin: 0 0 8px; color: #8a6d3b; }}
  .subtitle {{ font-size: 16px; font-style: italic; margin-bottom: 36px; }}
  .recipient {{ font-size: 34px; margin: 24px 0 8px; border-bottom: 2px solid #8a6d3b;
                display: inline-block; padding: 0 32px 6px; }}
  .achievement {{ font-size: 22px; margin: 24px 0; }}
  .score {{ font-size: 18px; margin-bottom: 6px; }}
  .grade {{ font-size: 18px; font-weight: bold; color: #8a6d3b; }}
  .date {{ margin-top: 28px; font-size: 16px; }}
  .expiry {{ font-size: 14px; color: #6b6b6b; }}
  .footer {{ margin-top: 40px; display: flex; justify-content: space-between; align-items: flex-end; }}
  .number {{ font-family: monospace; font-size: 13px; color: #6b6b6b; }}
</style>
</head>
<body>
<div class="certificate">
  <h1>Certificate of Completion</h1>
  <p class="subtitle">This certificate is proudly presented to</p>
  <div class="recipient">{user_name}</div>
  <p class="achievement">for successfully completing<br><strong>{title}</strong></p>
  <p class="score">Final score: {score} / 100</p>
  <p class="grade">{grade}</p>
  <p class="date">Completed on {completed}</p>
  {expiry_line}
  <div class="footer">
    <span class="number">No. {number}</span>
    {badge}
  </div>
</div>
</body>
</html>
"#
    )
}
