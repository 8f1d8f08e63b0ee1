//! Modern variant: flat two-column layout with a bold accent bar.

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
    let expiry_row = match &certificate.expires_at {
        Some(expires) => format!(
            r#"<div class="row"><span class="label">Valid until</span><span>{}</span></div>"#,
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
  body {{ margin: 0; background: #eef1f5; font-family: 'Segoe UI', Helvetica, Arial, sans-serif; color: #1f2937; }}
  .certificate {{ width: 960px; margin: 40px auto; background: #ffffff; display: flex;
                  box-shadow: 0 10px 30px rgba(31, 41, 55, 0.15); }}
  .accent {{ width: 120px; background: #2563eb; display: flex; align-items: flex-end;
             justify-content: center; padding-bottom: 40px; }}
  .accent span {{ color: #ffffff; writing-mode: vertical-rl; transform: rotate(180deg);
                  letter-spacing: 6px; font-size: 13px; text-transform: uppercase; }}
  .body {{ flex: 1; padding: 56px 64px; }}
  h1 {{ font-size: 20px; letter-spacing: 3px; text-transform: uppercase; color: #2563eb; margin: 0; }}
  .recipient {{ font-size: 38px; font-weight: 700; margin: 20px 0 4px; }}
  .achievement {{ font-size: 18px; color: #4b5563; margin-bottom: 32px; }}
  .row {{ display: flex; gap: 12px; margin: 8px 0; font-size: 16px; }}
  .label {{ width: 130px; color: #6b7280; text-transform: uppercase; font-size: 12px;
            letter-spacing: 1px; line-height: 22px; }}
  .grade {{ color: #2563eb; font-weight: 600; }}
  .footer {{ margin-top: 44px; display: flex; justify-content: space-between; align-items: flex-end; }}
  .number {{ font-family: monospace; font-size: 13px; color: #6b7280; }}
</style>
</head>
<body>
<div class="certificate">
  <div class="accent"><span>Certified</span></div>
  <div class="body">
    <h1>Certificate of Completion</h1>
    <div class="recipient">{user_name}</div>
    <p class="achievement">has completed <strong>{title}</strong></p>
    <div class="row"><span class="label">Score</span><span>{score} / 100</span></div>
    <div class="row"><span class="label">Grade</span><span class="grade">{grade}</span></div>
    <div class="row"><span class="label">Completed</span><span>{completed}</span></div>
    {expiry_row}
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
