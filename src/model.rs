//! Certificate data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of an issued certificate as seen by the rendering pipeline.
///
/// The pipeline never mutates this record: the certificate number, score and
/// completion date are fixed at issuance. The certificate number is globally
/// unique and forms the root segment of every storage key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Display name of the certificate owner.
    pub user_name: String,
    /// The test/quiz this certificate was earned on.
    pub test_id: Uuid,
    /// Achievement title shown on the document.
    pub title: String,
    /// Final score, expected in [0, 100].
    pub score: f64,
    pub completed_at: DateTime<Utc>,
    /// Stable external identifier, e.g. "CERT-2025-AB1234".
    pub certificate_number: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Name of the visual template chosen at issuance.
    pub template: String,
}

impl CertificateRecord {
    /// Prefix under which every artifact of this certificate is stored.
    pub fn storage_prefix(&self) -> String {
        format!("{}/", self.certificate_number)
    }
}
