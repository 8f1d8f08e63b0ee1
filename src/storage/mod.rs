//! Artifact storage.
//!
//! A deterministic key scheme over a pluggable [`ObjectStorage`] backend.
//! Keys are derived entirely from content-identifying fields
//! (`{number}/{format}/{template}.{format}`), so regeneration overwrites in
//! place and existence checks need no side lookup table. The store performs
//! no locking; concurrent uploads of the same key are last-writer-wins by
//! design.

pub mod memory;
pub mod supabase;

pub use memory::MemoryStorage;
pub use supabase::SupabaseStorage;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::format::OutputFormat;
use crate::model::CertificateRecord;

/// Prefix that archived artifacts move under, parallel to the live keys.
pub const ARCHIVE_PREFIX: &str = "archive";
/// Name of the metadata object written at the root of every archive.
pub const ARCHIVE_INFO_KEY: &str = "archive_info.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write object {key}: {reason}")]
    WriteFailed { key: String, reason: String },
    #[error("failed to read object {key}: {reason}")]
    ReadFailed { key: String, reason: String },
    #[error("failed to delete object {key}: {reason}")]
    DeleteFailed { key: String, reason: String },
    #[error("failed to list objects under {prefix}: {reason}")]
    ListFailed { prefix: String, reason: String },
    #[error(transparent)]
    UnsupportedFormat(#[from] crate::format::UnsupportedFormat),
}

/// Low-level object-storage operations. Backend errors are plain strings;
/// [`CertificateStore`] attaches key context and maps them into
/// [`StorageError`].
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<(), String>;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String>;

    async fn exists(&self, key: &str) -> Result<bool, String>;

    /// Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), String>;

    /// All keys under a prefix, recursively.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, String>;

    async fn copy(&self, from: &str, to: &str) -> Result<(), String>;

    async fn rename(&self, from: &str, to: &str) -> Result<(), String>;
}

/// Metadata object written alongside archived files. Created only by
/// [`CertificateStore::archive`]; the render path never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub certificate_id: Uuid,
    pub certificate_number: String,
    pub archived_at: DateTime<Utc>,
    pub reason: String,
    pub files_moved: usize,
    pub source_prefix: String,
}

/// Failure detail for one object of a bulk operation.
#[derive(Debug, Clone)]
pub struct TransferFailure {
    pub key: String,
    pub reason: String,
}

/// Per-file outcome of an archive operation. Partial failure is reported
/// here, never collapsed into a single boolean.
#[derive(Debug, Default)]
pub struct ArchiveOutcome {
    pub moved: Vec<String>,
    pub failed: Vec<TransferFailure>,
}

/// Per-file outcome of a certificate-to-certificate copy.
#[derive(Debug, Default)]
pub struct CopyOutcome {
    pub copied: Vec<String>,
    pub failed: Vec<TransferFailure>,
}

/// Certificate-aware facade over an object-storage backend: deterministic
/// keys, metadata tagging, archive and copy operations.
pub struct CertificateStore {
    backend: Arc<dyn ObjectStorage>,
    allowed_formats: Vec<OutputFormat>,
}

impl CertificateStore {
    pub fn new(backend: Arc<dyn ObjectStorage>) -> Self {
        Self {
            backend,
            allowed_formats: OutputFormat::ALL.to_vec(),
        }
    }

    /// Restrict the formats this store accepts on upload.
    pub fn with_allowed_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.allowed_formats = formats;
        self
    }

    /// Deterministic artifact key: same inputs always yield the same key.
    pub fn storage_key(certificate_number: &str, format: OutputFormat, template: &str) -> String {
        format!(
            "{certificate_number}/{format}/{template}.{format}",
            format = format.as_str()
        )
    }

    fn archive_key(certificate_number: &str, relative: &str) -> String {
        format!("{ARCHIVE_PREFIX}/{certificate_number}/{relative}")
    }

    fn artifact_metadata(
        certificate: &CertificateRecord,
        format: OutputFormat,
        template: &str,
    ) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        metadata.insert("certificate_id".to_string(), certificate.id.to_string());
        metadata.insert(
            "certificate_number".to_string(),
            certificate.certificate_number.clone(),
        );
        metadata.insert("user_id".to_string(), certificate.user_id.to_string());
        metadata.insert("test_id".to_string(), certificate.test_id.to_string());
        metadata.insert("format".to_string(), format.as_str().to_string());
        metadata.insert("template".to_string(), template.to_string());
        metadata.insert("generated_at".to_string(), Utc::now().to_rfc3339());
        metadata.insert(
            "content_type".to_string(),
            format.content_type().to_string(),
        );
        metadata.insert(
            "tags".to_string(),
            format!("certificate,{}", format.as_str()),
        );
        metadata
    }

    /// Persist rendered artifact bytes under the deterministic key.
    pub async fn upload(
        &self,
        certificate: &CertificateRecord,
        bytes: &[u8],
        format: OutputFormat,
        template: &str,
    ) -> Result<String, StorageError> {
        if !self.allowed_formats.contains(&format) {
            return Err(crate::format::UnsupportedFormat(format.as_str().to_string()).into());
        }

        let key = Self::storage_key(&certificate.certificate_number, format, template);
        let metadata = Self::artifact_metadata(certificate, format, template);

        debug!("uploading certificate artifact to {key}");
        self.backend
            .put(&key, bytes, format.content_type(), &metadata)
            .await
            .map_err(|reason| {
                error!("write of {key} failed: {reason}");
                StorageError::WriteFailed {
                    key: key.clone(),
                    reason,
                }
            })?;
        info!(
            "stored certificate artifact {key} ({} bytes)",
            bytes.len()
        );
        Ok(key)
    }

    pub async fn download(
        &self,
        certificate: &CertificateRecord,
        format: OutputFormat,
        template: &str,
    ) -> Result<Vec<u8>, StorageError> {
        let key = Self::storage_key(&certificate.certificate_number, format, template);
        match self.backend.get(&key).await {
            Ok(Some(bytes)) => Ok(bytes),
            Ok(None) => Err(StorageError::ReadFailed {
                key,
                reason: "object not found".to_string(),
            }),
            Err(reason) => {
                error!("read of {key} failed: {reason}");
                Err(StorageError::ReadFailed { key, reason })
            }
        }
    }

    pub async fn exists(
        &self,
        certificate: &CertificateRecord,
        format: OutputFormat,
        template: &str,
    ) -> Result<bool, StorageError> {
        let key = Self::storage_key(&certificate.certificate_number, format, template);
        self.backend
            .exists(&key)
            .await
            .map_err(|reason| StorageError::ReadFailed { key, reason })
    }

    /// Idempotent: deleting an artifact that was never stored succeeds.
    pub async fn delete(
        &self,
        certificate: &CertificateRecord,
        format: OutputFormat,
        template: &str,
    ) -> Result<(), StorageError> {
        let key = Self::storage_key(&certificate.certificate_number, format, template);
        self.backend
            .delete(&key)
            .await
            .map_err(|reason| StorageError::DeleteFailed { key, reason })
    }

    /// Move every artifact of a certificate under the archive prefix,
    /// preserving relative suffixes, then write one [`ArchiveRecord`]
    /// summarizing the operation. Files that fail to move are reported
    /// per-file; the others are not rolled back.
    pub async fn archive(
        &self,
        certificate: &CertificateRecord,
        reason: &str,
    ) -> Result<ArchiveOutcome, StorageError> {
        let prefix = certificate.storage_prefix();
        let keys = self
            .backend
            .list(&prefix)
            .await
            .map_err(|list_reason| StorageError::ListFailed {
                prefix: prefix.clone(),
                reason: list_reason,
            })?;

        info!(
            "archiving {} object(s) of certificate {}",
            keys.len(),
            certificate.certificate_number
        );

        let mut outcome = ArchiveOutcome::default();
        for key in keys {
            let relative = key.strip_prefix(&prefix).unwrap_or(&key).to_string();
            let destination = Self::archive_key(&certificate.certificate_number, &relative);
            match self.backend.rename(&key, &destination).await {
                Ok(()) => outcome.moved.push(key),
                Err(move_reason) => {
                    warn!("failed to archive {key}: {move_reason}");
                    outcome.failed.push(TransferFailure {
                        key,
                        reason: move_reason,
                    });
                }
            }
        }

        let record = ArchiveRecord {
            certificate_id: certificate.id,
            certificate_number: certificate.certificate_number.clone(),
            archived_at: Utc::now(),
            reason: reason.to_string(),
            files_moved: outcome.moved.len(),
            source_prefix: prefix,
        };
        let info_key = Self::archive_key(&certificate.certificate_number, ARCHIVE_INFO_KEY);
        let body = serde_json::to_vec(&record).map_err(|err| StorageError::WriteFailed {
            key: info_key.clone(),
            reason: err.to_string(),
        })?;

        let mut metadata = BTreeMap::new();
        metadata.insert("certificate_id".to_string(), certificate.id.to_string());
        metadata.insert(
            "certificate_number".to_string(),
            certificate.certificate_number.clone(),
        );
        metadata.insert("archived_at".to_string(), record.archived_at.to_rfc3339());

        self.backend
            .put(&info_key, &body, "application/json", &metadata)
            .await
            .map_err(|put_reason| {
                error!("write of archive record {info_key} failed: {put_reason}");
                StorageError::WriteFailed {
                    key: info_key.clone(),
                    reason: put_reason,
                }
            })?;

        Ok(outcome)
    }

    /// Duplicate every artifact of one certificate under another's prefix,
    /// remapping only the root segment of each key.
    pub async fn copy_certificate(
        &self,
        from: &CertificateRecord,
        to: &CertificateRecord,
    ) -> Result<CopyOutcome, StorageError> {
        let from_prefix = from.storage_prefix();
        let keys = self
            .backend
            .list(&from_prefix)
            .await
            .map_err(|reason| StorageError::ListFailed {
                prefix: from_prefix.clone(),
                reason,
            })?;

        let mut outcome = CopyOutcome::default();
        for key in keys {
            let relative = key.strip_prefix(&from_prefix).unwrap_or(&key).to_string();
            let destination = format!("{}/{relative}", to.certificate_number);
            match self.backend.copy(&key, &destination).await {
                Ok(()) => outcome.copied.push(destination),
                Err(copy_reason) => {
                    warn!("failed to copy {key} to {destination}: {copy_reason}");
                    outcome.failed.push(TransferFailure {
                        key,
                        reason: copy_reason,
                    });
                }
            }
        }
        Ok(outcome)
    }
}
