//! Shared helpers for the integration tests: sample records, an in-memory
//! store and scripted render backends.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use certigen::render::{BackendFailure, RenderBackend, RenderTarget};
use certigen::storage::{CertificateStore, MemoryStorage};
use certigen::CertificateRecord;

/// Initialize logging for a test binary; honors RUST_LOG.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sample_certificate() -> CertificateRecord {
    CertificateRecord {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        user_name: "Ada Lovelace".to_string(),
        test_id: Uuid::new_v4(),
        title: "Advanced Rust".to_string(),
        score: 92.0,
        completed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        certificate_number: "CERT-2025-AB1234".to_string(),
        expires_at: None,
        template: "default".to_string(),
    }
}

/// Memory-backed store plus a handle to the backing storage for
/// inspection and fault injection.
pub fn memory_store() -> (Arc<CertificateStore>, Arc<MemoryStorage>) {
    let backend = Arc::new(MemoryStorage::new());
    let store = Arc::new(CertificateStore::new(backend.clone()));
    (store, backend)
}

/// Scripted backend for chain tests: fixed name, fixed availability, fixed
/// outcome, plus an attempt counter.
pub struct ScriptedBackend {
    name: &'static str,
    available: bool,
    outcome: Result<Vec<u8>, &'static str>,
    pub attempts: AtomicUsize,
}

impl ScriptedBackend {
    pub fn succeeding(name: &'static str, bytes: &[u8]) -> Self {
        Self {
            name,
            available: true,
            outcome: Ok(bytes.to_vec()),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str, reason: &'static str) -> Self {
        Self {
            name,
            available: true,
            outcome: Err(reason),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn unavailable(name: &'static str) -> Self {
        Self {
            name,
            available: false,
            outcome: Err("unavailable backends are never invoked"),
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RenderBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn probe(&self) -> bool {
        self.available
    }

    async fn convert(
        &self,
        _markup: &str,
        _target: &RenderTarget,
    ) -> Result<Vec<u8>, BackendFailure> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(bytes) => Ok(bytes.clone()),
            Err(reason) => Err(BackendFailure::Exit {
                tool: self.name.to_string(),
                status: 1,
                stderr: (*reason).to_string(),
            }),
        }
    }
}

/// Adapter so a test can keep an [`Arc`] handle to a backend while the
/// chain owns the boxed entry.
pub struct SharedBackend(pub Arc<ScriptedBackend>);

#[async_trait]
impl RenderBackend for SharedBackend {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    async fn probe(&self) -> bool {
        self.0.probe().await
    }

    async fn convert(
        &self,
        markup: &str,
        target: &RenderTarget,
    ) -> Result<Vec<u8>, BackendFailure> {
        self.0.convert(markup, target).await
    }
}
