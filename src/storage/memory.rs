//! In-memory object storage.
//!
//! Used by the test suite and handy for local development without a bucket.
//! Supports per-key fault injection so bulk-operation failure reporting can
//! be exercised.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::ObjectStorage;

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
    metadata: BTreeMap<String, String>,
}

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<BTreeMap<String, StoredObject>>,
    failing_keys: Mutex<HashSet<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write or move touching `key` (as source or target) fail.
    pub fn fail_on(&self, key: &str) {
        self.failing_keys.lock().insert(key.to_string());
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .get(key)
            .map(|object| object.content_type.clone())
    }

    pub fn metadata_of(&self, key: &str) -> Option<BTreeMap<String, String>> {
        self.objects.lock().get(key).map(|object| object.metadata.clone())
    }

    fn check_injected(&self, key: &str) -> Result<(), String> {
        if self.failing_keys.lock().contains(key) {
            Err(format!("injected failure for {key}"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<(), String> {
        self.check_injected(key)?;
        self.objects.lock().insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
                metadata: metadata.clone(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String> {
        Ok(self.objects.lock().get(key).map(|object| object.bytes.clone()))
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        Ok(self.objects.lock().contains_key(key))
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.objects.lock().remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, String> {
        Ok(self
            .objects
            .lock()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn copy(&self, from: &str, to: &str) -> Result<(), String> {
        self.check_injected(from)?;
        self.check_injected(to)?;
        let mut objects = self.objects.lock();
        let object = objects
            .get(from)
            .cloned()
            .ok_or_else(|| format!("source object {from} not found"))?;
        objects.insert(to.to_string(), object);
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), String> {
        self.check_injected(from)?;
        self.check_injected(to)?;
        let mut objects = self.objects.lock();
        let object = objects
            .remove(from)
            .ok_or_else(|| format!("source object {from} not found"))?;
        objects.insert(to.to_string(), object);
        Ok(())
    }
}
