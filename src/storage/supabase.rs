//! Supabase object-storage backend.
//!
//! Speaks the storage REST API directly over a shared reqwest client.
//! Uploads use upsert semantics so regenerating an artifact overwrites the
//! previous object under the same key.

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::ObjectStorage;
use crate::config::SupabaseConfig;

pub struct SupabaseStorage {
    config: SupabaseConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
    /// Folders come back without an id; files carry one.
    id: Option<String>,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url, self.config.bucket, key
        )
    }

    /// Public URL of an object, usable for redirects.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.bucket, key
        )
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.api_key)
    }

    /// One page of the folder-scoped list endpoint.
    async fn list_entries(&self, prefix: &str) -> Result<Vec<ListedObject>, String> {
        let url = format!(
            "{}/storage/v1/object/list/{}",
            self.config.url, self.config.bucket
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({
                "prefix": prefix,
                "limit": 1000,
                "offset": 0,
            }))
            .send()
            .await
            .map_err(|err| format!("list request failed: {err}"))?;

        if !response.status().is_success() {
            return Err(format!("list returned status {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|err| format!("list response decode failed: {err}"))
    }

    async fn relocate(&self, from: &str, to: &str, endpoint: &str) -> Result<(), String> {
        let url = format!("{}/storage/v1/object/{endpoint}", self.config.url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({
                "bucketId": self.config.bucket,
                "sourceKey": from,
                "destinationKey": to,
            }))
            .send()
            .await
            .map_err(|err| format!("{endpoint} request failed: {err}"))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("{endpoint} returned status {}", response.status()))
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<(), String> {
        debug!("supabase put {key} ({} bytes)", bytes.len());
        let metadata_json = serde_json::to_string(metadata)
            .map_err(|err| format!("metadata encode failed: {err}"))?;

        let response = self
            .client
            .post(self.object_url(key))
            .header("Authorization", self.auth_header())
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .header("x-metadata", metadata_json)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|err| format!("upload request failed: {err}"))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("upload returned status {}", response.status()))
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String> {
        let response = self
            .client
            .get(self.object_url(key))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|err| format!("download request failed: {err}"))?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|err| format!("download body read failed: {err}"))?;
                Ok(Some(bytes.to_vec()))
            }
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => Ok(None),
            status => Err(format!("download returned status {status}")),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        let response = self
            .client
            .head(self.object_url(key))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|err| format!("head request failed: {err}"))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => Ok(false),
            status => Err(format!("head returned status {status}")),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let response = self
            .client
            .delete(self.object_url(key))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|err| format!("delete request failed: {err}"))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // Absent objects delete cleanly.
            StatusCode::NOT_FOUND => Ok(()),
            status => Err(format!("delete returned status {status}")),
        }
    }

    /// The list endpoint is folder-scoped, so walk folder entries with a
    /// worklist until only files remain.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, String> {
        let mut keys = Vec::new();
        let mut pending = vec![prefix.to_string()];
        while let Some(current) = pending.pop() {
            for entry in self.list_entries(&current).await? {
                let full = format!("{current}{}", entry.name);
                if entry.id.is_some() {
                    keys.push(full);
                } else {
                    pending.push(format!("{full}/"));
                }
            }
        }
        Ok(keys)
    }

    async fn copy(&self, from: &str, to: &str) -> Result<(), String> {
        self.relocate(from, to, "copy").await
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), String> {
        self.relocate(from, to, "move").await
    }
}
