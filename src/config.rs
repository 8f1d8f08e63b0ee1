//! Environment-driven configuration.
//!
//! Both config structs follow the `from_env` convention: load `.env` via
//! dotenvy, then read individual variables with sensible defaults for
//! everything that has one.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Connection settings for the Supabase storage backend.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, without a trailing slash.
    pub url: String,
    pub api_key: String,
    pub bucket: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let url = env::var("SUPABASE_URL")
            .map_err(|_| ConfigError::MissingVar("SUPABASE_URL"))?
            .trim_end_matches('/')
            .to_string();
        let api_key = env::var("SUPABASE_SERVICE_KEY")
            .or_else(|_| env::var("SUPABASE_ANON_KEY"))
            .map_err(|_| ConfigError::MissingVar("SUPABASE_SERVICE_KEY"))?;
        let bucket =
            env::var("CERTIFICATE_BUCKET").unwrap_or_else(|_| "certificates".to_string());

        Ok(Self {
            url,
            api_key,
            bucket,
        })
    }
}

/// Locations of the external rendering tools and the per-attempt time limit.
///
/// Every field has a default that matches a standard PATH install, so a bare
/// `RendererConfig::default()` works on a fully provisioned host and the env
/// overrides exist for containers that place tools elsewhere.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub wkhtmltopdf_bin: String,
    pub wkhtmltoimage_bin: String,
    pub node_bin: String,
    /// Browser-automation script invoked as `node <script> <input> <output>`.
    pub browser_script: PathBuf,
    pub chromium_bin: String,
    /// Upper bound for a single external-process attempt.
    pub attempt_timeout: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            wkhtmltopdf_bin: "wkhtmltopdf".to_string(),
            wkhtmltoimage_bin: "wkhtmltoimage".to_string(),
            node_bin: "node".to_string(),
            browser_script: PathBuf::from("scripts/render_page.js"),
            chromium_bin: "chromium".to_string(),
            attempt_timeout: Duration::from_secs(30),
        }
    }
}

impl RendererConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(bin) = env::var("WKHTMLTOPDF_BIN") {
            config.wkhtmltopdf_bin = bin;
        }
        if let Ok(bin) = env::var("WKHTMLTOIMAGE_BIN") {
            config.wkhtmltoimage_bin = bin;
        }
        if let Ok(bin) = env::var("NODE_BIN") {
            config.node_bin = bin;
        }
        if let Ok(script) = env::var("RENDER_SCRIPT") {
            config.browser_script = PathBuf::from(script);
        }
        if let Ok(bin) = env::var("CHROMIUM_BIN") {
            config.chromium_bin = bin;
        }
        if let Ok(secs) = env::var("RENDER_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.attempt_timeout = Duration::from_secs(secs.max(1));
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_renderer_config_uses_path_binaries() {
        let config = RendererConfig::default();
        assert_eq!(config.wkhtmltopdf_bin, "wkhtmltopdf");
        assert_eq!(config.attempt_timeout, Duration::from_secs(30));
    }
}
