//! Renderer chains.
//!
//! Converts certificate markup into binary artifacts by trying external
//! conversion tools in priority order until one succeeds. Every attempt runs
//! inside its own temporary directory that is removed on all exit paths, and
//! every external process is bounded by the configured per-attempt timeout.
//!
//! Per-backend failures are logged and swallowed so the chain can move on;
//! only full exhaustion surfaces to the caller. The image chain ends in a
//! synthetic placeholder backend that cannot fail, so image requests always
//! terminate successfully even on hosts with no rendering tools; the PDF
//! chain has no such fallback and can be fatally exhausted. That asymmetry
//! is intentional.

mod browser;
mod exec;
mod placeholder;
mod wkhtml;

pub use browser::{BrowserScriptBackend, ChromiumBackend};
pub use placeholder::PlaceholderBackend;
pub use wkhtml::{WkhtmltoimageBackend, WkhtmltopdfBackend};

use async_trait::async_trait;
use log::{debug, error, info, warn};
use thiserror::Error;

use crate::config::RendererConfig;
use crate::format::OutputFormat;

/// Page options for the PDF category.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub page_size: String,
    pub landscape: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: "A4".to_string(),
            landscape: true,
        }
    }
}

/// Dimensions and encoding options for the image category.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    /// JPEG quality, 1-100. Ignored for PNG.
    pub quality: u8,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            width: 1200,
            height: 900,
            quality: 90,
        }
    }
}

/// What a backend is asked to produce from the markup.
#[derive(Debug, Clone)]
pub enum RenderTarget {
    Pdf(PdfOptions),
    Image(ImageOptions),
}

impl RenderTarget {
    /// File extension of the artifact this target produces.
    pub fn extension(&self) -> &'static str {
        match self {
            RenderTarget::Pdf(_) => "pdf",
            RenderTarget::Image(options) => options.format.as_str(),
        }
    }
}

/// A single conversion attempt gone wrong. Chain-internal: the chain logs
/// these and proceeds to the next backend.
#[derive(Debug, Error)]
pub enum BackendFailure {
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with status {status}: {stderr}")]
    Exit {
        tool: String,
        status: i32,
        stderr: String,
    },
    #[error("{tool} timed out after {seconds}s")]
    Timeout { tool: String, seconds: u64 },
    #[error("{tool} produced no output file")]
    MissingOutput { tool: String },
    #[error("{tool} produced an empty output file")]
    EmptyOutput { tool: String },
    #[error("{tool} cannot render the requested target")]
    WrongTarget { tool: String },
    #[error("temporary workspace error: {0}")]
    Workspace(#[source] std::io::Error),
    #[error("image encoding failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Terminal error of a chain run.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Every registered backend was either unavailable or failed.
    #[error("no rendering backend available; attempted: {}", attempted.join(", "))]
    NoBackendAvailable { attempted: Vec<String> },
}

/// One external conversion capability.
///
/// `probe` must be side-effect-free and cheap; it runs on every request.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the required external tool is present in this environment.
    async fn probe(&self) -> bool;

    async fn convert(&self, markup: &str, target: &RenderTarget)
        -> Result<Vec<u8>, BackendFailure>;
}

/// Ordered fallback chain over render backends for one output category.
pub struct RenderChain {
    category: &'static str,
    backends: Vec<Box<dyn RenderBackend>>,
}

impl RenderChain {
    pub fn new(category: &'static str, backends: Vec<Box<dyn RenderBackend>>) -> Self {
        Self { category, backends }
    }

    /// The PDF chain: wkhtmltopdf, then the browser-automation script, then
    /// a direct headless Chromium invocation. No guaranteed-success tail.
    pub fn pdf(config: &RendererConfig) -> Self {
        Self::new(
            "pdf",
            vec![
                Box::new(WkhtmltopdfBackend::new(config)),
                Box::new(BrowserScriptBackend::new(config)),
                Box::new(ChromiumBackend::new(config)),
            ],
        )
    }

    /// The image chain: wkhtmltoimage, then the browser-automation script,
    /// then the synthetic placeholder that always succeeds.
    pub fn image(config: &RendererConfig) -> Self {
        Self::new(
            "image",
            vec![
                Box::new(WkhtmltoimageBackend::new(config)),
                Box::new(BrowserScriptBackend::new(config)),
                Box::new(PlaceholderBackend),
            ],
        )
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Try each backend in priority order and return the first successful
    /// conversion.
    pub async fn convert(
        &self,
        markup: &str,
        target: &RenderTarget,
    ) -> Result<Vec<u8>, RenderError> {
        let mut attempted: Vec<String> = Vec::new();

        for backend in &self.backends {
            attempted.push(backend.name().to_string());

            if !backend.probe().await {
                debug!(
                    "{} chain: backend {} unavailable, skipping",
                    self.category,
                    backend.name()
                );
                continue;
            }

            debug!(
                "{} chain: attempting conversion with {}",
                self.category,
                backend.name()
            );
            match backend.convert(markup, target).await {
                Ok(bytes) if !bytes.is_empty() => {
                    info!(
                        "{} chain: {} produced {} bytes",
                        self.category,
                        backend.name(),
                        bytes.len()
                    );
                    return Ok(bytes);
                }
                Ok(_) => {
                    warn!(
                        "{} chain: {} returned an empty artifact, trying next backend",
                        self.category,
                        backend.name()
                    );
                }
                Err(failure) => {
                    warn!(
                        "{} chain: {} failed ({}), trying next backend",
                        self.category,
                        backend.name(),
                        failure
                    );
                }
            }
        }

        error!(
            "{} chain exhausted, no backend succeeded (attempted: {})",
            self.category,
            attempted.join(", ")
        );
        Err(RenderError::NoBackendAvailable { attempted })
    }
}
