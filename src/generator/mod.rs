//! Per-format certificate generators and the factory that selects them.
//!
//! A generator composes the template engine with the renderer chain of its
//! category (HTML needs no chain) and exposes the uniform
//! generate/save/supported-formats contract.

use std::sync::Arc;

use async_trait::async_trait;
use log::error;
use thiserror::Error;

use crate::config::RendererConfig;
use crate::format::{FormatCategory, OutputFormat, UnsupportedFormat};
use crate::model::CertificateRecord;
use crate::render::{ImageOptions, PdfOptions, RenderChain, RenderError, RenderTarget};
use crate::storage::{CertificateStore, StorageError};
use crate::templates::{TemplateError, TemplateVariant};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormat),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Uniform contract for the per-category generators.
#[async_trait]
pub trait CertificateGenerator: Send + Sync {
    fn supported_formats(&self) -> &'static [OutputFormat];

    /// Render the certificate into artifact bytes for the requested format.
    async fn generate(
        &self,
        certificate: &CertificateRecord,
        format: OutputFormat,
    ) -> Result<Vec<u8>, GeneratorError>;

    /// Persist previously generated bytes, returning the storage key.
    /// Storage failures are logged with certificate context and propagated
    /// unchanged; a rendered-but-unsaved certificate is never a success.
    async fn save(
        &self,
        certificate: &CertificateRecord,
        bytes: &[u8],
        format: OutputFormat,
    ) -> Result<String, GeneratorError>;
}

fn ensure_supported(
    supported: &[OutputFormat],
    format: OutputFormat,
) -> Result<(), UnsupportedFormat> {
    if supported.contains(&format) {
        Ok(())
    } else {
        Err(UnsupportedFormat(format.as_str().to_string()))
    }
}

fn template_for(certificate: &CertificateRecord) -> Result<TemplateVariant, TemplateError> {
    TemplateVariant::parse(&certificate.template)
}

async fn store_artifact(
    store: &CertificateStore,
    certificate: &CertificateRecord,
    bytes: &[u8],
    format: OutputFormat,
) -> Result<String, GeneratorError> {
    let variant = template_for(certificate)?;
    match store.upload(certificate, bytes, format, variant.name()).await {
        Ok(key) => Ok(key),
        Err(err) => {
            error!(
                "failed to store {} artifact of certificate {}: {err}",
                format,
                certificate.certificate_number
            );
            Err(err.into())
        }
    }
}

/// HTML category: template output is the artifact, no renderer chain runs.
pub struct HtmlGenerator {
    store: Arc<CertificateStore>,
}

impl HtmlGenerator {
    pub fn new(store: Arc<CertificateStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CertificateGenerator for HtmlGenerator {
    fn supported_formats(&self) -> &'static [OutputFormat] {
        FormatCategory::Html.formats()
    }

    async fn generate(
        &self,
        certificate: &CertificateRecord,
        format: OutputFormat,
    ) -> Result<Vec<u8>, GeneratorError> {
        ensure_supported(self.supported_formats(), format)?;
        let markup = template_for(certificate)?.render(certificate)?;
        Ok(markup.into_bytes())
    }

    async fn save(
        &self,
        certificate: &CertificateRecord,
        bytes: &[u8],
        format: OutputFormat,
    ) -> Result<String, GeneratorError> {
        ensure_supported(self.supported_formats(), format)?;
        store_artifact(&self.store, certificate, bytes, format).await
    }
}

/// PDF category: template output piped through the PDF renderer chain.
pub struct PdfGenerator {
    chain: Arc<RenderChain>,
    options: PdfOptions,
    store: Arc<CertificateStore>,
}

impl PdfGenerator {
    pub fn new(chain: Arc<RenderChain>, options: PdfOptions, store: Arc<CertificateStore>) -> Self {
        Self {
            chain,
            options,
            store,
        }
    }
}

#[async_trait]
impl CertificateGenerator for PdfGenerator {
    fn supported_formats(&self) -> &'static [OutputFormat] {
        FormatCategory::Pdf.formats()
    }

    async fn generate(
        &self,
        certificate: &CertificateRecord,
        format: OutputFormat,
    ) -> Result<Vec<u8>, GeneratorError> {
        ensure_supported(self.supported_formats(), format)?;
        let markup = template_for(certificate)?.render(certificate)?;
        let bytes = self
            .chain
            .convert(&markup, &RenderTarget::Pdf(self.options.clone()))
            .await?;
        Ok(bytes)
    }

    async fn save(
        &self,
        certificate: &CertificateRecord,
        bytes: &[u8],
        format: OutputFormat,
    ) -> Result<String, GeneratorError> {
        ensure_supported(self.supported_formats(), format)?;
        store_artifact(&self.store, certificate, bytes, format).await
    }
}

/// Image category: one generator serves png/jpg/jpeg, parameterizing the
/// chain target with the requested encoding.
pub struct ImageGenerator {
    chain: Arc<RenderChain>,
    options: ImageOptions,
    store: Arc<CertificateStore>,
}

impl ImageGenerator {
    pub fn new(
        chain: Arc<RenderChain>,
        options: ImageOptions,
        store: Arc<CertificateStore>,
    ) -> Self {
        Self {
            chain,
            options,
            store,
        }
    }
}

#[async_trait]
impl CertificateGenerator for ImageGenerator {
    fn supported_formats(&self) -> &'static [OutputFormat] {
        FormatCategory::Image.formats()
    }

    async fn generate(
        &self,
        certificate: &CertificateRecord,
        format: OutputFormat,
    ) -> Result<Vec<u8>, GeneratorError> {
        ensure_supported(self.supported_formats(), format)?;
        let markup = template_for(certificate)?.render(certificate)?;
        let target = RenderTarget::Image(ImageOptions {
            format,
            ..self.options.clone()
        });
        let bytes = self.chain.convert(&markup, &target).await?;
        Ok(bytes)
    }

    async fn save(
        &self,
        certificate: &CertificateRecord,
        bytes: &[u8],
        format: OutputFormat,
    ) -> Result<String, GeneratorError> {
        ensure_supported(self.supported_formats(), format)?;
        store_artifact(&self.store, certificate, bytes, format).await
    }
}

/// Selects a generator by requested format and answers format-support
/// queries across all registered categories.
pub struct GeneratorFactory {
    html: HtmlGenerator,
    pdf: PdfGenerator,
    image: ImageGenerator,
}

impl GeneratorFactory {
    /// Build the factory with the default chains for this environment.
    pub fn new(renderer: &RendererConfig, store: Arc<CertificateStore>) -> Self {
        Self::with_chains(
            Arc::new(RenderChain::pdf(renderer)),
            Arc::new(RenderChain::image(renderer)),
            store,
        )
    }

    /// Build the factory around caller-supplied chains. Tests use this to
    /// substitute deterministic backends.
    pub fn with_chains(
        pdf_chain: Arc<RenderChain>,
        image_chain: Arc<RenderChain>,
        store: Arc<CertificateStore>,
    ) -> Self {
        Self {
            html: HtmlGenerator::new(store.clone()),
            pdf: PdfGenerator::new(pdf_chain, PdfOptions::default(), store.clone()),
            image: ImageGenerator::new(image_chain, ImageOptions::default(), store),
        }
    }

    pub fn create(&self, format: OutputFormat) -> &dyn CertificateGenerator {
        match format.category() {
            FormatCategory::Html => &self.html,
            FormatCategory::Pdf => &self.pdf,
            FormatCategory::Image => &self.image,
        }
    }

    /// Resolve a caller-supplied format string to its generator.
    pub fn create_for(&self, raw: &str) -> Result<&dyn CertificateGenerator, UnsupportedFormat> {
        Ok(self.create(OutputFormat::parse(raw)?))
    }

    /// Union of all categories' formats, de-duplicated, in registry order.
    pub fn supported_formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::new();
        for category in FormatCategory::ALL {
            for format in category.formats() {
                if !formats.contains(format) {
                    formats.push(*format);
                }
            }
        }
        formats
    }

    pub fn is_format_supported(&self, raw: &str) -> bool {
        OutputFormat::parse(raw)
            .map(|format| self.supported_formats().contains(&format))
            .unwrap_or(false)
    }

    /// Full pipeline for one request: render, then persist, returning the
    /// storage key.
    pub async fn generate_and_store(
        &self,
        certificate: &CertificateRecord,
        format: OutputFormat,
    ) -> Result<String, GeneratorError> {
        let generator = self.create(format);
        let bytes = generator.generate(certificate, format).await?;
        generator.save(certificate, &bytes, format).await
    }
}
