//! Backends wrapping the wkhtmltox command-line tools.
//!
//! Highest-priority entries of both chains: dedicated HTML converters with
//! predictable flags and good typographic output when installed.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::exec::{probe_version, run_tool, RenderWorkspace};
use super::{BackendFailure, RenderBackend, RenderTarget};
use crate::config::RendererConfig;
use crate::format::OutputFormat;

pub struct WkhtmltopdfBackend {
    binary: String,
    timeout: Duration,
}

impl WkhtmltopdfBackend {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            binary: config.wkhtmltopdf_bin.clone(),
            timeout: config.attempt_timeout,
        }
    }
}

#[async_trait]
impl RenderBackend for WkhtmltopdfBackend {
    fn name(&self) -> &'static str {
        "wkhtmltopdf"
    }

    async fn probe(&self) -> bool {
        probe_version(&self.binary).await
    }

    async fn convert(
        &self,
        markup: &str,
        target: &RenderTarget,
    ) -> Result<Vec<u8>, BackendFailure> {
        let RenderTarget::Pdf(options) = target else {
            return Err(BackendFailure::WrongTarget {
                tool: self.name().to_string(),
            });
        };

        let workspace = RenderWorkspace::prepare(markup, "pdf")?;
        let mut command = Command::new(&self.binary);
        command
            .arg("--quiet")
            .arg("--enable-local-file-access")
            .arg("--page-size")
            .arg(&options.page_size)
            .arg("--orientation")
            .arg(if options.landscape {
                "Landscape"
            } else {
                "Portrait"
            })
            .arg(&workspace.input)
            .arg(&workspace.output);

        run_tool(command, self.name(), self.timeout).await?;
        workspace.read_output(self.name())
    }
}

pub struct WkhtmltoimageBackend {
    binary: String,
    timeout: Duration,
}

impl WkhtmltoimageBackend {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            binary: config.wkhtmltoimage_bin.clone(),
            timeout: config.attempt_timeout,
        }
    }
}

#[async_trait]
impl RenderBackend for WkhtmltoimageBackend {
    fn name(&self) -> &'static str {
        "wkhtmltoimage"
    }

    async fn probe(&self) -> bool {
        probe_version(&self.binary).await
    }

    async fn convert(
        &self,
        markup: &str,
        target: &RenderTarget,
    ) -> Result<Vec<u8>, BackendFailure> {
        let RenderTarget::Image(options) = target else {
            return Err(BackendFailure::WrongTarget {
                tool: self.name().to_string(),
            });
        };

        let workspace = RenderWorkspace::prepare(markup, options.format.as_str())?;
        // wkhtmltoimage only knows the "jpg" spelling for JPEG output.
        let tool_format = match options.format {
            OutputFormat::Jpeg => "jpg",
            other => other.as_str(),
        };
        let mut command = Command::new(&self.binary);
        command
            .arg("--quiet")
            .arg("--enable-local-file-access")
            .arg("--format")
            .arg(tool_format)
            .arg("--width")
            .arg(options.width.to_string())
            .arg("--height")
            .arg(options.height.to_string())
            .arg("--quality")
            .arg(options.quality.to_string())
            .arg(&workspace.input)
            .arg(&workspace.output);

        run_tool(command, self.name(), self.timeout).await?;
        workspace.read_output(self.name())
    }
}
