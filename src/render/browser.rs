//! Browser-based backends: a Node automation script and a direct headless
//! Chromium invocation.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::exec::{probe_version, run_tool, RenderWorkspace};
use super::{BackendFailure, RenderBackend, RenderTarget};
use crate::config::RendererConfig;

/// Invokes the bundled automation script as a separate process with exactly
/// two positional arguments: input path, output path. The script decides how
/// to render from the output extension, so the same backend serves both the
/// PDF and image chains.
pub struct BrowserScriptBackend {
    node_binary: String,
    script: PathBuf,
    timeout: Duration,
}

impl BrowserScriptBackend {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            node_binary: config.node_bin.clone(),
            script: config.browser_script.clone(),
            timeout: config.attempt_timeout,
        }
    }
}

#[async_trait]
impl RenderBackend for BrowserScriptBackend {
    fn name(&self) -> &'static str {
        "browser-script"
    }

    async fn probe(&self) -> bool {
        self.script.is_file() && probe_version(&self.node_binary).await
    }

    async fn convert(
        &self,
        markup: &str,
        target: &RenderTarget,
    ) -> Result<Vec<u8>, BackendFailure> {
        let workspace = RenderWorkspace::prepare(markup, target.extension())?;
        let mut command = Command::new(&self.node_binary);
        command
            .arg(&self.script)
            .arg(&workspace.input)
            .arg(&workspace.output);

        run_tool(command, self.name(), self.timeout).await?;
        workspace.read_output(self.name())
    }
}

/// Last real PDF backend: call the Chromium binary directly with
/// `--print-to-pdf`. Page options are not configurable on this path; it
/// exists so a bare Chromium install can still produce a document.
pub struct ChromiumBackend {
    binary: String,
    timeout: Duration,
}

impl ChromiumBackend {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            binary: config.chromium_bin.clone(),
            timeout: config.attempt_timeout,
        }
    }
}

#[async_trait]
impl RenderBackend for ChromiumBackend {
    fn name(&self) -> &'static str {
        "chromium"
    }

    async fn probe(&self) -> bool {
        probe_version(&self.binary).await
    }

    async fn convert(
        &self,
        markup: &str,
        target: &RenderTarget,
    ) -> Result<Vec<u8>, BackendFailure> {
        if !matches!(target, RenderTarget::Pdf(_)) {
            return Err(BackendFailure::WrongTarget {
                tool: self.name().to_string(),
            });
        }

        let workspace = RenderWorkspace::prepare(markup, "pdf")?;
        let mut command = Command::new(&self.binary);
        command
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg(format!("--print-to-pdf={}", workspace.output.display()))
            .arg(&workspace.input);

        run_tool(command, self.name(), self.timeout).await?;
        workspace.read_output(self.name())
    }
}
