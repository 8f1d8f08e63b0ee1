//! External-process plumbing shared by the tool-backed renderers.
//!
//! Each conversion attempt gets its own temporary directory holding a
//! uniquely named input document and output artifact. The directory is
//! deleted when the workspace drops, which covers every exit path including
//! timeouts and panics mid-attempt.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::Command;
use tokio::time::timeout;
use uuid::Uuid;

use super::BackendFailure;

pub(super) struct RenderWorkspace {
    // Held for its Drop; deleting the directory is the whole point.
    _dir: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl RenderWorkspace {
    /// Create the workspace and write the markup into its input file.
    pub fn prepare(markup: &str, output_extension: &str) -> Result<Self, BackendFailure> {
        let dir = tempfile::tempdir().map_err(BackendFailure::Workspace)?;
        let stem = Uuid::new_v4();
        let input = dir.path().join(format!("certificate-{stem}.html"));
        let output = dir.path().join(format!("certificate-{stem}.{output_extension}"));
        std::fs::write(&input, markup).map_err(BackendFailure::Workspace)?;
        Ok(Self {
            _dir: dir,
            input,
            output,
        })
    }

    /// Read the artifact the tool was asked to produce. Missing or empty
    /// output counts as a backend failure.
    pub fn read_output(&self, tool: &str) -> Result<Vec<u8>, BackendFailure> {
        match std::fs::read(&self.output) {
            Ok(bytes) if !bytes.is_empty() => Ok(bytes),
            Ok(_) => Err(BackendFailure::EmptyOutput {
                tool: tool.to_string(),
            }),
            Err(_) => Err(BackendFailure::MissingOutput {
                tool: tool.to_string(),
            }),
        }
    }
}

/// Run an external tool to completion, bounded by `limit`.
pub(super) async fn run_tool(
    mut command: Command,
    tool: &str,
    limit: Duration,
) -> Result<(), BackendFailure> {
    command.stdin(Stdio::null()).kill_on_drop(true);

    let output = match timeout(limit, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(BackendFailure::Spawn {
                tool: tool.to_string(),
                source,
            })
        }
        Err(_) => {
            return Err(BackendFailure::Timeout {
                tool: tool.to_string(),
                seconds: limit.as_secs(),
            })
        }
    };

    if !output.status.success() {
        return Err(BackendFailure::Exit {
            tool: tool.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Availability probe: the tool answers `--version` with a zero exit.
pub(super) async fn probe_version(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_is_removed_on_drop() {
        let ws = RenderWorkspace::prepare("<html></html>", "pdf").unwrap();
        let input = ws.input.clone();
        assert!(input.exists());
        drop(ws);
        assert!(!input.exists());
    }

    #[test]
    fn missing_output_is_a_backend_failure() {
        let ws = RenderWorkspace::prepare("<html></html>", "pdf").unwrap();
        assert!(matches!(
            ws.read_output("tool"),
            Err(BackendFailure::MissingOutput { .. })
        ));
    }

    #[test]
    fn empty_output_is_a_backend_failure() {
        let ws = RenderWorkspace::prepare("<html></html>", "pdf").unwrap();
        std::fs::write(&ws.output, b"").unwrap();
        assert!(matches!(
            ws.read_output("tool"),
            Err(BackendFailure::EmptyOutput { .. })
        ));
    }

    #[tokio::test]
    async fn probe_fails_for_missing_binary() {
        assert!(!probe_version("definitely-not-an-installed-tool").await);
    }
}
