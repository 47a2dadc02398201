use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::debug;

/// Text-extraction capability consumed by the scan orchestrator.
/// Implementations must accept a `+`-joined multi-code language spec.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, image: &[u8], languages: &str) -> anyhow::Result<String>;
}

/// Runs the local `tesseract` binary, feeding the image over stdin and
/// reading the recognized text from stdout.
pub struct TesseractOcr {
    command: String,
}

impl TesseractOcr {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl TextExtractor for TesseractOcr {
    async fn extract(&self, image: &[u8], languages: &str) -> anyhow::Result<String> {
        debug!(languages = %languages, bytes = image.len(), "running tesseract");
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", languages])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn {}", self.command))?;

        let mut stdin = child.stdin.take().context("tesseract stdin not piped")?;
        stdin.write_all(image).await.context("write image to tesseract")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .context("wait for tesseract")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "tesseract exited with {} (languages {}): {}",
                output.status,
                languages,
                stderr.trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
