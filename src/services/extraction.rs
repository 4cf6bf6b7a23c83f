use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Boundary to the OCR engine and PDF text extractor.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_image(&self, path: &Path) -> AppResult<String>;
    async fn extract_pdf(&self, path: &Path) -> AppResult<String>;
}

/// Shells out to `tesseract` for images and `pdftotext` for PDFs.
/// Binaries are configurable so deployments can point at pinned builds.
pub struct CommandTextExtractor {
    tesseract_bin: String,
    pdftotext_bin: String,
}

impl CommandTextExtractor {
    pub fn from_config(config: &Config) -> Self {
        Self {
            tesseract_bin: config.tesseract_bin.clone(),
            pdftotext_bin: config.pdftotext_bin.clone(),
        }
    }
}

#[async_trait]
impl TextExtractor for CommandTextExtractor {
    async fn extract_image(&self, path: &Path) -> AppResult<String> {
        let output = Command::new(&self.tesseract_bin)
            .arg(path)
            .arg("stdout")
            .output()
            .await
            .map_err(|err| {
                AppError::Upstream(format!("failed to launch {}: {}", self.tesseract_bin, err))
            })?;

        if !output.status.success() {
            return Err(AppError::Upstream(format!(
                "OCR failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn extract_pdf(&self, path: &Path) -> AppResult<String> {
        let output = Command::new(&self.pdftotext_bin)
            .arg("-layout")
            .arg(path)
            .arg("-")
            .output()
            .await
            .map_err(|err| {
                AppError::Upstream(format!("failed to launch {}: {}", self.pdftotext_bin, err))
            })?;

        if !output.status.success() {
            return Err(AppError::Upstream(format!(
                "PDF extraction failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
