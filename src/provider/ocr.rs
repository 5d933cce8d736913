use std::path::Path;
use std::process::Command;

use crate::provider::embedded::file_name;
use crate::provider::ProviderError;

/// Recognition settings for one template. Page segmentation mode 6 treats
/// the page as a single uniform block, which suits these sparse forms.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub lang: String,
    pub psm: u8,
    pub dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: "spa".to_string(),
            psm: 6,
            dpi: 300,
        }
    }
}

/// Thin wrapper over the host tesseract binary.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Whether both host tools needed for the OCR track are on PATH.
    pub fn is_available() -> bool {
        let pdftoppm = Command::new("pdftoppm").arg("-v").output().is_ok();
        let tesseract = Command::new("tesseract").arg("--version").output().is_ok();

        if !pdftoppm {
            log::debug!("pdftoppm not found - install poppler-utils for OCR support");
        }
        if !tesseract {
            log::debug!("tesseract not found - install tesseract-ocr for OCR support");
        }

        pdftoppm && tesseract
    }

    pub fn recognize(
        &self,
        image_path: &Path,
        source_pdf: &Path,
        page_idx: usize,
    ) -> Result<String, ProviderError> {
        let file = file_name(source_pdf);
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.lang)
            .arg("--psm")
            .arg(self.config.psm.to_string())
            .output()
            .map_err(|e| ProviderError::Recognize {
                file: file.clone(),
                page: page_idx,
                reason: format!("failed to invoke tesseract ({e}); is tesseract-ocr installed?"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::Recognize {
                file,
                page: page_idx,
                reason: format!("tesseract exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
