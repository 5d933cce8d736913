use std::path::Path;

use crate::provider::{
    EmbeddedTextReader, FallbackPolicy, OcrConfig, PageRenderer, PageText, ProviderError,
    TesseractEngine, TextOrigin,
};

/// Page window for Trans-Segen resolutions: everything of interest sits on
/// the first two pages. Resolutions are usually scanned, so each page falls
/// back to the OCR track when its embedded text is below the policy
/// threshold.
#[derive(Debug, Clone)]
pub struct ResolutionTextProvider {
    policy: FallbackPolicy,
    engine: TesseractEngine,
}

impl ResolutionTextProvider {
    pub const LEADING_PAGES: usize = 2;

    pub fn new(config: OcrConfig) -> Self {
        Self {
            policy: FallbackPolicy::default(),
            engine: TesseractEngine::new(config),
        }
    }

    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn acquire(&self, path: &Path) -> Result<PageText, ProviderError> {
        let reader = EmbeddedTextReader::open(path)?;
        // Renderer and its scratch dir live only for this document.
        let renderer =
            PageRenderer::new(self.engine.config().dpi).map_err(|e| ProviderError::Render {
                file: reader.file_name().to_string(),
                page: 0,
                reason: format!("failed to create scratch dir: {e}"),
            })?;
        let mut text = PageText::new();

        for page_idx in 0..reader.page_count().min(Self::LEADING_PAGES) {
            let embedded = reader.page_text(page_idx)?;
            if self.policy.needs_ocr(&embedded) {
                log::info!(
                    "{} page {}: no usable text layer, running OCR",
                    reader.file_name(),
                    page_idx + 1
                );
                let rendered = renderer.render_page(path, page_idx)?;
                let recognized = self.engine.recognize(&rendered.path, path, page_idx)?;
                text.push_leading(page_idx, TextOrigin::Ocr, recognized);
            } else {
                text.push_leading(page_idx, TextOrigin::Embedded, embedded);
            }
        }

        Ok(text)
    }
}
