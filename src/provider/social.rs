use std::path::Path;

use crate::provider::{EmbeddedTextReader, PageText, ProviderError, TextOrigin};

/// Page window for ficha social sheets: personal data lives on the first
/// pages, the risk-level section on the last page. These documents carry a
/// real text layer, so no OCR track is involved.
#[derive(Debug, Clone, Default)]
pub struct SocialTextProvider;

impl SocialTextProvider {
    pub const LEADING_PAGES: usize = 2;

    pub fn new() -> Self {
        Self
    }

    pub fn acquire(&self, path: &Path) -> Result<PageText, ProviderError> {
        let reader = EmbeddedTextReader::open(path)?;
        let page_count = reader.page_count();
        let mut text = PageText::new();

        for page_idx in 0..page_count.min(Self::LEADING_PAGES) {
            text.push_leading(page_idx, TextOrigin::Embedded, reader.page_text(page_idx)?);
        }

        // The last page is read independently even on short documents, so
        // the risk-level rules always see a marked last-page segment.
        if page_count > 0 {
            let last = page_count - 1;
            text.push_last(last, TextOrigin::Embedded, reader.page_text(last)?);
        }

        log::debug!(
            "acquired {} segment(s) from {}",
            text.segments().len(),
            reader.file_name()
        );
        Ok(text)
    }
}
