use std::path::Path;

use serde::Serialize;

use crate::core::record::{ResolutionFields, SocialFields, TabularRecord};
use crate::extract::{resolution, social, FieldRule};
use crate::provider::{OcrConfig, PageText, ProviderError, ResolutionTextProvider, SocialTextProvider};

/// One document template: how to acquire its page window and how to turn
/// the acquired text into fields. Both pipelines share this seam, so the
/// session and batch code is written once.
pub trait DocumentTemplate {
    type Fields: TabularRecord + Serialize + Clone;

    fn name(&self) -> &'static str;
    fn acquire_text(&self, path: &Path) -> Result<PageText, ProviderError>;
    fn extract_fields(&self, text: &str) -> Self::Fields;
    fn rules(&self) -> &'static [FieldRule];
}

/// Ficha social sheets: embedded text, first pages plus marked last page.
#[derive(Debug, Clone, Default)]
pub struct SocialTemplate {
    provider: SocialTextProvider,
}

impl SocialTemplate {
    pub fn new() -> Self {
        Self {
            provider: SocialTextProvider::new(),
        }
    }
}

impl DocumentTemplate for SocialTemplate {
    type Fields = SocialFields;

    fn name(&self) -> &'static str {
        "social"
    }

    fn acquire_text(&self, path: &Path) -> Result<PageText, ProviderError> {
        self.provider.acquire(path)
    }

    fn extract_fields(&self, text: &str) -> SocialFields {
        social::extract(text)
    }

    fn rules(&self) -> &'static [FieldRule] {
        social::RULES
    }
}

/// Trans-Segen resolutions: scanned documents, OCR fallback per page.
#[derive(Debug, Clone)]
pub struct ResolutionTemplate {
    provider: ResolutionTextProvider,
}

impl ResolutionTemplate {
    pub fn new(config: OcrConfig) -> Self {
        Self {
            provider: ResolutionTextProvider::new(config),
        }
    }
}

impl Default for ResolutionTemplate {
    fn default() -> Self {
        Self::new(OcrConfig::default())
    }
}

impl DocumentTemplate for ResolutionTemplate {
    type Fields = ResolutionFields;

    fn name(&self) -> &'static str {
        "resolution"
    }

    fn acquire_text(&self, path: &Path) -> Result<PageText, ProviderError> {
        self.provider.acquire(path)
    }

    fn extract_fields(&self, text: &str) -> ResolutionFields {
        resolution::extract(text)
    }

    fn rules(&self) -> &'static [FieldRule] {
        resolution::RULES
    }
}
