pub mod embedded;
pub mod fallback;
pub mod ocr;
pub mod renderer;
pub mod resolution;
pub mod social;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use embedded::EmbeddedTextReader;
pub use fallback::FallbackPolicy;
pub use ocr::{OcrConfig, TesseractEngine};
pub use renderer::PageRenderer;
pub use resolution::ResolutionTextProvider;
pub use social::SocialTextProvider;

/// Marker inserted before the last-page segment so downstream rules can tell
/// which region of the document they are looking at.
pub const LAST_PAGE_MARKER: &str = "=== ÚLTIMA PÁGINA ===";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to open {file}: {reason}")]
    Open { file: String, reason: String },

    #[error("failed to read page {page} of {file}: {reason}")]
    PageText {
        file: String,
        page: usize,
        reason: String,
    },

    #[error("failed to render page {page} of {file}: {reason}")]
    Render {
        file: String,
        page: usize,
        reason: String,
    },

    #[error("OCR failed on page {page} of {file}: {reason}")]
    Recognize {
        file: String,
        page: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextOrigin {
    Embedded,
    Ocr,
}

/// Which part of the page window a segment came from. Page indices are
/// zero-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageRegion {
    Leading(usize),
    Last(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSegment {
    pub region: PageRegion,
    pub origin: TextOrigin,
    pub text: String,
}

/// Recognized content of a bounded page window, kept as region-tagged
/// segments. Produced per extraction call, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageText {
    segments: Vec<PageSegment>,
}

impl PageText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_leading(&mut self, page: usize, origin: TextOrigin, text: String) {
        self.segments.push(PageSegment {
            region: PageRegion::Leading(page),
            origin,
            text,
        });
    }

    pub fn push_last(&mut self, page: usize, origin: TextOrigin, text: String) {
        self.segments.push(PageSegment {
            region: PageRegion::Last(page),
            origin,
            text,
        });
    }

    pub fn segments(&self) -> &[PageSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The exact text block handed to the field extractor: every leading
    /// segment followed by a blank line, the last-page segment preceded by
    /// the marker. The debug surface must reproduce this byte-for-byte.
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment.region {
                PageRegion::Leading(_) => {
                    out.push_str(&segment.text);
                    out.push_str("\n\n");
                }
                PageRegion::Last(_) => {
                    out.push_str(&format!("\n\n{}\n\n", LAST_PAGE_MARKER));
                    out.push_str(&segment.text);
                }
            }
        }
        out
    }
}
