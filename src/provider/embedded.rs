use std::path::Path;

use lopdf::Document;

use crate::provider::ProviderError;

/// Embedded text layer of one PDF. The document stays open only for the
/// lifetime of this reader, which is scoped to a single batch entry.
#[derive(Debug)]
pub struct EmbeddedTextReader {
    doc: Document,
    pages: Vec<u32>,
    file: String,
}

impl EmbeddedTextReader {
    pub fn open(path: &Path) -> Result<Self, ProviderError> {
        let file = file_name(path);
        let doc = Document::load(path).map_err(|e| ProviderError::Open {
            file: file.clone(),
            reason: e.to_string(),
        })?;
        // lopdf keys pages by 1-based page number
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        Ok(Self { doc, pages, file })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn file_name(&self) -> &str {
        &self.file
    }

    /// Embedded text of one page, by zero-based index.
    pub fn page_text(&self, page_idx: usize) -> Result<String, ProviderError> {
        let number = *self
            .pages
            .get(page_idx)
            .ok_or_else(|| ProviderError::PageText {
                file: self.file.clone(),
                page: page_idx,
                reason: "page index out of range".to_string(),
            })?;
        self.doc
            .extract_text(&[number])
            .map_err(|e| ProviderError::PageText {
                file: self.file.clone(),
                page: page_idx,
                reason: e.to_string(),
            })
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn open_fails_on_missing_file() {
        let missing = PathBuf::from("test/no_such_file.pdf");
        let err = EmbeddedTextReader::open(&missing).unwrap_err();
        assert!(matches!(err, ProviderError::Open { .. }));
        assert!(err.to_string().contains("no_such_file.pdf"));
    }

    #[test]
    fn file_name_falls_back_to_display() {
        assert_eq!(file_name(Path::new("dir/ficha.pdf")), "ficha.pdf");
    }
}
