use std::path::{Path, PathBuf};

use crate::core::record::DocumentRecord;
use crate::template::DocumentTemplate;

/// Mutable state of one extraction session: the loaded documents and the
/// last result set. One session per template; sessions do not share state.
pub struct Session<T: DocumentTemplate> {
    template: T,
    files: Vec<PathBuf>,
    records: Vec<DocumentRecord<T::Fields>>,
}

impl<T: DocumentTemplate> Session<T> {
    pub fn new(template: T) -> Self {
        Self {
            template,
            files: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn template(&self) -> &T {
        &self.template
    }

    /// Appends documents in the given order, skipping paths already loaded.
    /// Returns the total number of loaded documents.
    pub fn add_files<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in paths {
            if !self.files.contains(&path) {
                self.files.push(path);
            }
        }
        self.files.len()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect()
    }

    pub fn first_file(&self) -> Option<&Path> {
        self.files.first().map(PathBuf::as_path)
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn records(&self) -> &[DocumentRecord<T::Fields>] {
        &self.records
    }

    pub(crate) fn replace_records(&mut self, records: Vec<DocumentRecord<T::Fields>>) {
        self.records = records;
    }

    /// Drops loaded documents and the result set together.
    pub fn clear(&mut self) {
        self.files.clear();
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::SocialTemplate;
    use pretty_assertions::assert_eq;

    fn session() -> Session<SocialTemplate> {
        Session::new(SocialTemplate::new())
    }

    #[test]
    fn add_files_keeps_order_and_dedups_on_insert() {
        let mut s = session();
        let total = s.add_files([
            PathBuf::from("a.pdf"),
            PathBuf::from("b.pdf"),
            PathBuf::from("a.pdf"),
        ]);
        assert_eq!(total, 2);
        assert_eq!(s.file_names(), vec!["a.pdf", "b.pdf"]);

        let total = s.add_files([PathBuf::from("b.pdf"), PathBuf::from("c.pdf")]);
        assert_eq!(total, 3);
        assert_eq!(s.first_file(), Some(Path::new("a.pdf")));
    }

    #[test]
    fn clear_resets_files_and_records_together() {
        let mut s = session();
        s.add_files([PathBuf::from("a.pdf")]);
        s.replace_records(vec![DocumentRecord::failed("a.pdf", "unreadable")]);
        assert!(s.has_files() && s.has_records());

        s.clear();
        assert!(!s.has_files());
        assert!(!s.has_records());
    }
}
