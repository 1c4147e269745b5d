use tracing::debug;

use dossier_core::{CaseFile, Error, FileCategory, Result};

use crate::builtin;

/// In-memory archive of every case file available to the viewer.
///
/// Order within a category is the display order: newest additions are filed
/// in front, the way a fresh dossier lands on top of the stack.
#[derive(Debug, Clone)]
pub struct Archive {
    files: Vec<CaseFile>,
}

impl Archive {
    /// The full built-in corpus: case letters plus archive volumes.
    pub fn new() -> Self {
        let mut files = builtin::case_letters();
        files.extend(builtin::archive_volumes());
        Self { files }
    }

    /// An archive holding only the given files. Used by tests and by hosts
    /// that narrow the corpus.
    pub fn with_files(files: Vec<CaseFile>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[CaseFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&CaseFile> {
        self.files
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::CaseFileNotFound(id.to_string()))
    }

    /// Files under one category tag, preserving archive order.
    pub fn by_category(&self, category: FileCategory) -> Vec<&CaseFile> {
        self.files
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    /// File a new dossier (generated mid-session) on top of the stack.
    pub fn add(&mut self, file: CaseFile) {
        debug!(id = %file.id, category = %file.category, "filing new dossier");
        self.files.insert(0, file);
    }
}

impl Default for Archive {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_archive_is_populated() {
        let archive = Archive::new();
        assert_eq!(archive.len(), 15);
    }

    #[test]
    fn test_get_by_id() {
        let archive = Archive::new();
        assert_eq!(archive.get("case-1").unwrap().title, "The Silent Lake Sighting");
        assert!(matches!(
            archive.get("case-99"),
            Err(Error::CaseFileNotFound(_))
        ));
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let archive = Archive::new();
        let evidence = archive.by_category(FileCategory::Evidence);
        assert!(!evidence.is_empty());
        assert!(evidence.iter().all(|f| f.category == FileCategory::Evidence));
        assert_eq!(evidence[0].id, "case-3");
    }

    #[test]
    fn test_added_file_lands_on_top() {
        let mut archive = Archive::new();
        let file = CaseFile::new(
            "Fresh Dossier",
            "DEPT-7 SECURE",
            "Case Director",
            "May 02, 1979",
            FileCategory::Emails,
            "New intercept.",
        );
        let id = file.id.clone();
        archive.add(file);
        assert_eq!(archive.files()[0].id, id);
        assert_eq!(archive.by_category(FileCategory::Emails)[0].id, id);
    }
}
