use std::path::{Path, PathBuf};

/// An absolute, normalised directory path that views are rooted at.
///
/// Only [`PathNormalizer`](crate::nav::path::PathNormalizer) builds one, after
/// checking the directory exists. A `Location` is replaced on every
/// directory change, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: PathBuf,
}

impl Location {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path as shown in the breadcrumb editor.
    pub fn display_text(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// The last path component, or the full path at a root.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| crate::nfc_string(&n.to_string_lossy()))
            .unwrap_or_else(|| self.display_text())
    }
}
