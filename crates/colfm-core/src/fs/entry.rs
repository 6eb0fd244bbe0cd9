//! File entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A single file or directory entry as listed by a view.
///
/// `FileEntry` is immutable. Directory sizes are reported as `0`; the
/// preview pipeline renders them as `-` rather than a byte count.
///
/// # Examples
///
/// ```no_run
/// use colfm_core::FileEntry;
/// use std::fs;
///
/// let metadata = fs::metadata("Cargo.toml").unwrap();
/// let entry = FileEntry::new("Cargo.toml".into(), &metadata);
/// assert_eq!(entry.name(), "Cargo.toml");
/// assert!(!entry.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    size: u64,
    modified: Option<SystemTime>,
    is_dir: bool,
    is_hidden: bool,
    is_symlink: bool,
    is_executable: bool,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// Hidden files are detected by a leading `.` in the file name.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| crate::nfc_string(&n.to_string_lossy()))
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let is_hidden = name.starts_with('.');

        Self {
            path,
            name,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
            is_dir: metadata.is_dir(),
            is_hidden,
            is_symlink: metadata.is_symlink(),
            is_executable: !metadata.is_dir() && is_executable(metadata),
        }
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file size in bytes. Always `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the last-modified time, if available.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns `true` if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Returns `true` for regular files carrying any execute bit.
    pub fn is_executable(&self) -> bool {
        self.is_executable
    }
}

#[cfg(unix)]
pub(crate) fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
pub(crate) fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    false
}
