//! Error types for `colfm-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. None of these errors is
//! fatal: every one of them has a defined fallback in the caller, usually a
//! status message or a metadata-only preview.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A navigation target does not exist, is not a directory, or is malformed.
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),

    /// The well-known trash directory is absent.
    #[error("trash folder not found: {0}")]
    TrashNotFound(PathBuf),

    /// Stat or enumeration of the path was denied.
    #[error("unreadable: {0}")]
    Unreadable(PathBuf),

    /// Image or text content could not be produced for a preview.
    #[error("decode failed: {0}")]
    DecodeFailed(String),

    /// Handing a file to the default application or launching it failed.
    #[error("launch failed: {0}")]
    LaunchFailed(String),

    /// A file-mutation action that has no implementation yet.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// A configuration file does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Maps an I/O error on `path` to the closest navigation-level variant.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => CoreError::InvalidPath(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::Unreadable(path.to_path_buf()),
            _ => CoreError::Io(err),
        }
    }

    /// Short user-facing text for the status line.
    pub fn status_text(&self) -> String {
        match self {
            CoreError::TrashNotFound(_) => "Trash folder not found".to_string(),
            CoreError::LaunchFailed(_) => "Could not open".to_string(),
            other => other.to_string(),
        }
    }
}

/// Convenience alias used throughout `colfm-core`.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn invalid_path_displays_path() {
        let err = CoreError::InvalidPath(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "invalid path: /missing/dir");
    }

    #[test]
    fn unreadable_displays_path() {
        let err = CoreError::Unreadable(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "unreadable: /secret");
    }

    #[test]
    fn not_implemented_displays_label() {
        let err = CoreError::NotImplemented("Rename");
        assert_eq!(err.to_string(), "Rename is not implemented");
    }

    #[test]
    fn trash_not_found_status_text() {
        let err = CoreError::TrashNotFound(PathBuf::from("/home/u/.local/share/Trash/files"));
        assert_eq!(err.status_text(), "Trash folder not found");
    }

    #[test]
    fn launch_failed_status_text() {
        let err = CoreError::LaunchFailed("no handler".to_string());
        assert_eq!(err.status_text(), "Could not open");
    }

    #[test]
    fn from_io_maps_not_found_to_invalid_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CoreError::from_io(Path::new("/x"), io_err);
        assert!(matches!(err, CoreError::InvalidPath(_)));
    }

    #[test]
    fn from_io_maps_permission_denied_to_unreadable() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        let err = CoreError::from_io(Path::new("/x"), io_err);
        assert!(matches!(err, CoreError::Unreadable(_)));
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
        assert!(core_err.to_string().contains("boom"));
    }

    #[test]
    fn config_parse_displays_message() {
        let err = CoreError::ConfigParse("unexpected token".to_string());
        assert_eq!(err.to_string(), "config parse error: unexpected token");
    }
}
