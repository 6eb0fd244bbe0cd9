//! Path canonicalisation for navigation targets.
//!
//! Normalisation is lexical: `.` segments and redundant separators are
//! dropped and `..` pops the previous component. Symlinks are not resolved,
//! so the breadcrumb shows the path the user actually walked.

use std::path::{Component, Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::nav::location::Location;

/// Lexically normalises `path` without touching the file system.
///
/// `..` at the root stays at the root. Relative paths stay relative; a
/// leading `..` that cannot be popped is kept.
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let poppable = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if poppable {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Turns raw, user-typed or programmatic paths into absolute normalised ones.
///
/// Relative input is resolved against the normaliser's base directory, which
/// is the current location during navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    base: PathBuf,
}

impl PathNormalizer {
    /// Creates a normaliser resolving relative paths against `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Creates a normaliser based at the process working directory.
    pub fn from_current_dir() -> CoreResult<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Normalises `raw` to an absolute path.
    ///
    /// A leading `~` expands to the home directory.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidPath`] if `raw` is blank or the home directory
    /// cannot be determined for `~`.
    pub fn normalize(&self, raw: &str) -> CoreResult<PathBuf> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidPath(PathBuf::from(raw)));
        }

        let expanded = expand_home(trimmed).ok_or_else(|| CoreError::InvalidPath(raw.into()))?;
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.base.join(expanded)
        };
        Ok(normalize_lexical(&absolute))
    }

    /// Normalises `raw` and requires it to name an existing directory.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidPath`] if normalisation fails or the result is not
    /// an existing directory.
    pub fn directory(&self, raw: &str) -> CoreResult<Location> {
        let path = self.normalize(raw)?;
        self.directory_path(&path)
    }

    /// Like [`directory`](Self::directory) for an already-built path.
    pub fn directory_path(&self, path: &Path) -> CoreResult<Location> {
        let absolute = if path.is_absolute() {
            normalize_lexical(path)
        } else {
            normalize_lexical(&self.base.join(path))
        };
        if !absolute.is_dir() {
            tracing::debug!("normalize: not a directory: {}", absolute.display());
            return Err(CoreError::InvalidPath(absolute));
        }
        Ok(Location::new(absolute))
    }

    /// Returns the parent of `location`, or `None` at a root.
    pub fn parent(&self, location: &Location) -> Option<PathBuf> {
        location.path().parent().map(Path::to_path_buf)
    }
}

fn expand_home(raw: &str) -> Option<PathBuf> {
    if raw == "~" {
        return dirs::home_dir();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn lexical_resolves_dot_segments() {
        assert_eq!(normalize_lexical(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_lexical(Path::new("/a//b///c/")), PathBuf::from("/a/b/c"));
    }

    #[cfg(unix)]
    #[test]
    fn lexical_parent_of_root_is_root() {
        assert_eq!(normalize_lexical(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize_lexical(Path::new("/a/../../..")), PathBuf::from("/"));
    }

    #[test]
    fn lexical_keeps_unpoppable_relative_parents() {
        assert_eq!(normalize_lexical(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize_lexical(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn normalize_resolves_relative_against_base() {
        let tmp = TempDir::new().unwrap();
        let normalizer = PathNormalizer::new(tmp.path());
        let result = normalizer.normalize("sub/./inner/..").unwrap();
        assert_eq!(result, tmp.path().join("sub"));
        assert!(result.is_absolute());
    }

    #[test]
    fn normalize_rejects_blank_input() {
        let normalizer = PathNormalizer::new("/");
        assert!(matches!(normalizer.normalize("   "), Err(CoreError::InvalidPath(_))));
        assert!(matches!(normalizer.normalize(""), Err(CoreError::InvalidPath(_))));
    }

    #[test]
    fn normalize_expands_home() {
        let normalizer = PathNormalizer::new("/");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(normalizer.normalize("~").unwrap(), normalize_lexical(&home));
            assert_eq!(
                normalizer.normalize("~/docs").unwrap(),
                normalize_lexical(&home.join("docs"))
            );
        }
    }

    #[test]
    fn directory_accepts_existing_dir() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("real")).unwrap();
        let normalizer = PathNormalizer::new(tmp.path());

        let location = normalizer.directory("./real/../real").unwrap();
        assert_eq!(location.path(), tmp.path().join("real"));
    }

    #[test]
    fn directory_rejects_missing_path() {
        let tmp = TempDir::new().unwrap();
        let normalizer = PathNormalizer::new(tmp.path());
        assert!(matches!(
            normalizer.directory("does-not-exist"),
            Err(CoreError::InvalidPath(_))
        ));
    }

    #[test]
    fn directory_rejects_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f.txt"), "x").unwrap();
        let normalizer = PathNormalizer::new(tmp.path());
        assert!(matches!(
            normalizer.directory("f.txt"),
            Err(CoreError::InvalidPath(_))
        ));
    }

    #[test]
    fn parent_of_nested_location() {
        let tmp = TempDir::new().unwrap();
        let normalizer = PathNormalizer::new(tmp.path());
        let location = normalizer.directory_path(tmp.path()).unwrap();
        assert_eq!(
            normalizer.parent(&location),
            tmp.path().parent().map(Path::to_path_buf)
        );
    }

    #[cfg(unix)]
    #[test]
    fn parent_of_root_is_none() {
        let normalizer = PathNormalizer::new("/");
        let root = normalizer.directory("/").unwrap();
        assert_eq!(normalizer.parent(&root), None);
    }
}
