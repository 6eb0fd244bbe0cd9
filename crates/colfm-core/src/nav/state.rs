//! The navigation source of truth: current location, view mode and
//! hidden-files flag.
//!
//! Every transition takes `&self` and returns a **new** state, so a failed
//! transition simply leaves the caller holding the old one. Location and the
//! hidden flag therefore cannot be half-updated.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::fs::ops::read_directory;
use crate::nav::filter::EntryFilter;
use crate::nav::location::Location;
use crate::nav::path::PathNormalizer;
use crate::view::ViewMode;

/// Trash directory relative to the home directory.
const TRASH_SUFFIX: &str = ".local/share/Trash/files";

/// Returns the well-known trash directory under the user's home.
pub fn trash_dir_convention() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(TRASH_SUFFIX))
}

/// Immutable snapshot of where the user is and what the views show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    location: Location,
    entries: Vec<FileEntry>,
    show_hidden: bool,
    view_mode: ViewMode,
}

impl NavigationState {
    /// Opens `start` (absolute, or relative to the working directory).
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidPath`] if `start` is not a directory, or the
    /// enumeration error if it cannot be listed.
    pub fn open(start: &Path, show_hidden: bool, view_mode: ViewMode) -> CoreResult<Self> {
        let normalizer = PathNormalizer::from_current_dir()?;
        let location = normalizer.directory_path(start)?;
        Self::load(location, show_hidden, view_mode)
    }

    fn load(location: Location, show_hidden: bool, view_mode: ViewMode) -> CoreResult<Self> {
        let entries = read_directory(location.path(), EntryFilter::for_hidden_flag(show_hidden))?;
        Ok(Self {
            location,
            entries,
            show_hidden,
            view_mode,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Entries of the current location through the current filter.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn filter(&self) -> EntryFilter {
        EntryFilter::for_hidden_flag(self.show_hidden)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Normaliser for input relative to the current location.
    pub fn normalizer(&self) -> PathNormalizer {
        PathNormalizer::new(self.location.path())
    }

    /// Enters `target`, resolved against the current location.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidPath`] if `target` is not a directory,
    /// [`CoreError::Unreadable`] if it cannot be listed.
    pub fn enter_directory(&self, target: &Path) -> CoreResult<Self> {
        let location = self.normalizer().directory_path(target)?;
        self.enter_location(location)
    }

    /// Enters an already validated location.
    pub fn enter_location(&self, location: Location) -> CoreResult<Self> {
        tracing::debug!("navigate: {}", location.path().display());
        Self::load(location, self.show_hidden, self.view_mode)
    }

    /// Moves to the parent directory. `Ok(None)` at a root.
    pub fn go_up(&self) -> CoreResult<Option<Self>> {
        match self.normalizer().parent(&self.location) {
            Some(parent) => self.enter_directory(&parent).map(Some),
            None => {
                tracing::debug!("go_up: {} has no parent", self.location.path().display());
                Ok(None)
            }
        }
    }

    /// Re-reads the current location through the current filter.
    pub fn refresh(&self) -> CoreResult<Self> {
        tracing::debug!("refresh: {}", self.location.path().display());
        Self::load(self.location.clone(), self.show_hidden, self.view_mode)
    }

    /// Flips the hidden-files flag and re-reads the current location.
    pub fn toggle_hidden(&self) -> CoreResult<Self> {
        let show_hidden = !self.show_hidden;
        tracing::debug!("toggle_hidden: now {show_hidden}");
        Self::load(self.location.clone(), show_hidden, self.view_mode)
    }

    /// Enters the trash directory at `trash_dir`.
    ///
    /// # Errors
    ///
    /// [`CoreError::TrashNotFound`] if it is not an existing directory.
    pub fn open_trash(&self, trash_dir: &Path) -> CoreResult<Self> {
        if !trash_dir.is_dir() {
            tracing::warn!("open_trash: {} not found", trash_dir.display());
            return Err(CoreError::TrashNotFound(trash_dir.to_path_buf()));
        }
        self.enter_directory(trash_dir)
    }

    /// Same location and entries, different view mode.
    pub fn with_view_mode(&self, view_mode: ViewMode) -> Self {
        Self {
            view_mode,
            ..self.clone()
        }
    }
}
