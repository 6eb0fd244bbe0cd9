//! Enumeration filter and ordering for directory listings.

use crate::fs::entry::FileEntry;

/// Which entries a directory enumeration admits.
///
/// `.` and `..` are never admitted; the only choice is whether dot-prefixed
/// entries are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    /// Every entry except hidden (dot-prefixed) ones.
    AllEntries,
    /// Every entry including hidden ones.
    IncludeHidden,
}

impl EntryFilter {
    /// Returns the filter matching the hidden-files flag.
    pub fn for_hidden_flag(show_hidden: bool) -> Self {
        if show_hidden {
            Self::IncludeHidden
        } else {
            Self::AllEntries
        }
    }

    /// Returns `true` when hidden entries pass this filter.
    pub fn shows_hidden(self) -> bool {
        matches!(self, Self::IncludeHidden)
    }

    /// Returns `true` if `entry` passes this filter.
    pub fn admits(self, entry: &FileEntry) -> bool {
        self.shows_hidden() || !entry.is_hidden()
    }
}

/// Sorts entries directories-first, then by case-insensitive name.
///
/// Returns a **new** sorted `Vec<FileEntry>`; ties on the lowercased name
/// fall back to the exact name so the order is total.
pub fn sort_entries(entries: &[FileEntry]) -> Vec<FileEntry> {
    let mut sorted: Vec<FileEntry> = entries.to_vec();
    sorted.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
            .then_with(|| a.name().cmp(b.name()))
    });
    sorted
}

/// Filters out hidden entries when `show_hidden` is `false`.
///
/// When `show_hidden` is `true` all entries are returned unchanged.
pub fn filter_hidden(entries: &[FileEntry], show_hidden: bool) -> Vec<FileEntry> {
    let filter = EntryFilter::for_hidden_flag(show_hidden);
    entries.iter().filter(|e| filter.admits(e)).cloned().collect()
}
