//! Directory reading operations.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::nav::filter::{sort_entries, EntryFilter};

/// Reads the immediate contents of a directory through `filter`.
///
/// `.` and `..` are never listed. Entries whose metadata cannot be read are
/// skipped rather than failing the whole listing. The result is sorted
/// directories-first, then by case-insensitive name, so two reads of an
/// unchanged directory always produce the same sequence.
///
/// # Errors
///
/// - [`CoreError::InvalidPath`]: the path does not exist or is not a directory.
/// - [`CoreError::Unreadable`]: read access is denied.
/// - [`CoreError::Io`]: any other I/O error.
///
/// # Examples
///
/// ```no_run
/// use colfm_core::{read_directory, EntryFilter};
/// use std::path::Path;
///
/// let entries = read_directory(Path::new("/home/user"), EntryFilter::AllEntries).unwrap();
/// for entry in &entries {
///     println!("{}", entry.name());
/// }
/// ```
pub fn read_directory(path: &Path, filter: EntryFilter) -> CoreResult<Vec<FileEntry>> {
    if !path.is_dir() {
        return Err(CoreError::InvalidPath(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(path, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let metadata = match dir_entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };
        let entry = FileEntry::new(dir_entry.path(), &metadata);
        if filter.admits(&entry) {
            entries.push(entry);
        }
    }

    Ok(sort_entries(&entries))
}
