//! Entry metadata queries and their user-facing text forms.
//!
//! The string formats produced here (size, permission triads) are a
//! compatibility contract for anything that scrapes the info surface.

use std::path::Path;
use std::time::SystemTime;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::error::{CoreError, CoreResult};

/// Size units in ascending order; each step is a factor of 1024.
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Date format used when a configured format is unusable.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Live metadata for a single path, as needed by the info surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStat {
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// Permission bits (`0o777` mask).
    pub mode: u32,
    pub owner: String,
    pub group: String,
    pub is_dir: bool,
    pub is_file: bool,
    pub is_executable: bool,
    pub is_readable: bool,
}

/// Stats `path`, following symlinks.
///
/// # Errors
///
/// - [`CoreError::InvalidPath`] if the path does not exist.
/// - [`CoreError::Unreadable`] if the metadata cannot be read.
pub fn stat(path: &Path) -> CoreResult<EntryStat> {
    let metadata = std::fs::metadata(path).map_err(|e| CoreError::from_io(path, e))?;
    Ok(stat_from_metadata(path, &metadata))
}

/// Stats `path` itself without following a final symlink.
///
/// Used for best-effort summaries of entries whose target is gone.
pub fn stat_link(path: &Path) -> CoreResult<EntryStat> {
    let metadata = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(path, e))?;
    Ok(stat_from_metadata(path, &metadata))
}

fn stat_from_metadata(path: &Path, metadata: &std::fs::Metadata) -> EntryStat {
    let is_dir = metadata.is_dir();
    let is_readable = if is_dir {
        std::fs::read_dir(path).is_ok()
    } else if metadata.is_file() {
        std::fs::File::open(path).is_ok()
    } else {
        false
    };
    let (owner, group) = owner_and_group(metadata);

    EntryStat {
        size: metadata.len(),
        modified: metadata.modified().ok(),
        mode: permission_bits(metadata),
        owner,
        group,
        is_dir,
        is_file: metadata.is_file(),
        is_executable: metadata.is_file() && crate::fs::entry::is_executable(metadata),
        is_readable,
    }
}

/// Formats a byte count with the largest unit whose scaled value is below 1024.
///
/// Bytes are printed without decimals, every larger unit with one.
///
/// ```
/// use colfm_core::fs::stat::human_size;
///
/// assert_eq!(human_size(0), "0 B");
/// assert_eq!(human_size(1024), "1.0 KB");
/// ```
pub fn human_size(bytes: u64) -> String {
    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", SIZE_UNITS[0])
    } else {
        format!("{scaled:.1} {}", SIZE_UNITS[unit])
    }
}

/// Renders permission bits as a fixed 9-character `rwxrwxrwx` string.
///
/// Owner, group and other triads are computed independently; absent bits
/// are written as `-`.
pub fn permission_string(mode: u32) -> String {
    const FLAGS: [(u32, char); 9] = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];
    FLAGS
        .iter()
        .map(|&(bit, c)| if mode & bit != 0 { c } else { '-' })
        .collect()
}

/// Formats a modification time in local time using a strftime pattern.
///
/// An invalid pattern falls back to [`DEFAULT_DATE_FORMAT`]; a missing time
/// is rendered as `-`.
pub fn format_modified(time: Option<SystemTime>, pattern: &str) -> String {
    let Some(time) = time else {
        return "-".to_string();
    };
    let local: DateTime<Local> = time.into();
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return local.format(DEFAULT_DATE_FORMAT).to_string();
    }
    local.format_with_items(items.into_iter()).to_string()
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &std::fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

#[cfg(unix)]
fn owner_and_group(metadata: &std::fs::Metadata) -> (String, String) {
    use std::os::unix::fs::MetadataExt;

    let uid = metadata.uid();
    let gid = metadata.gid();
    let owner = uzers::get_user_by_uid(uid)
        .map(|u| u.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| uid.to_string());
    let group = uzers::get_group_by_gid(gid)
        .map(|g| g.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| gid.to_string());
    (owner, group)
}

#[cfg(not(unix))]
fn owner_and_group(_metadata: &std::fs::Metadata) -> (String, String) {
    ("-".to_string(), "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn human_size_bytes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1), "1 B");
        assert_eq!(human_size(1023), "1023 B");
    }

    #[test]
    fn human_size_scaled_units() {
        assert_eq!(human_size(1024), "1.0 KB");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(1_048_576), "1.0 MB");
        assert_eq!(human_size(1_073_741_824), "1.0 GB");
        assert_eq!(human_size(1_099_511_627_776), "1.0 TB");
    }

    #[test]
    fn human_size_caps_at_terabytes() {
        assert_eq!(human_size(1_099_511_627_776 * 2048), "2048.0 TB");
    }

    #[test]
    fn permission_string_owner_rw_group_r() {
        assert_eq!(permission_string(0o640), "rw-r-----");
    }

    #[test]
    fn permission_string_extremes() {
        assert_eq!(permission_string(0o000), "---------");
        assert_eq!(permission_string(0o777), "rwxrwxrwx");
        assert_eq!(permission_string(0o755), "rwxr-xr-x");
    }

    #[test]
    fn permission_string_triads_are_independent() {
        assert_eq!(permission_string(0o001), "--------x");
        assert_eq!(permission_string(0o020), "----w----");
        assert_eq!(permission_string(0o400), "r--------");
    }

    #[test]
    fn permission_string_ignores_type_bits() {
        assert_eq!(permission_string(0o100644), "rw-r--r--");
        assert_eq!(permission_string(0o100644).len(), 9);
    }

    #[test]
    fn format_modified_missing_time() {
        assert_eq!(format_modified(None, DEFAULT_DATE_FORMAT), "-");
    }

    #[test]
    fn format_modified_uses_pattern() {
        let t = UNIX_EPOCH + Duration::from_secs(86_400 * 365);
        let year_only = format_modified(Some(t), "%Y");
        assert!(year_only == "1970" || year_only == "1971");
    }

    #[test]
    fn format_modified_invalid_pattern_falls_back() {
        let t = UNIX_EPOCH + Duration::from_secs(86_400 * 400);
        let formatted = format_modified(Some(t), "%Q%");
        assert_eq!(formatted.len(), "1971-02-05T00:00:00".len());
        assert!(formatted.contains('T'));
    }

    #[test]
    fn stat_regular_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "hello").unwrap();

        let s = stat(&file).unwrap();
        assert_eq!(s.size, 5);
        assert!(s.is_file);
        assert!(!s.is_dir);
        assert!(s.is_readable);
        assert!(s.modified.is_some());
        assert!(!s.owner.is_empty());
    }

    #[test]
    fn stat_directory() {
        let tmp = TempDir::new().unwrap();
        let s = stat(tmp.path()).unwrap();
        assert!(s.is_dir);
        assert!(!s.is_file);
        assert!(!s.is_executable);
    }

    #[test]
    fn stat_missing_path_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let result = stat(&tmp.path().join("missing"));
        assert!(matches!(result, Err(CoreError::InvalidPath(_))));
    }

    #[cfg(unix)]
    #[test]
    fn stat_link_survives_dangling_symlink() {
        let tmp = TempDir::new().unwrap();
        let link = tmp.path().join("dangling");
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), &link).unwrap();

        assert!(stat(&link).is_err());
        let s = stat_link(&link).unwrap();
        assert!(!s.is_file);
        assert!(!s.is_readable);
    }

    #[cfg(unix)]
    #[test]
    fn stat_reports_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("p.txt");
        fs::write(&file, "x").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o640)).unwrap();

        let s = stat(&file).unwrap();
        assert_eq!(permission_string(s.mode), "rw-r-----");
    }
}
