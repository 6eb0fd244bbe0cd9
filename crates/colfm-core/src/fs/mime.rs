//! Content-based MIME classification.
//!
//! Files are classified by sniffing their leading bytes, never by extension,
//! so a renamed file keeps its real category. Non-regular files are never
//! sniffed.

use std::fs;
use std::io::Read;
use std::path::Path;

use content_inspector::ContentType;

use crate::error::{CoreError, CoreResult};

/// Number of leading bytes read for content sniffing.
const SNIFF_SIZE: u64 = 8192;

/// MIME name reported for directories.
pub const DIRECTORY_MIME: &str = "inode/directory";
/// MIME name reported for empty regular files.
pub const ZERO_SIZE_MIME: &str = "application/x-zerosize";

/// Coarse content category driving the preview pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Image,
    Text,
    AudioVideoOrOffice,
    Other,
}

/// Result of classifying one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The sniffed MIME name, if one could be determined.
    pub mime: Option<String>,
    pub category: Category,
}

impl Classification {
    fn other(mime: Option<String>) -> Self {
        Self {
            mime,
            category: Category::Other,
        }
    }

    /// The MIME name for display, `unknown` when sniffing produced nothing.
    pub fn kind(&self) -> &str {
        self.mime.as_deref().unwrap_or("unknown")
    }
}

/// Sniffs a MIME type from file content.
///
/// Implementations are only ever handed regular files.
pub trait MimeSniffer {
    fn sniff(&self, path: &Path) -> CoreResult<String>;
}

/// Default sniffer: magic numbers via `infer`, text detection via
/// `content_inspector`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSniffer;

impl MimeSniffer for ContentSniffer {
    fn sniff(&self, path: &Path) -> CoreResult<String> {
        let file = fs::File::open(path).map_err(|e| CoreError::from_io(path, e))?;
        let mut sample = Vec::with_capacity(SNIFF_SIZE as usize);
        file.take(SNIFF_SIZE).read_to_end(&mut sample)?;

        if sample.is_empty() {
            return Ok(ZERO_SIZE_MIME.to_string());
        }
        if let Some(kind) = infer::get(&sample) {
            return Ok(kind.mime_type().to_string());
        }
        if matches!(content_inspector::inspect(&sample), ContentType::BINARY) {
            Ok("application/octet-stream".to_string())
        } else {
            Ok("text/plain".to_string())
        }
    }
}

/// Maps a MIME name to its [`Category`].
pub fn category_for_mime(mime: &str) -> Category {
    if mime.starts_with("image/") {
        Category::Image
    } else if mime.starts_with("text/") {
        Category::Text
    } else if mime.starts_with("audio/")
        || mime.starts_with("video/")
        || mime.contains("officedocument")
        || mime.contains("msword")
        || mime.contains("excel")
        || mime.contains("powerpoint")
    {
        Category::AudioVideoOrOffice
    } else {
        Category::Other
    }
}

/// Classifies paths into [`Category`] values using a [`MimeSniffer`].
pub struct MimeClassifier {
    sniffer: Box<dyn MimeSniffer>,
}

impl MimeClassifier {
    pub fn new(sniffer: Box<dyn MimeSniffer>) -> Self {
        Self { sniffer }
    }

    /// Classifies `path`.
    ///
    /// Directories are always [`Category::Other`] with the directory MIME
    /// name; other non-regular files and anything that cannot be sniffed are
    /// [`Category::Other`] with no MIME name. Never fails.
    pub fn classify(&self, path: &Path) -> Classification {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("classify: cannot stat {}: {e}", path.display());
                return Classification::other(None);
            }
        };
        if metadata.is_dir() {
            return Classification::other(Some(DIRECTORY_MIME.to_string()));
        }
        if !metadata.is_file() {
            return Classification::other(None);
        }

        match self.sniffer.sniff(path) {
            Ok(mime) => Classification {
                category: category_for_mime(&mime),
                mime: Some(mime),
            },
            Err(e) => {
                tracing::debug!("classify: sniff failed for {}: {e}", path.display());
                Classification::other(None)
            }
        }
    }
}

impl Default for MimeClassifier {
    fn default() -> Self {
        Self::new(Box::new(ContentSniffer))
    }
}
