//! File system collaborators for colfm.
//!
//! Entries and directory enumeration ([`entry`], [`ops`]), live metadata and
//! its text forms ([`stat`]), content sniffing ([`mime`]), bounded previews
//! ([`preview`]) and external program hand-off ([`launch`]).

pub mod entry;
pub mod launch;
pub mod mime;
pub mod ops;
pub mod preview;
pub mod stat;

pub use launch::{Launcher, SystemLauncher};
pub use mime::{Category, Classification, ContentSniffer, MimeClassifier, MimeSniffer};
pub use preview::{
    Bitmap, ImageCrateDecoder, ImageDecoder, MetadataSummary, PreviewContent, PreviewLimits,
    PreviewPipeline, PreviewReport,
};
pub use stat::{human_size, permission_string, EntryStat};
