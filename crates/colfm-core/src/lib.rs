//! colfm core library: UI-agnostic navigation and preview logic.
//!
//! `colfm-core` tracks where the user is, keeps every view representation
//! rooted at that one location, and produces bounded, MIME-aware previews.
//! It is decoupled from any UI framework; the terminal frontend (`colfm-tui`)
//! only supplies view widgets and draws the state exposed here.
//!
//! # Modules
//!
//! - [`fs`]: entries, enumeration, stat formatting, MIME sniffing, previews, launching.
//! - [`nav`]: path normalisation, navigation state, breadcrumb sync, filtering.
//! - [`view`]: view modes, the widget capability trait, and the [`Coordinator`].
//! - [`config`]: user-facing configuration (TOML settings, keymaps).
//! - [`action`]: the toolbar/keyboard action catalogue.
//! - [`event`]: command and event types for UI ↔ Core communication.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod nav;
pub mod view;

pub use error::{CoreError, CoreResult};
pub use event::{Command, Event, PreviewSurface};
pub use fs::entry::FileEntry;
pub use fs::ops::read_directory;
pub use fs::{
    human_size, permission_string, Bitmap, Category, Launcher, MetadataSummary, MimeClassifier,
    PreviewContent, PreviewLimits, PreviewPipeline, PreviewReport, SystemLauncher,
};
pub use nav::breadcrumb::BreadcrumbBridge;
pub use nav::filter::{filter_hidden, sort_entries, EntryFilter};
pub use nav::location::Location;
pub use nav::path::PathNormalizer;
pub use nav::state::NavigationState;
pub use view::coordinator::{Coordinator, InfoPopup, PreviewPane};
pub use view::{Selection, ViewFactory, ViewMode, ViewWidget};

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use config::keymap::Keymap;
pub use config::settings::Config;

/// Composed (NFC) form of `s`.
///
/// Entry names, location names and the breadcrumb all pass through here so
/// a name read from a decomposing file system compares and renders the same
/// as one typed by the user.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
