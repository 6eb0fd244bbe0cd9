//! Nerd Font glyphs for entries.
//!
//! Entries are bucketed into a handful of [`IconKind`]s by type and file
//! extension. Only the name is looked at; content sniffing is left to the
//! preview pipeline.

use colfm_core::FileEntry;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Folder,
    Symlink,
    Executable,
    Image,
    Text,
    Audio,
    Video,
    Archive,
    Document,
    Other,
}

impl IconKind {
    pub fn of(entry: &FileEntry) -> Self {
        if entry.is_dir() {
            return Self::Folder;
        }
        if entry.is_symlink() {
            return Self::Symlink;
        }
        let by_extension = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::for_extension)
            .unwrap_or(Self::Other);
        match by_extension {
            Self::Other if entry.is_executable() => Self::Executable,
            kind => kind,
        }
    }

    fn for_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "ico" | "tiff" | "tif" | "svg" => {
                Self::Image
            }
            "txt" | "text" | "md" | "markdown" | "rs" | "py" | "js" | "ts" | "c" | "h" | "cpp"
            | "go" | "sh" | "toml" | "yaml" | "yml" | "json" | "xml" | "html" | "css" | "csv"
            | "log" | "ini" | "cfg" | "conf" => Self::Text,
            "mp3" | "wav" | "flac" | "ogg" | "aac" | "m4a" => Self::Audio,
            "mp4" | "avi" | "mkv" | "mov" | "wmv" | "flv" | "webm" => Self::Video,
            "zip" | "tar" | "gz" | "bz2" | "xz" | "7z" | "rar" | "zst" => Self::Archive,
            "pdf" | "doc" | "docx" | "odt" | "xls" | "xlsx" | "ppt" | "pptx" => Self::Document,
            _ => Self::Other,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Folder => "\u{f07b}",
            Self::Symlink => "\u{f0c1}",
            Self::Executable => "\u{f489}",
            Self::Image => "\u{f1c5}",
            Self::Text => "\u{f15c}",
            Self::Audio => "\u{f001}",
            Self::Video => "\u{f03d}",
            Self::Archive => "\u{f410}",
            Self::Document => "\u{f1c1}",
            Self::Other => "\u{f15b}",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Folder => Color::Blue,
            Self::Symlink => Color::Cyan,
            Self::Executable => Color::Green,
            Self::Image => Color::Magenta,
            Self::Audio | Self::Video => Color::LightMagenta,
            Self::Archive => Color::Red,
            Self::Text | Self::Document | Self::Other => Color::Reset,
        }
    }
}

/// Glyph plus trailing space, for list rows.
pub fn icon_for_entry(entry: &FileEntry) -> String {
    format!("{} ", IconKind::of(entry).glyph())
}
