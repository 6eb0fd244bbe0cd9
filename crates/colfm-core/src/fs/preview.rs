//! Bounded, MIME-aware previews of a single entry.
//!
//! [`PreviewPipeline::preview`] stats the entry, classifies it by content,
//! and produces at most one bounded payload (scaled image, escaped text
//! excerpt, or nothing) together with a [`MetadataSummary`]. Nothing is
//! cached: every call reflects the file system at call time. No failure
//! escapes the pipeline; each one degrades to a metadata-only preview.

use std::io::Read;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::mime::{Category, Classification, MimeClassifier};
use crate::fs::stat::{
    format_modified, human_size, permission_string, stat, stat_link, EntryStat,
    DEFAULT_DATE_FORMAT,
};
use crate::nav::path::normalize_lexical;

/// Decoded RGBA pixels at display size.
pub type Bitmap = image::RgbaImage;

/// Widest image preview, in pixels.
pub const MAX_IMAGE_WIDTH: u32 = 512;
/// Largest text file that gets an excerpt, in bytes.
pub const TEXT_SIZE_CAP: u64 = 256 * 1024;
/// Longest text excerpt, in characters.
pub const EXCERPT_CHARS: usize = 4096;

/// Annotation shown for audio, video and office documents.
pub const NO_INLINE_PREVIEW: &str =
    "(No inline preview. Use Open to launch in the default application.)";

/// Caps that keep preview generation responsive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLimits {
    pub max_image_width: u32,
    pub text_size_cap: u64,
    pub excerpt_chars: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            max_image_width: MAX_IMAGE_WIDTH,
            text_size_cap: TEXT_SIZE_CAP,
            excerpt_chars: EXCERPT_CHARS,
        }
    }
}

/// The render payload for one preview request.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewContent {
    /// Nothing has been previewed yet.
    None,
    /// A decoded bitmap scaled to `width` x `height`.
    Image {
        bitmap: Bitmap,
        width: u32,
        height: u32,
    },
    /// Markup-escaped leading text of the file.
    TextExcerpt { text: String, truncated: bool },
    /// Only the metadata table, with an optional annotation.
    MetadataOnly { note: Option<&'static str> },
}

impl PreviewContent {
    fn metadata_only() -> Self {
        Self::MetadataOnly { note: None }
    }

    /// Text for the optional `Preview` row of the info table.
    pub fn preview_row(&self) -> Option<&str> {
        match self {
            Self::TextExcerpt { text, .. } => Some(text),
            Self::MetadataOnly { note: Some(note) } => Some(note),
            _ => None,
        }
    }
}

/// Name, kind, size and ownership of a previewed entry, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSummary {
    pub name: String,
    pub kind: String,
    pub size: String,
    pub modified: String,
    pub permissions: String,
    pub owner: String,
    pub group: String,
    pub path: String,
}

impl MetadataSummary {
    fn from_stat(path: &Path, stat: &EntryStat, kind: &str, date_format: &str) -> Self {
        Self {
            name: display_name(path),
            kind: kind.to_string(),
            size: if stat.is_dir {
                "-".to_string()
            } else {
                human_size(stat.size)
            },
            modified: format_modified(stat.modified, date_format),
            permissions: permission_string(stat.mode),
            owner: stat.owner.clone(),
            group: stat.group.clone(),
            path: path.to_string_lossy().into_owned(),
        }
    }

    /// Summary for an entry whose stat failed: whatever the link itself
    /// reveals, `-` for the rest.
    fn best_effort(path: &Path, date_format: &str) -> Self {
        match stat_link(path) {
            Ok(link) => Self {
                size: "-".to_string(),
                ..Self::from_stat(path, &link, "unknown", date_format)
            },
            Err(_) => Self {
                name: display_name(path),
                kind: "unknown".to_string(),
                size: "-".to_string(),
                modified: "-".to_string(),
                permissions: permission_string(0),
                owner: "-".to_string(),
                group: "-".to_string(),
                path: path.to_string_lossy().into_owned(),
            },
        }
    }
}

/// Output of one preview request.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewReport {
    pub content: PreviewContent,
    pub summary: MetadataSummary,
}

impl PreviewReport {
    /// Title for the popup surface.
    pub fn title(&self) -> String {
        format!("Info — {}", self.summary.name)
    }

    /// The info table rows in display order.
    ///
    /// The `Preview` row is present only when there is an excerpt or an
    /// annotation. Excerpt text is already markup-escaped.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        let s = &self.summary;
        let mut rows = vec![
            ("Name", s.name.as_str()),
            ("Kind", s.kind.as_str()),
            ("Size", s.size.as_str()),
            ("Modified", s.modified.as_str()),
            ("Permissions", s.permissions.as_str()),
            ("Owner", s.owner.as_str()),
            ("Group", s.group.as_str()),
            ("Path", s.path.as_str()),
        ];
        if let Some(preview) = self.content.preview_row() {
            rows.push(("Preview", preview));
        }
        rows
    }

    /// Renders the report as one rich-text block shared by every surface.
    pub fn to_html(&self) -> String {
        let mut html =
            String::from("<div style='font-family:Sans-Serif; font-size:12px; line-height:1.25'>");

        if let PreviewContent::Image { width, height, .. } = &self.content {
            html.push_str(&format!(
                "<div style='text-align:center; margin:4px 0 10px 0'>\
                 <img src=\"file://{}\" width=\"{width}\" height=\"{height}\" /></div>",
                escape_markup(&self.summary.path)
            ));
        }

        html.push_str("<table style='border-collapse:collapse' cellspacing='0' cellpadding='2'>");
        for (label, value) in self.rows() {
            let cell = match label {
                "Path" => format!("<tt>{}</tt>", escape_markup(value)),
                "Preview" => match &self.content {
                    PreviewContent::TextExcerpt { text, .. } => {
                        format!("<pre style='white-space:pre-wrap; margin:6px 0 0 0'>{text}</pre>")
                    }
                    _ => escape_markup(value),
                },
                _ => escape_markup(value),
            };
            html.push_str(&format!(
                "<tr><td style='font-weight:bold; padding-right:10px; white-space:nowrap; \
                 vertical-align:top'>{label}</td><td style='width:100%'>{cell}</td></tr>"
            ));
        }
        html.push_str("</table></div>");
        html
    }
}

/// Produces image dimensions and bitmaps for the pipeline.
///
/// Implementations must report undecodable content as an error, never panic.
pub trait ImageDecoder {
    fn dimensions(&self, path: &Path) -> CoreResult<(u32, u32)>;
    fn decode_thumbnail(&self, path: &Path, width: u32, height: u32) -> CoreResult<Bitmap>;
}

/// [`ImageDecoder`] backed by the `image` crate, guessing format from content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl ImageCrateDecoder {
    fn reader(path: &Path) -> CoreResult<image::ImageReader<std::io::BufReader<std::fs::File>>> {
        image::ImageReader::open(path)
            .map_err(|e| CoreError::from_io(path, e))?
            .with_guessed_format()
            .map_err(|e| CoreError::DecodeFailed(format!("{}: {e}", path.display())))
    }
}

impl ImageDecoder for ImageCrateDecoder {
    fn dimensions(&self, path: &Path) -> CoreResult<(u32, u32)> {
        Self::reader(path)?
            .into_dimensions()
            .map_err(|e| CoreError::DecodeFailed(format!("{}: {e}", path.display())))
    }

    fn decode_thumbnail(&self, path: &Path, width: u32, height: u32) -> CoreResult<Bitmap> {
        let img = Self::reader(path)?
            .decode()
            .map_err(|e| CoreError::DecodeFailed(format!("{}: {e}", path.display())))?;
        Ok(img.thumbnail_exact(width, height).to_rgba8())
    }
}

/// Chooses the display size for an image of `width` x `height`.
///
/// Unknown (zero) dimensions default to `max_width`; wider images are capped
/// at `max_width` with the height scaled proportionally (never below 1).
pub fn display_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    let w = if width > 0 { width } else { max_width };
    let h = if height > 0 { height } else { max_width };
    if w > max_width {
        let scaled = (f64::from(h) * (f64::from(max_width) / f64::from(w))) as u32;
        (max_width, scaled.max(1))
    } else {
        (w, h)
    }
}

/// Escapes the characters that are significant in HTML/XML markup.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`escape_markup`] for surfaces that draw plain text.
pub fn unescape_markup(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| crate::nfc_string(&n.to_string_lossy()))
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Classifies entries and produces bounded [`PreviewReport`]s.
pub struct PreviewPipeline {
    classifier: MimeClassifier,
    decoder: Box<dyn ImageDecoder>,
    limits: PreviewLimits,
    date_format: String,
}

impl Default for PreviewPipeline {
    fn default() -> Self {
        Self::new(MimeClassifier::default(), Box::new(ImageCrateDecoder))
    }
}

impl PreviewPipeline {
    pub fn new(classifier: MimeClassifier, decoder: Box<dyn ImageDecoder>) -> Self {
        Self {
            classifier,
            decoder,
            limits: PreviewLimits::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_limits(self, limits: PreviewLimits) -> Self {
        Self { limits, ..self }
    }

    pub fn with_date_format(self, date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            ..self
        }
    }

    pub fn limits(&self) -> PreviewLimits {
        self.limits
    }

    /// Previews the entry at `path`.
    pub fn preview(&self, path: &Path) -> PreviewReport {
        let path = normalize_lexical(path);
        let path = path.as_path();

        let stat = match stat(path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("preview: stat failed for {}: {e}", path.display());
                return PreviewReport {
                    content: PreviewContent::metadata_only(),
                    summary: MetadataSummary::best_effort(path, &self.date_format),
                };
            }
        };

        let classification = self.classifier.classify(path);
        let summary =
            MetadataSummary::from_stat(path, &stat, classification.kind(), &self.date_format);
        let content = self.content_for(path, &stat, &classification);
        tracing::debug!(
            "preview: {} as {:?} ({})",
            path.display(),
            classification.category,
            summary.kind
        );

        PreviewReport { content, summary }
    }

    fn content_for(
        &self,
        path: &Path,
        stat: &EntryStat,
        classification: &Classification,
    ) -> PreviewContent {
        match classification.category {
            Category::Image if stat.is_file => self.image_content(path),
            Category::Text if stat.is_file && stat.size <= self.limits.text_size_cap => {
                self.text_content(path)
            }
            Category::AudioVideoOrOffice => PreviewContent::MetadataOnly {
                note: Some(NO_INLINE_PREVIEW),
            },
            _ => PreviewContent::metadata_only(),
        }
    }

    fn image_content(&self, path: &Path) -> PreviewContent {
        let result = self.decoder.dimensions(path).and_then(|(w, h)| {
            let (width, height) = display_size(w, h, self.limits.max_image_width);
            let bitmap = self.decoder.decode_thumbnail(path, width, height)?;
            Ok(PreviewContent::Image {
                bitmap,
                width,
                height,
            })
        });
        result.unwrap_or_else(|e| {
            tracing::warn!("preview: image fallback for {}: {e}", path.display());
            PreviewContent::metadata_only()
        })
    }

    fn text_content(&self, path: &Path) -> PreviewContent {
        match read_excerpt(path, self.limits) {
            Ok((text, truncated)) => PreviewContent::TextExcerpt {
                text: escape_markup(&text),
                truncated,
            },
            Err(e) => {
                tracing::warn!("preview: text fallback for {}: {e}", path.display());
                PreviewContent::metadata_only()
            }
        }
    }
}

/// Reads at most `limits.excerpt_chars` characters from the start of `path`.
///
/// Never reads past `limits.text_size_cap` bytes. The flag is `true` when
/// content remains after the excerpt.
fn read_excerpt(path: &Path, limits: PreviewLimits) -> CoreResult<(String, bool)> {
    let file = std::fs::File::open(path).map_err(|e| CoreError::from_io(path, e))?;
    let mut bytes = Vec::new();
    file.take(limits.text_size_cap.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| CoreError::DecodeFailed(format!("{}: {e}", path.display())))?;

    let decoded = String::from_utf8_lossy(&bytes);
    let mut chars = decoded.chars();
    let excerpt: String = chars.by_ref().take(limits.excerpt_chars).collect();
    let truncated = chars.next().is_some();
    Ok((excerpt, truncated))
}
