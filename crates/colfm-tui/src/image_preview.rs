//! Terminal graphics for preview bitmaps.
//!
//! The core hands over an already decoded bitmap with each report; this
//! module turns it into a `ratatui-image` protocol and keeps the encoded
//! result until the report or the render area changes.

use colfm_core::Bitmap;
use image::DynamicImage;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

/// Cell size assumed when the terminal does not answer the font query.
pub const FALLBACK_FONT_SIZE: (u16, u16) = (8, 16);

#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageCacheKey {
    generation: u64,
    width: u16,
    height: u16,
}

/// Holds the picker and the protocol of the bitmap on screen.
pub struct ImagePreviewState {
    picker: Picker,
    cached_protocol: Option<StatefulProtocol>,
    cache_key: Option<ImageCacheKey>,
}

impl ImagePreviewState {
    pub fn new(picker: Picker) -> Self {
        Self {
            picker,
            cached_protocol: None,
            cache_key: None,
        }
    }

    /// Detects the terminal's graphics protocol, falling back to
    /// half-blocks with [`FALLBACK_FONT_SIZE`].
    ///
    /// Must run after the alternate screen is entered.
    pub fn detect() -> Self {
        let picker = match Picker::from_query_stdio() {
            Ok(picker) => picker,
            Err(e) => {
                tracing::warn!("image protocol detection failed, using half-blocks: {e}");
                Picker::from_fontsize(FALLBACK_FONT_SIZE)
            }
        };
        Self::new(picker)
    }

    /// Returns the protocol for `bitmap`, encoding it only when the
    /// preview `generation` or the area size changed.
    pub fn get_or_encode(
        &mut self,
        bitmap: &Bitmap,
        generation: u64,
        width: u16,
        height: u16,
    ) -> Option<&mut StatefulProtocol> {
        if bitmap.width() == 0 || bitmap.height() == 0 || width == 0 || height == 0 {
            return None;
        }
        let key = ImageCacheKey {
            generation,
            width,
            height,
        };
        if self.cache_key.as_ref() != Some(&key) {
            let protocol = self
                .picker
                .new_resize_protocol(DynamicImage::ImageRgba8(bitmap.clone()));
            self.cached_protocol = Some(protocol);
            self.cache_key = Some(key);
        }
        self.cached_protocol.as_mut()
    }

    pub fn invalidate(&mut self) {
        self.cached_protocol = None;
        self.cache_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn state() -> ImagePreviewState {
        ImagePreviewState::new(Picker::from_fontsize(FALLBACK_FONT_SIZE))
    }

    fn bitmap() -> Bitmap {
        Bitmap::from_pixel(4, 4, Rgba([200, 10, 10, 255]))
    }

    #[test]
    fn encodes_once_per_generation_and_size() {
        let mut images = state();
        assert!(images.get_or_encode(&bitmap(), 1, 20, 10).is_some());
        let key = images.cache_key.clone();

        assert!(images.get_or_encode(&bitmap(), 1, 20, 10).is_some());
        assert_eq!(images.cache_key, key);

        assert!(images.get_or_encode(&bitmap(), 2, 20, 10).is_some());
        assert_eq!(images.cache_key.as_ref().map(|k| k.generation), Some(2));

        assert!(images.get_or_encode(&bitmap(), 2, 30, 10).is_some());
        assert_eq!(images.cache_key.as_ref().map(|k| k.width), Some(30));
    }

    #[test]
    fn empty_area_or_bitmap_yields_nothing() {
        let mut images = state();
        assert!(images.get_or_encode(&bitmap(), 1, 0, 10).is_none());
        let empty = Bitmap::new(0, 0);
        assert!(images.get_or_encode(&empty, 1, 20, 10).is_none());
        assert!(images.cache_key.is_none());
    }

    #[test]
    fn invalidate_drops_cached_protocol() {
        let mut images = state();
        images.get_or_encode(&bitmap(), 1, 20, 10);
        images.invalidate();
        assert!(images.cached_protocol.is_none());
        assert!(images.cache_key.is_none());
    }
}
