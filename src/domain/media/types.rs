// SPDX-License-Identifier: MPL-2.0
//! Media kinds and in-memory pixels.

use std::sync::Arc;

/// Kind of media an asset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Still photo.
    Image,
    /// Video clip.
    Video,
}

/// Decoded RGBA pixels of a captured or edited photo.
///
/// Camera and editor capabilities answer with one of these, and an
/// unpersisted [`Asset`](crate::domain::asset::Asset) keeps it when the media
/// store refused the write. Pixels are shared, so clones are cheap.
///
/// ```
/// use asset_picker::domain::media::RawImage;
///
/// let image = RawImage::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]);
/// assert_eq!(image.dimensions(), (2, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    width: u32,
    height: u32,
    /// Row-major RGBA, 4 bytes per pixel.
    pixels: Arc<Vec<u8>>,
}

impl RawImage {
    /// Wraps `width` x `height` RGBA pixels.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` does not hold exactly `width * height * 4` bytes.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let expected = rgba_len(width, height);
        assert_eq!(
            pixels.len(),
            expected,
            "RGBA buffer of {} bytes for a {width}x{height} image, expected {expected}",
            pixels.len()
        );
        Self {
            width,
            height,
            pixels: Arc::new(pixels),
        }
    }

    /// Like [`from_rgba`](Self::from_rgba), but returns `None` on a size mismatch.
    #[must_use]
    pub fn try_from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == rgba_len(width, height)).then(|| Self {
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }

    /// A `width` x `height` image of one color.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(rgba_len(width, height))
            .collect();
        Self::from_rgba(width, height, pixels)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

fn rgba_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * 4
}
