//! # Submitted Input
//!
//! What the signing form hands to the composer: the typed-in fields and the
//! captured signature bitmap.

use chrono::NaiveDate;
use image::{Rgba, RgbaImage};

use crate::error::UndersignError;

/// Values typed into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub organization: String,
    pub date: NaiveDate,
}

impl FormValues {
    pub fn new(name: impl Into<String>, organization: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            organization: organization.into(),
            date,
        }
    }

    /// Name and organization are both filled in.
    ///
    /// The composer assumes this holds; callers gate on it before composing.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.organization.trim().is_empty()
    }
}

/// A freehand signature as captured by the drawing surface (RGBA, 8 bits per
/// channel). May be entirely blank.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureBitmap {
    image: RgbaImage,
}

impl SignatureBitmap {
    /// Wrap a raw RGBA buffer of `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, UndersignError> {
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(|image| Self { image })
            .ok_or_else(|| {
                UndersignError::Signature(format!(
                    "expected {} bytes for {}x{} RGBA, got {}",
                    expected, width, height, actual
                ))
            })
    }

    /// Decode an encoded image (PNG from the drawing canvas, typically).
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, UndersignError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| UndersignError::Signature(format!("Failed to decode image: {}", e)))?
            .to_rgba8();
        Ok(Self { image })
    }

    /// A fully transparent bitmap, as produced by a canvas nobody drew on.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// No visible ink: every pixel is transparent or opaque-ish white.
    ///
    /// Drawing canvases export either a transparent or a white background,
    /// so both count as blank.
    pub fn is_blank(&self) -> bool {
        self.image
            .pixels()
            .all(|Rgba([r, g, b, a])| *a == 0 || (*r >= 250 && *g >= 250 && *b >= 250))
    }
}

impl From<RgbaImage> for SignatureBitmap {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}
