//! # Fonts
//!
//! Font resolution and the two text capabilities the composer needs:
//! measure a string and draw it at a position.
//!
//! ```text
//! resolve_font(path) ──► ResolvedFont::Loaded(TrueType)
//!                    └─► ResolvedFont::Fallback { Builtin, reason }
//! ```
//!
//! Resolution happens once per document and the resulting handle is used
//! for every text element, so wrapping and line heights are always computed
//! with the face that actually draws.

mod bitmap;
mod ttf;

pub use ttf::TtfFont;

use image::Rgb;
use std::path::Path;

use crate::canvas::Canvas;
use crate::layout::MeasureText;

/// A face that can measure and draw text.
#[derive(Debug, Clone)]
pub enum FontHandle {
    /// Deployment-supplied TrueType/OpenType font
    TrueType(TtfFont),
    /// Spleen bitmap font compiled into the crate (Latin only)
    Builtin,
}

impl FontHandle {
    pub fn is_builtin(&self) -> bool {
        matches!(self, FontHandle::Builtin)
    }

    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str, pixel_height: f32) -> f32 {
        match self {
            FontHandle::TrueType(font) => font.text_width(text, pixel_height),
            FontHandle::Builtin => bitmap::text_width(text, pixel_height),
        }
    }

    /// Height of the drawn glyph box in pixels.
    pub fn glyph_height(&self, pixel_height: f32) -> u32 {
        match self {
            FontHandle::TrueType(font) => font.glyph_height(pixel_height),
            FontHandle::Builtin => bitmap::glyph_height(pixel_height),
        }
    }

    /// First non-whitespace character of `text` this face cannot draw.
    pub fn missing_glyph(&self, text: &str) -> Option<char> {
        match self {
            FontHandle::TrueType(font) => font.missing_glyph(text),
            FontHandle::Builtin => bitmap::missing_glyph(text),
        }
    }

    /// Draw `text` with the top of its glyph box at `y_top`.
    pub fn draw_text(
        &self,
        canvas: &mut Canvas,
        x: i32,
        y_top: i32,
        text: &str,
        pixel_height: f32,
        color: Rgb<u8>,
    ) {
        match self {
            FontHandle::TrueType(font) => font.draw(canvas, x, y_top, text, pixel_height, color),
            FontHandle::Builtin => bitmap::draw(canvas, x, y_top, text, pixel_height, color),
        }
    }

    /// Measurement capability at a fixed size, for [`crate::layout::wrap`].
    pub fn at_size(&self, pixel_height: f32) -> SizedFont<'_> {
        SizedFont {
            font: self,
            pixel_height,
        }
    }
}

/// A [`FontHandle`] bound to one text size.
#[derive(Debug, Clone, Copy)]
pub struct SizedFont<'a> {
    font: &'a FontHandle,
    pixel_height: f32,
}

impl MeasureText for SizedFont<'_> {
    fn text_width(&self, text: &str) -> f32 {
        self.font.text_width(text, self.pixel_height)
    }
}

/// Outcome of font resolution.
#[derive(Debug, Clone)]
pub enum ResolvedFont {
    /// The configured font file loaded
    Loaded(FontHandle),
    /// The built-in font is standing in; `reason` says why
    Fallback { handle: FontHandle, reason: String },
}

impl ResolvedFont {
    pub fn handle(&self) -> &FontHandle {
        match self {
            ResolvedFont::Loaded(handle) => handle,
            ResolvedFont::Fallback { handle, .. } => handle,
        }
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            ResolvedFont::Loaded(_) => None,
            ResolvedFont::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Load the font at `path`, falling back to the built-in font on any failure.
///
/// Never fails: an absent path, a missing or unreadable file, and an
/// unparseable font all produce [`ResolvedFont::Fallback`].
pub fn resolve_font(path: Option<&Path>) -> ResolvedFont {
    let Some(path) = path else {
        return fallback("no font configured".to_string());
    };

    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => return fallback(format!("cannot read {}: {}", path.display(), e)),
    };

    match TtfFont::from_bytes(data) {
        Ok(font) => {
            tracing::debug!(path = %path.display(), "loaded font");
            ResolvedFont::Loaded(FontHandle::TrueType(font))
        }
        Err(e) => fallback(format!("cannot parse {}: {}", path.display(), e)),
    }
}

fn fallback(reason: String) -> ResolvedFont {
    tracing::warn!(%reason, "using built-in font");
    ResolvedFont::Fallback {
        handle: FontHandle::Builtin,
        reason,
    }
}
