//! TTF font rendering for deployment-supplied fonts.
//!
//! Lays glyphs out by horizontal advance (no kerning) and rasterizes them
//! with ab_glyph, blending anti-aliased coverage straight into the canvas.

use ab_glyph::{Font, FontArc, ScaleFont, point};

use crate::canvas::Canvas;
use image::Rgb;

/// A TrueType/OpenType face loaded at runtime.
#[derive(Clone)]
pub struct TtfFont {
    font: FontArc,
}

impl std::fmt::Debug for TtfFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl TtfFont {
    /// Parse font file contents.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, String> {
        FontArc::try_from_vec(data)
            .map(|font| Self { font })
            .map_err(|e| e.to_string())
    }

    /// Sum of horizontal advances at `pixel_height`.
    pub fn text_width(&self, text: &str, pixel_height: f32) -> f32 {
        let scaled = self.font.as_scaled(pixel_height);
        text.chars()
            .map(|ch| scaled.h_advance(self.font.glyph_id(ch)))
            .sum()
    }

    /// Height from ascender to descender at `pixel_height`.
    pub fn glyph_height(&self, pixel_height: f32) -> u32 {
        let scaled = self.font.as_scaled(pixel_height);
        (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32
    }

    /// First character of `text` that maps to the `.notdef` glyph.
    pub fn missing_glyph(&self, text: &str) -> Option<char> {
        text.chars()
            .filter(|ch| !ch.is_whitespace())
            .find(|&ch| self.font.glyph_id(ch).0 == 0)
    }

    /// Draw `text` with its ascender line at `y_top`.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        x: i32,
        y_top: i32,
        text: &str,
        pixel_height: f32,
        color: Rgb<u8>,
    ) {
        let scaled = self.font.as_scaled(pixel_height);
        let baseline_y = y_top as f32 + scaled.ascent();
        let mut caret_x = x as f32;

        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            let advance = scaled.h_advance(glyph_id);
            let glyph = glyph_id.with_scale_and_position(pixel_height, point(caret_x, baseline_y));

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let gx = px as i32 + bounds.min.x as i32;
                    let gy = py as i32 + bounds.min.y as i32;
                    canvas.blend_pixel(gx, gy, color, coverage);
                });
            }

            caret_x += advance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{INK, WHITE};

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");

    fn mono() -> TtfFont {
        TtfFont::from_bytes(std::fs::read(FIXTURE).unwrap()).unwrap()
    }

    #[test]
    fn test_monospace_advances() {
        let font = mono();
        let one = font.text_width("a", 20.0);
        assert!(one > 0.0);
        assert!((font.text_width("abc", 20.0) - 3.0 * one).abs() < 0.01);
        assert!(font.text_width("abc", 40.0) > font.text_width("abc", 20.0));
        assert_eq!(font.text_width("", 20.0), 0.0);
    }

    #[test]
    fn test_glyph_height_tracks_size() {
        let font = mono();
        let h = font.glyph_height(20.0);
        assert!((20..=30).contains(&h), "height {}", h);
        assert!(font.glyph_height(40.0) > h);
    }

    #[test]
    fn test_draw_inks_inside_measured_box() {
        let font = mono();
        let mut canvas = Canvas::new(200, 60, WHITE);
        font.draw(&mut canvas, 10, 10, "Hi", 20.0, INK);

        let width = font.text_width("Hi", 20.0).ceil() as u32;
        let height = font.glyph_height(20.0);
        let inked: Vec<(u32, u32)> = canvas
            .as_image()
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != WHITE)
            .map(|(x, y, _)| (x, y))
            .collect();

        assert!(!inked.is_empty());
        for (x, y) in inked {
            assert!((10..10 + width + 1).contains(&x), "x = {}", x);
            assert!((10..10 + height + 1).contains(&y), "y = {}", y);
        }
    }

    #[test]
    fn test_missing_glyph_is_notdef() {
        let font = mono();
        assert_eq!(font.missing_glyph("Jane Doe"), None);
        assert_eq!(font.missing_glyph("Jane 王"), Some('王'));
    }

    #[test]
    fn test_rejects_non_font_data() {
        assert!(TtfFont::from_bytes(b"definitely not a font".to_vec()).is_err());
    }

    #[test]
    fn test_rejects_empty_data() {
        assert!(TtfFont::from_bytes(Vec::new()).is_err());
    }
}
