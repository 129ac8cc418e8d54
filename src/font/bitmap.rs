//! Built-in bitmap font.
//!
//! Uses Spleen 12x24, scaled by whole multiples. Covers Latin text; glyphs
//! the font lacks (CJK, most symbols) render as a hollow box the width of
//! one cell, so measurement stays exact even when the glyph is missing.

use image::Rgb;
use spleen_font::{FONT_12X24, PSF2Font};

use crate::canvas::Canvas;

pub const CELL_WIDTH: u32 = 12;
pub const CELL_HEIGHT: u32 = 24;

/// Smallest whole scale whose cell is at least `pixel_height` tall.
///
/// 20 px body text → 1 (24 px cells), 32 px headings → 2 (48 px cells).
pub fn scale_for(pixel_height: f32) -> u32 {
    ((pixel_height / CELL_HEIGHT as f32).ceil() as u32).max(1)
}

/// Every character advances by exactly one cell.
pub fn text_width(text: &str, pixel_height: f32) -> f32 {
    text.chars().count() as f32 * CELL_WIDTH as f32 * scale_for(pixel_height) as f32
}

pub fn glyph_height(pixel_height: f32) -> u32 {
    CELL_HEIGHT.saturating_mul(scale_for(pixel_height))
}

/// First character of `text` the font has no glyph for.
///
/// Everything from U+3000 up (CJK and beyond) counts as missing without a
/// lookup. Whitespace is never missing.
pub fn missing_glyph(text: &str) -> Option<char> {
    let Ok(mut spleen) = PSF2Font::new(FONT_12X24) else {
        return text.chars().find(|ch| !ch.is_whitespace());
    };
    text.chars().filter(|ch| !ch.is_whitespace()).find(|&ch| {
        ch >= '\u{3000}' || spleen.glyph_for_utf8(ch.to_string().as_bytes()).is_none()
    })
}

/// Draw `text` with the top of its cells at `y_top`.
pub fn draw(
    canvas: &mut Canvas,
    x: i32,
    y_top: i32,
    text: &str,
    pixel_height: f32,
    color: Rgb<u8>,
) {
    let Ok(mut spleen) = PSF2Font::new(FONT_12X24) else {
        return;
    };
    let scale = scale_for(pixel_height) as i32;
    let advance = CELL_WIDTH as i32 * scale;

    for (i, ch) in text.chars().enumerate() {
        let origin_x = x + i as i32 * advance;
        let glyph = glyph_bitmap(&mut spleen, ch);

        for (idx, on) in glyph.iter().enumerate() {
            if !on {
                continue;
            }
            let gx = (idx as u32 % CELL_WIDTH) as i32;
            let gy = (idx as u32 / CELL_WIDTH) as i32;
            for dy in 0..scale {
                for dx in 0..scale {
                    canvas.blend_pixel(
                        origin_x + gx * scale + dx,
                        y_top + gy * scale + dy,
                        color,
                        1.0,
                    );
                }
            }
        }
    }
}

/// One cell of on/off pixels, row-major.
fn glyph_bitmap(spleen: &mut PSF2Font, ch: char) -> Vec<bool> {
    let w = CELL_WIDTH as usize;
    let h = CELL_HEIGHT as usize;
    let mut cell = vec![false; w * h];

    if ch == ' ' {
        return cell;
    }

    let utf8 = ch.to_string();
    match spleen.glyph_for_utf8(utf8.as_bytes()) {
        Some(glyph) => {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < h && col_x < w {
                        cell[row_y * w + col_x] = on;
                    }
                }
            }
        }
        None => draw_box(&mut cell, w, h),
    }

    cell
}

/// Hollow box inset by two pixels, for characters the font lacks.
fn draw_box(cell: &mut [bool], width: usize, height: usize) {
    let (left, right) = (2, width - 3);
    let (top, bottom) = (4, height - 5);
    for x in left..=right {
        cell[top * width + x] = true;
        cell[bottom * width + x] = true;
    }
    for y in top..=bottom {
        cell[y * width + left] = true;
        cell[y * width + right] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{INK, WHITE};

    #[test]
    fn test_scale_for() {
        assert_eq!(scale_for(20.0), 1);
        assert_eq!(scale_for(24.0), 1);
        assert_eq!(scale_for(32.0), 2);
        assert_eq!(scale_for(1.0), 1);
    }

    #[test]
    fn test_text_width_is_per_character() {
        assert_eq!(text_width("abc", 20.0), 36.0);
        assert_eq!(text_width("abc", 32.0), 72.0);
        // CJK characters take one cell like any other
        assert_eq!(text_width("簽名", 20.0), 24.0);
        assert_eq!(text_width("", 20.0), 0.0);
    }

    #[test]
    fn test_huge_sizes_saturate() {
        assert_eq!(glyph_height(1e9), u32::MAX);
        assert_eq!(glyph_height(f32::MAX), u32::MAX);
        assert!(text_width("abc", 1e9).is_finite());
    }

    #[test]
    fn test_missing_glyph() {
        assert_eq!(missing_glyph("Jane Doe, January 15, 2024"), None);
        assert_eq!(missing_glyph("Name: 王小明"), Some('王'));
        assert_eq!(missing_glyph("2024年1月15日"), Some('年'));
        assert_eq!(missing_glyph(""), None);
    }

    #[test]
    fn test_draw_marks_pixels_within_cells() {
        let mut canvas = Canvas::new(40, 30, WHITE);
        draw(&mut canvas, 2, 3, "Hi", 20.0, INK);

        let image = canvas.as_image();
        let inked: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == INK)
            .map(|(x, y, _)| (x, y))
            .collect();

        assert!(!inked.is_empty());
        for (x, y) in inked {
            assert!((2..2 + 24).contains(&x), "x = {}", x);
            assert!((3..3 + 24).contains(&y), "y = {}", y);
        }
    }

    #[test]
    fn test_missing_glyph_draws_box() {
        let mut canvas = Canvas::new(12, 24, WHITE);
        draw(&mut canvas, 0, 0, "簽", 20.0, INK);
        assert!(canvas.as_image().pixels().any(|p| *p == INK));
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut canvas = Canvas::new(12, 24, WHITE);
        draw(&mut canvas, 0, 0, " ", 20.0, INK);
        assert!(canvas.as_image().pixels().all(|p| *p == WHITE));
    }
}
