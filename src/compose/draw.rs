//! Draw pass: paint a [`LayoutPlan`] onto a fresh canvas.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::borrow::Cow;

use super::plan::{ElementKind, LayoutPlan};
use crate::canvas::{Canvas, INK, RULE_GRAY, WHITE};
use crate::font::FontHandle;
use crate::page::PageConfig;

const SEPARATOR_THICKNESS: u32 = 2;

/// Everything the draw pass paints besides text.
pub struct Images<'a> {
    pub logo: Option<&'a RgbaImage>,
    pub signature: &'a RgbaImage,
}

pub fn render(
    plan: &LayoutPlan,
    config: &PageConfig,
    font: &FontHandle,
    images: &Images<'_>,
) -> Canvas {
    let mut canvas = Canvas::new(config.width, plan.height, WHITE);
    let x = config.margin as i32;

    for el in &plan.elements {
        match &el.kind {
            ElementKind::Logo => {
                if let Some(logo) = images.logo {
                    let logo = scale_to_fit(logo, config.logo_max_width, config.logo_max_height);
                    canvas.composite(&logo, x, el.y as i32);
                }
            }
            ElementKind::Heading(text) => {
                draw_line(&mut canvas, font, text, config.heading_px, x, el.y, el.height);
            }
            ElementKind::Separator => {
                let y = el.y + el.height.saturating_sub(SEPARATOR_THICKNESS) / 2;
                canvas.horizontal_rule(
                    config.margin,
                    config.width - config.margin,
                    y,
                    SEPARATOR_THICKNESS,
                    RULE_GRAY,
                );
            }
            ElementKind::RuleLine(text)
            | ElementKind::Declaration(text)
            | ElementKind::Field(text)
            | ElementKind::SignatureLabel(text) => {
                draw_line(&mut canvas, font, text, config.body_px, x, el.y, el.height);
            }
            ElementKind::Signature => {
                let signature = images.signature;
                if signature.width() > 0 && signature.height() > 0 {
                    let signature = scale_to_fit(
                        signature,
                        config.signature_max_width,
                        config.signature_max_height,
                    );
                    canvas.composite(&signature, x, el.y as i32);
                }
            }
        }
    }

    canvas
}

/// Draw one line of text vertically centered in its band.
fn draw_line(
    canvas: &mut Canvas,
    font: &FontHandle,
    text: &str,
    pixel_height: f32,
    x: i32,
    band_y: u32,
    band_height: u32,
) {
    if text.is_empty() {
        return;
    }
    let glyph_height = font.glyph_height(pixel_height);
    let y_top = band_y + band_height.saturating_sub(glyph_height) / 2;
    font.draw_text(canvas, x, y_top as i32, text, pixel_height, INK);
}

/// Largest size within `max_width × max_height` keeping the aspect ratio.
/// Images that already fit keep their size; nothing is upscaled.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (w, h)
}

fn scale_to_fit(image: &RgbaImage, max_width: u32, max_height: u32) -> Cow<'_, RgbaImage> {
    let (w, h) = fit_within(image.width(), image.height(), max_width, max_height);
    if (w, h) == image.dimensions() {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(imageops::resize(image, w, h, FilterType::Lanczos3))
    }
}
