//! # Canvas
//!
//! An RGB drawing surface with clipped, coverage-weighted pixel writes.
//!
//! Every write goes through [`Canvas::blend_pixel`], which silently drops
//! coordinates outside the buffer, so no element can write past the height
//! the canvas was allocated with.

use image::{Rgb, RgbImage, RgbaImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);
pub const RULE_GRAY: Rgb<u8> = Rgb([160, 160, 160]);

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Mix `color` into the pixel at (x, y) by `coverage` (0.0 to 1.0).
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage == 0.0 {
            return;
        }

        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for (d, s) in dst.0.iter_mut().zip(color.0) {
            *d = mix(*d, s, coverage);
        }
    }

    /// Solid horizontal line from `x0` to `x1` (exclusive), `thickness` rows
    /// starting at `y`.
    pub fn horizontal_rule(&mut self, x0: u32, x1: u32, y: u32, thickness: u32, color: Rgb<u8>) {
        for row in y..y + thickness {
            for x in x0..x1 {
                self.blend_pixel(x as i32, row as i32, color, 1.0);
            }
        }
    }

    /// Paint `overlay` with its top-left corner at (x, y), using its alpha
    /// channel as the mask. Transparent pixels leave the canvas untouched.
    pub fn composite(&mut self, overlay: &RgbaImage, x: i32, y: i32) {
        for (ox, oy, pixel) in overlay.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                continue;
            }
            self.blend_pixel(
                x + ox as i32,
                y + oy as i32,
                Rgb([r, g, b]),
                a as f32 / 255.0,
            );
        }
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Linear interpolation between two channel values.
fn mix(dst: u8, src: u8, t: f32) -> u8 {
    (dst as f32 + (src as f32 - dst as f32) * t).round() as u8
}
