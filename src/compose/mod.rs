//! # Document Composer
//!
//! Turns a content bundle, the submitted form and a signature bitmap into a
//! finished PNG document.
//!
//! ## Architecture
//!
//! ```text
//! AssetPaths ──► resolve_font / load_logo ──► advisories
//!                        │
//! ContentBundle ─┐       ▼
//! FormValues ────┼──► plan (wrap + accumulate offsets) ──► LayoutPlan
//!                │                                            │
//! Signature ─────┴──────────────► render (draw at offsets) ◄──┘
//!                                          │
//!                                          ▼
//!                              RenderedDocument { image, png, filename }
//! ```
//!
//! The canvas height depends on how the text wraps, so the document is
//! measured completely before the canvas is allocated.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use undersign::compose::{AssetPaths, Composer};
//! use undersign::content::{ContentTable, Locale};
//! use undersign::input::{FormValues, SignatureBitmap};
//! use undersign::page::PageConfig;
//!
//! let composer = Composer::new(PageConfig::standard())?;
//! let bundle = ContentTable::builtin().bundle(Locale::English)?;
//! let form = FormValues::new("Jane Doe", "Acme", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
//! let signature = SignatureBitmap::blank(600, 200);
//!
//! let document = composer.compose(&bundle, &form, &signature, &AssetPaths::none())?;
//! assert_eq!(document.filename, "Signed_Jane_Doe_2024-01-15.png");
//! assert_eq!(document.image.width(), 800);
//! # Ok::<(), undersign::UndersignError>(())
//! ```

mod assets;
mod draw;
mod plan;

pub use assets::{AssetPaths, DEFAULT_FONT_PATH, DEFAULT_LOGO_PATH, LogoLoad, load_logo};
pub use draw::fit_within;
pub use plan::{ElementKind, LayoutPlan, PlacedElement};

use image::{ImageEncoder, RgbImage};
use std::fmt;
use std::path::PathBuf;

use crate::content::ContentBundle;
use crate::error::UndersignError;
use crate::font::{FontHandle, ResolvedFont, resolve_font};
use crate::input::{FormValues, SignatureBitmap};
use crate::page::PageConfig;

/// A non-blocking warning raised while composing. The document is still
/// produced, with the documented fallback in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The built-in font stood in and some drawn text has no glyph in it.
    FontFallback { reason: String },
    /// A logo file was present but unusable; the logo was left out.
    LogoUnavailable { path: PathBuf, reason: String },
}

impl Advisory {
    /// Stable machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Advisory::FontFallback { .. } => "font-fallback",
            Advisory::LogoUnavailable { .. } => "logo-unavailable",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::FontFallback { reason } => {
                write!(f, "Using the built-in font ({}); some characters may not render", reason)
            }
            Advisory::LogoUnavailable { path, reason } => {
                write!(f, "Logo {} omitted: {}", path.display(), reason)
            }
        }
    }
}

/// A finished document, ready for the download sink.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub image: RgbImage,
    /// PNG encoding of `image`
    pub png: Vec<u8>,
    pub filename: String,
    pub advisories: Vec<Advisory>,
    /// Offsets the document was drawn with
    pub layout: LayoutPlan,
}

/// Composes documents for one page configuration.
#[derive(Debug, Clone)]
pub struct Composer {
    config: PageConfig,
}

impl Composer {
    pub fn new(config: PageConfig) -> Result<Self, UndersignError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Measure pass only.
    pub fn plan(
        &self,
        bundle: &ContentBundle,
        form: &FormValues,
        font: &FontHandle,
        has_logo: bool,
    ) -> LayoutPlan {
        plan::plan(&self.config, bundle, form, font, has_logo)
    }

    /// Load the assets at `assets` and compose.
    ///
    /// `form` must be complete ([`FormValues::is_complete`]); that is the
    /// caller's check to make. Blank signatures are accepted as-is.
    pub fn compose(
        &self,
        bundle: &ContentBundle,
        form: &FormValues,
        signature: &SignatureBitmap,
        assets: &AssetPaths,
    ) -> Result<RenderedDocument, UndersignError> {
        let font = resolve_font(assets.font.as_deref());
        let logo = load_logo(assets.logo.as_deref());
        self.compose_with(bundle, form, signature, &font, &logo)
    }

    /// Compose with already-resolved assets.
    pub fn compose_with(
        &self,
        bundle: &ContentBundle,
        form: &FormValues,
        signature: &SignatureBitmap,
        font: &ResolvedFont,
        logo: &LogoLoad,
    ) -> Result<RenderedDocument, UndersignError> {
        let layout = self.plan(bundle, form, font.handle(), logo.image().is_some());

        let mut advisories = Vec::new();
        if let Some(reason) = font.fallback_reason() {
            let missing = layout
                .elements
                .iter()
                .filter_map(|el| el.kind.text())
                .find_map(|text| font.handle().missing_glyph(text));
            if let Some(ch) = missing {
                advisories.push(Advisory::FontFallback {
                    reason: format!("{}; no glyph for '{}'", reason, ch),
                });
            }
        }
        if let LogoLoad::Failed { path, reason } = logo {
            advisories.push(Advisory::LogoUnavailable {
                path: path.clone(),
                reason: reason.clone(),
            });
        }

        let images = draw::Images {
            logo: logo.image(),
            signature: signature.image(),
        };
        let image = draw::render(&layout, &self.config, font.handle(), &images).into_image();
        let png = encode_png(&image)?;
        let filename = document_filename(&self.config.filename_prefix, form);

        tracing::debug!(
            locale = %bundle.locale,
            height = layout.height,
            bytes = png.len(),
            advisories = advisories.len(),
            "composed document"
        );

        Ok(RenderedDocument {
            image,
            png,
            filename,
            advisories,
            layout,
        })
    }
}

/// `<prefix>_<name words joined by _>_<YYYY-MM-DD>.png`
pub fn document_filename(prefix: &str, form: &FormValues) -> String {
    let name = form.name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_{}_{}.png", prefix, name, form.date.format("%Y-%m-%d"))
}

/// Encode an RGB image as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, UndersignError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| UndersignError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentTable, Locale};
    use chrono::NaiveDate;

    fn form(name: &str) -> FormValues {
        FormValues::new(name, "Acme", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            document_filename("Signed", &form("Jane Doe")),
            "Signed_Jane_Doe_2024-01-15.png"
        );
    }

    #[test]
    fn test_filename_normalizes_whitespace() {
        assert_eq!(
            document_filename("Signed", &form("  Mary   Ann\tLee ")),
            "Signed_Mary_Ann_Lee_2024-01-15.png"
        );
    }

    #[test]
    fn test_advisory_codes() {
        let font = Advisory::FontFallback {
            reason: "x".to_string(),
        };
        let logo = Advisory::LogoUnavailable {
            path: PathBuf::from("logo.png"),
            reason: "y".to_string(),
        };
        assert_eq!(font.code(), "font-fallback");
        assert_eq!(logo.code(), "logo-unavailable");
        assert!(logo.to_string().contains("logo.png"));
    }

    #[test]
    fn test_composer_rejects_invalid_config() {
        let config = PageConfig {
            margin: 500,
            ..PageConfig::standard()
        };
        assert!(Composer::new(config).is_err());
    }

    #[test]
    fn test_logo_failure_is_the_only_advisory_for_english() {
        // English renders with the built-in font without an advisory
        let composer = Composer::new(PageConfig::standard()).unwrap();
        let bundle = ContentTable::builtin().bundle(Locale::English).unwrap();
        let logo = LogoLoad::Failed {
            path: PathBuf::from("logo.png"),
            reason: "bad".to_string(),
        };
        let doc = composer
            .compose_with(
                &bundle,
                &form("Jane Doe"),
                &SignatureBitmap::blank(10, 10),
                &resolve_font(None),
                &logo,
            )
            .unwrap();

        assert_eq!(doc.advisories.len(), 1);
        assert_eq!(doc.advisories[0].code(), "logo-unavailable");
        assert!(doc.layout.logo().is_none());
    }

    #[test]
    fn test_png_round_trips() {
        let image = RgbImage::from_pixel(3, 2, image::Rgb([1, 2, 3]));
        let png = encode_png(&image).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded, image);
    }
}
