//! # Page Configuration
//!
//! This module defines the geometry of one render configuration.
//!
//! ## Vertical Layout
//!
//! Every element reserves a fixed band of rows. The canvas height is the sum
//! of all bands, so it is known before a single pixel is drawn:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ top_margin                   │
//! │ logo_block_height (optional) │
//! │ heading_line_height × n      │
//! │ separator_height             │
//! │ line_height × rules + spacer │
//! │ separator_height             │
//! │ line_height × decl + spacer  │
//! │ field_line_height × 3        │
//! │ field_line_height (label)    │
//! │ signature_block_height       │
//! │ bottom_margin                │
//! └──────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use undersign::page::PageConfig;
//!
//! let config = PageConfig::standard();
//! assert_eq!(config.content_width(), 700);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::UndersignError;
use crate::font::FontHandle;

/// Upper bound for the page width and for every reserved band.
pub const MAX_DIMENSION: u32 = 16_384;

/// # Page Configuration
///
/// Width is fixed per configuration; height is computed per document.
///
/// ## Reserved Blocks
///
/// - **logo_block_height** must hold a logo scaled into
///   `logo_max_width × logo_max_height`
/// - **signature_block_height** must hold a signature scaled into
///   `signature_max_width × signature_max_height`
///
/// [`PageConfig::validate`] enforces both, which is what keeps the signature
/// inside its block regardless of the captured bitmap size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Left and right margin in pixels
    pub margin: u32,
    pub top_margin: u32,
    pub bottom_margin: u32,

    /// Heading text size in pixels (TrueType fonts)
    pub heading_px: f32,
    /// Body text size in pixels (TrueType fonts)
    pub body_px: f32,
    pub heading_line_height: u32,
    /// Line height of rule and declaration text
    pub line_height: u32,
    /// Spacer after the rule body and after the declaration
    pub paragraph_spacing: u32,
    /// Band reserved for each horizontal separator
    pub separator_height: u32,
    /// Line height of the name/organization/date fields and the signature label
    pub field_line_height: u32,

    pub logo_max_width: u32,
    pub logo_max_height: u32,
    pub logo_block_height: u32,

    pub signature_max_width: u32,
    pub signature_max_height: u32,
    pub signature_block_height: u32,

    /// First segment of generated filenames (`<prefix>_<name>_<date>.png`)
    pub filename_prefix: String,
}

impl PageConfig {
    /// # Standard Agreement Page
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Width | 800 px |
    /// | Content width | 700 px |
    /// | Heading | 32 px in 56 px lines |
    /// | Body | 20 px in 30 px lines |
    /// | Logo box | 200 × 100 in a 120 px block |
    /// | Signature box | 400 × 150 in a 160 px block |
    pub fn standard() -> Self {
        Self {
            width: 800,
            margin: 50,
            top_margin: 40,
            bottom_margin: 40,
            heading_px: 32.0,
            body_px: 20.0,
            heading_line_height: 56,
            line_height: 30,
            paragraph_spacing: 20,
            separator_height: 20,
            field_line_height: 40,
            logo_max_width: 200,
            logo_max_height: 100,
            logo_block_height: 120,
            signature_max_width: 400,
            signature_max_height: 150,
            signature_block_height: 160,
            filename_prefix: "Signed".to_string(),
        }
    }

    /// Width available to text: `width - 2 * margin`
    #[inline]
    pub fn content_width(&self) -> u32 {
        self.width.saturating_sub(self.margin.saturating_mul(2))
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their [`PageConfig::standard`] values. The result
    /// is validated before it is returned.
    pub fn load(path: &Path) -> Result<Self, UndersignError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json).map_err(|e| {
            UndersignError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the geometry invariants the composer relies on.
    ///
    /// Text sizes are checked against the built-in font: its glyph box at
    /// each size must fit the line that size is drawn in.
    pub fn validate(&self) -> Result<(), UndersignError> {
        for (name, px) in [("heading_px", self.heading_px), ("body_px", self.body_px)] {
            if !(px.is_finite() && px > 0.0) {
                return Err(UndersignError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, px
                )));
            }
        }

        let bands = [
            ("width", self.width),
            ("margin", self.margin),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("heading_line_height", self.heading_line_height),
            ("line_height", self.line_height),
            ("paragraph_spacing", self.paragraph_spacing),
            ("separator_height", self.separator_height),
            ("field_line_height", self.field_line_height),
            ("logo_block_height", self.logo_block_height),
            ("signature_block_height", self.signature_block_height),
        ];
        for (name, value) in bands {
            if value > MAX_DIMENSION {
                return Err(UndersignError::Config(format!(
                    "{} ({} px) exceeds {} px",
                    name, value, MAX_DIMENSION
                )));
            }
        }

        let lines = [
            ("heading_px", self.heading_px, "heading_line_height", self.heading_line_height),
            ("body_px", self.body_px, "line_height", self.line_height),
            ("body_px", self.body_px, "field_line_height", self.field_line_height),
        ];
        for (size_name, px, line_name, line_height) in lines {
            let glyph_height = FontHandle::Builtin.glyph_height(px);
            if glyph_height > line_height {
                return Err(UndersignError::Config(format!(
                    "{} {} needs {} px glyphs, taller than {} ({} px)",
                    size_name, px, glyph_height, line_name, line_height
                )));
            }
        }

        if self.content_width() == 0 {
            return Err(UndersignError::Config(format!(
                "margin {} leaves no content width on a {} px page",
                self.margin, self.width
            )));
        }
        if self.signature_max_width > self.content_width() {
            return Err(UndersignError::Config(format!(
                "signature box ({} px) is wider than the content width ({} px)",
                self.signature_max_width,
                self.content_width()
            )));
        }
        if self.signature_block_height < self.signature_max_height {
            return Err(UndersignError::Config(format!(
                "signature block ({} px) is shorter than the signature box ({} px)",
                self.signature_block_height, self.signature_max_height
            )));
        }
        if self.logo_max_width > self.content_width() {
            return Err(UndersignError::Config(format!(
                "logo box ({} px) is wider than the content width ({} px)",
                self.logo_max_width,
                self.content_width()
            )));
        }
        if self.logo_block_height < self.logo_max_height {
            return Err(UndersignError::Config(format!(
                "logo block ({} px) is shorter than the logo box ({} px)",
                self.logo_block_height, self.logo_max_height
            )));
        }
        Ok(())
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_dimensions() {
        let config = PageConfig::standard();
        assert_eq!(config.width, 800);
        assert_eq!(config.content_width(), 700);
        assert_eq!(config.content_width(), config.width - 2 * config.margin);
    }

    #[test]
    fn test_standard_is_valid() {
        assert!(PageConfig::standard().validate().is_ok());
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(PageConfig::default(), PageConfig::standard());
    }

    #[test]
    fn test_signature_block_must_hold_signature_box() {
        let config = PageConfig {
            signature_block_height: 100,
            ..PageConfig::standard()
        };
        assert!(matches!(config.validate(), Err(UndersignError::Config(_))));
    }

    #[test]
    fn test_logo_block_must_hold_logo_box() {
        let config = PageConfig {
            logo_block_height: 50,
            ..PageConfig::standard()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_margin_too_wide() {
        let config = PageConfig {
            margin: 400,
            ..PageConfig::standard()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_margin_is_rejected_without_overflow() {
        let config = PageConfig {
            margin: 2_147_483_648,
            ..PageConfig::standard()
        };
        assert_eq!(config.content_width(), 0);
        assert!(matches!(config.validate(), Err(UndersignError::Config(_))));
    }

    #[test]
    fn test_heading_taller_than_its_line_is_rejected() {
        let config = PageConfig {
            heading_px: 1e9,
            ..PageConfig::standard()
        };
        assert!(matches!(config.validate(), Err(UndersignError::Config(_))));

        // 40 px needs 48 px cells, 56 px lines hold them; 50 px needs 72
        let fits = PageConfig {
            heading_px: 40.0,
            ..PageConfig::standard()
        };
        assert!(fits.validate().is_ok());
        let too_big = PageConfig {
            heading_px: 50.0,
            ..PageConfig::standard()
        };
        assert!(too_big.validate().is_err());
    }

    #[test]
    fn test_body_must_fit_field_lines() {
        let config = PageConfig {
            field_line_height: 20,
            ..PageConfig::standard()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_sizes_are_rejected() {
        for px in [f32::NAN, f32::INFINITY, 0.0, -4.0] {
            let config = PageConfig {
                body_px: px,
                ..PageConfig::standard()
            };
            assert!(config.validate().is_err(), "body_px {}", px);
        }
    }

    #[test]
    fn test_oversized_band_is_rejected() {
        let config = PageConfig {
            line_height: MAX_DIMENSION + 1,
            ..PageConfig::standard()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_overflowing_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, r#"{"margin": 3000000000, "heading_px": 1e9}"#).unwrap();

        assert!(matches!(
            PageConfig::load(&path),
            Err(UndersignError::Config(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_standard_values() {
        let config: PageConfig =
            serde_json::from_str(r#"{"width": 1000, "filename_prefix": "Agreement"}"#).unwrap();
        assert_eq!(config.width, 1000);
        assert_eq!(config.content_width(), 900);
        assert_eq!(config.filename_prefix, "Agreement");
        assert_eq!(config.line_height, PageConfig::standard().line_height);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, r#"{"margin": 60}"#).unwrap();

        let config = PageConfig::load(&path).unwrap();
        assert_eq!(config.content_width(), 680);
    }

    #[test]
    fn test_load_rejects_invalid_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, r#"{"signature_block_height": 10}"#).unwrap();

        assert!(PageConfig::load(&path).is_err());
    }
}
