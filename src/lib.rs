//! # Undersign - Signed Agreement Composer
//!
//! Undersign turns a localized agreement, a signer's details and a freehand
//! signature into a single PNG document. It provides:
//!
//! - **Text layout**: greedy pixel-width word wrapping over any measurer
//! - **Composition**: measure-then-draw page assembly with dynamic height
//! - **Localized content**: a static, validated locale → text table
//! - **Fonts**: runtime TrueType fonts with a built-in bitmap fallback
//! - **Server**: an HTTP endpoint returning documents as attachments
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use undersign::{
//!     compose::{AssetPaths, Composer},
//!     content::{ContentTable, Locale},
//!     input::{FormValues, SignatureBitmap},
//!     page::PageConfig,
//! };
//!
//! let composer = Composer::new(PageConfig::standard())?;
//! let bundle = ContentTable::builtin().bundle(Locale::English)?;
//! let form = FormValues::new("Jane Doe", "Acme", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
//! let signature = SignatureBitmap::from_encoded(&std::fs::read("signature.png")?)?;
//!
//! let document = composer.compose(&bundle, &form, &signature, &AssetPaths::default())?;
//! for advisory in &document.advisories {
//!     eprintln!("warning: {}", advisory);
//! }
//! std::fs::write(&document.filename, &document.png)?;
//!
//! # Ok::<(), undersign::error::UndersignError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Word wrapping |
//! | [`compose`] | Document composition |
//! | [`content`] | Locales and agreement text |
//! | [`input`] | Form values and signature bitmaps |
//! | [`font`] | Font resolution, measuring, drawing |
//! | [`canvas`] | RGB drawing surface |
//! | [`page`] | Page geometry |
//! | [`server`] | HTTP server |
//! | [`error`] | Error types |

pub mod canvas;
pub mod compose;
pub mod content;
pub mod error;
pub mod font;
pub mod input;
pub mod layout;
pub mod page;
pub mod server;

// Re-exports for convenience
pub use compose::{Composer, RenderedDocument};
pub use error::UndersignError;
pub use page::PageConfig;
