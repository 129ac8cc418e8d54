//! # Page Module
//!
//! Geometry of the rendered agreement page.
//!
//! ## Modules
//!
//! - [`config`]: Page dimensions, margins and reserved block heights

pub mod config;

pub use config::PageConfig;
