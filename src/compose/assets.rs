//! Optional font and logo files.
//!
//! Both are read at the start of a composition and dropped with it; nothing
//! is cached between documents.

use image::RgbaImage;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_FONT_PATH: &str = "assets/font.ttf";
pub const DEFAULT_LOGO_PATH: &str = "assets/logo.png";

/// Where to look for the optional assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub font: Option<PathBuf>,
    pub logo: Option<PathBuf>,
}

impl AssetPaths {
    /// No assets: built-in font, no logo.
    pub fn none() -> Self {
        Self {
            font: None,
            logo: None,
        }
    }
}

impl Default for AssetPaths {
    /// The fixed relative names `assets/font.ttf` and `assets/logo.png`.
    fn default() -> Self {
        Self {
            font: Some(PathBuf::from(DEFAULT_FONT_PATH)),
            logo: Some(PathBuf::from(DEFAULT_LOGO_PATH)),
        }
    }
}

/// Outcome of loading the logo.
#[derive(Debug)]
pub enum LogoLoad {
    /// Not configured, or the file does not exist
    Absent,
    Loaded(RgbaImage),
    /// The file exists but could not be read or decoded
    Failed { path: PathBuf, reason: String },
}

impl LogoLoad {
    pub fn image(&self) -> Option<&RgbaImage> {
        match self {
            LogoLoad::Loaded(image) => Some(image),
            _ => None,
        }
    }
}

pub fn load_logo(path: Option<&Path>) -> LogoLoad {
    let Some(path) = path else {
        return LogoLoad::Absent;
    };

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no logo file");
            return LogoLoad::Absent;
        }
        Err(e) => return failed(path, e.to_string()),
    };

    match image::load_from_memory(&bytes) {
        Ok(image) => {
            tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded logo");
            LogoLoad::Loaded(image.to_rgba8())
        }
        Err(e) => failed(path, e.to_string()),
    }
}

fn failed(path: &Path, reason: String) -> LogoLoad {
    tracing::warn!(path = %path.display(), %reason, "omitting logo");
    LogoLoad::Failed {
        path: path.to_path_buf(),
        reason,
    }
}
