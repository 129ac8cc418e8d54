//! Server state and configuration.

use crate::compose::{AssetPaths, Composer};
use crate::content::ContentTable;
use crate::error::UndersignError;
use crate::page::PageConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Optional font and logo files
    pub assets: AssetPaths,
    pub page: PageConfig,
    pub content: ContentTable,
}

impl ServerConfig {
    /// Built-in content and standard page geometry.
    pub fn new(listen_addr: impl Into<String>, assets: AssetPaths) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            assets,
            page: PageConfig::standard(),
            content: ContentTable::builtin().clone(),
        }
    }
}

/// Application state shared across handlers. Read-only after startup.
pub struct AppState {
    pub composer: Composer,
    pub content: ContentTable,
    pub assets: AssetPaths,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, UndersignError> {
        Ok(Self {
            composer: Composer::new(config.page)?,
            content: config.content,
            assets: config.assets,
        })
    }
}
