//! Configuration for Bookshelf
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{CatalogError, Result};

/// Status given to every newly added book unless configured otherwise
pub const DEFAULT_STATUS: &str = "available";

/// Conventional status for a lent-out book
pub const CHECKED_OUT_STATUS: &str = "checked out";

/// Main configuration for a Library instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// JSON file backing the catalog
    pub storage_path: PathBuf,

    /// How the catalog file is rewritten after each mutation
    pub save_mode: SaveMode,

    /// Layout of the JSON written to disk
    pub json_layout: JsonLayout,

    // -------------------------------------------------------------------------
    // Catalog Configuration
    // -------------------------------------------------------------------------
    /// Status assigned by `add_book`
    pub default_status: String,

    /// When set, `update_status` rejects statuses outside this list
    pub allowed_statuses: Option<Vec<String>>,
}

/// Save strategy: how the storage file is replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Write a sibling temp file, fsync, then rename over the target
    AtomicRename,

    /// Truncate and rewrite the target in place
    Overwrite,
}

/// JSON output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLayout {
    /// Four-space indentation, one field per line
    Pretty,

    /// Single line
    Compact,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("books.json"),
            save_mode: SaveMode::AtomicRename,
            json_layout: JsonLayout::Pretty,
            default_status: DEFAULT_STATUS.to_string(),
            allowed_statuses: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check a status against the allowed set (always true when unset)
    pub fn is_status_allowed(&self, status: &str) -> bool {
        match &self.allowed_statuses {
            Some(allowed) => allowed.iter().any(|s| s == status),
            None => true,
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the catalog file path
    pub fn storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage_path = path.into();
        self
    }

    /// Set the save strategy
    pub fn save_mode(mut self, mode: SaveMode) -> Self {
        self.config.save_mode = mode;
        self
    }

    /// Set the JSON layout
    pub fn json_layout(mut self, layout: JsonLayout) -> Self {
        self.config.json_layout = layout;
        self
    }

    /// Set the status given to new books
    pub fn default_status(mut self, status: impl Into<String>) -> Self {
        self.config.default_status = status.into();
        self
    }

    /// Restrict `update_status` to the given statuses
    pub fn allowed_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allowed_statuses = Some(statuses.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.config.storage_path.as_os_str().is_empty() {
            return Err(CatalogError::Config("storage path must not be empty".to_string()));
        }
        Ok(self.config)
    }
}

