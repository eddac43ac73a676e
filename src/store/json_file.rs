//! JSON File Store
//!
//! Loads and saves the full book sequence.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::book::Book;
use crate::config::{Config, JsonLayout, SaveMode};
use crate::error::{CatalogError, Result};

/// Indentation used by `JsonLayout::Pretty`
const PRETTY_INDENT: &[u8] = b"    ";

/// Suffix appended to the file name for the atomic-rename temp file
const TEMP_SUFFIX: &str = ".tmp";

/// Reads and writes the catalog file
#[derive(Debug, Clone)]
pub struct BookStore {
    /// Catalog file location
    path: PathBuf,

    save_mode: SaveMode,

    json_layout: JsonLayout,
}

impl BookStore {
    /// Create a store for the given file
    pub fn new(path: impl Into<PathBuf>, save_mode: SaveMode, json_layout: JsonLayout) -> Self {
        Self {
            path: path.into(),
            save_mode,
            json_layout,
        }
    }

    /// Create a store from the storage section of a config
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.storage_path, config.save_mode, config.json_layout)
    }

    /// Load every book from the file
    ///
    /// Returns:
    /// - `Ok(books)` — file read and parsed
    /// - `Ok(vec![])` — file missing, or content not a valid catalog
    /// - `Err(Io)` — file exists but cannot be read
    pub fn load(&self) -> Result<Vec<Book>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No catalog at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match Self::decode(&bytes) {
            Ok(books) => {
                tracing::debug!("Loaded {} books from {}", books.len(), self.path.display());
                Ok(books)
            }
            Err(e) => {
                tracing::warn!(
                    "Catalog at {} is unreadable ({}), starting empty",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the file with the given books
    ///
    /// Creates missing parent directories first.
    pub fn save(&self, books: &[Book]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = self.encode(books)?;

        match self.save_mode {
            SaveMode::AtomicRename => {
                let temp_path = self.temp_path();
                {
                    let mut file = File::create(&temp_path)?;
                    file.write_all(&bytes)?;
                    file.sync_all()?;
                }
                fs::rename(&temp_path, &self.path)?;
            }
            SaveMode::Overwrite => {
                fs::write(&self.path, &bytes)?;
            }
        }

        tracing::debug!("Saved {} books to {}", books.len(), self.path.display());
        Ok(())
    }

    /// Get the catalog file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Parse file content into books
    ///
    /// Any bad record, or two records sharing an id, fails the whole load.
    fn decode(bytes: &[u8]) -> Result<Vec<Book>> {
        let records: Vec<Value> = serde_json::from_slice(bytes)
            .map_err(|e| CatalogError::Parse(format!("invalid catalog JSON: {}", e)))?;

        let books = records
            .iter()
            .map(Book::from_record)
            .collect::<Result<Vec<Book>>>()?;

        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id) {
                return Err(CatalogError::Parse(format!("duplicate book ID {}", book.id)));
            }
        }

        Ok(books)
    }

    /// Serialize books in the configured layout
    fn encode(&self, books: &[Book]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        match self.json_layout {
            JsonLayout::Pretty => {
                let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                books
                    .serialize(&mut serializer)
                    .map_err(|e| CatalogError::Serialization(e.to_string()))?;
            }
            JsonLayout::Compact => {
                serde_json::to_writer(&mut buf, books)
                    .map_err(|e| CatalogError::Serialization(e.to_string()))?;
            }
        }

        buf.push(b'\n');
        Ok(buf)
    }

    /// "books.json" → "books.json.tmp", next to the target
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("catalog"));
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}
