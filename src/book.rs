//! Book Module
//!
//! A single catalog entry and its record form.
//!
//! ## Record Format
//! ```text
//! {
//!     "id": 1,
//!     "title": "Dune",
//!     "author": "Frank Herbert",
//!     "year": 1965,
//!     "status": "available"
//! }
//! ```
//!
//! All five keys are required when reading a record back. Unknown keys are
//! ignored.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{CatalogError, Result};

/// Identifier assigned by the Library
pub type BookId = u64;

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique within a Library, assigned as `max + 1`
    pub id: BookId,

    pub title: String,

    pub author: String,

    /// Publication year
    pub year: i32,

    /// Free-form status, conventionally "available" or "checked out"
    pub status: String,
}

impl Book {
    /// Create a book with every field given
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: status.into(),
        }
    }

    /// Convert to a flat JSON object with keys id, title, author, year, status
    pub fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "author": self.author,
            "year": self.year,
            "status": self.status,
        })
    }

    /// Build a book from a JSON object
    ///
    /// Fails with `CatalogError::Parse` when a key is missing or has the
    /// wrong type.
    pub fn from_record(record: &Value) -> Result<Self> {
        if !record.is_object() {
            return Err(CatalogError::Parse(
                "book record must be a JSON object".to_string(),
            ));
        }

        Self::deserialize(record)
            .map_err(|e| CatalogError::Parse(format!("invalid book record: {}", e)))
    }

    /// Search predicate
    ///
    /// Case-insensitive substring of title or author, or exact match of the
    /// year's decimal form. `lowered` must already be lowercase.
    pub(crate) fn matches(&self, query: &str, lowered: &str) -> bool {
        self.title.to_lowercase().contains(lowered)
            || self.author.to_lowercase().contains(lowered)
            || self.year.to_string() == query
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}
