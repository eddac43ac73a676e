//! Store Module
//!
//! Persistent storage for the catalog as a single JSON file.
//!
//! ## Responsibilities
//! - Read the whole catalog on startup, falling back to empty on bad content
//! - Rewrite the whole catalog after every mutation
//! - Replace the file atomically (temp file + rename) unless told otherwise
//!
//! ## File Format
//! ```text
//! [
//!     {
//!         "id": 1,
//!         "title": "Мастер и Маргарита",
//!         "author": "Михаил Булгаков",
//!         "year": 1967,
//!         "status": "available"
//!     },
//!     ... (one object per book, in insertion order)
//! ]
//! ```
//!
//! Text is UTF-8 and non-ASCII characters are written unescaped. Ids must be
//! unique; a file repeating one is treated like any other unreadable content.

mod json_file;

pub use json_file::BookStore;
