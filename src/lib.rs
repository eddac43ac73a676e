//! # Bookshelf
//!
//! A personal library catalog with:
//! - Book records persisted to a single human-readable JSON file
//! - Write-through persistence: every mutation rewrites the file
//! - Lenient startup: a missing or corrupt file means an empty catalog
//! - An interactive six-choice text menu
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Menu / bookshelf binary                     │
//! │                   (text prompts, clap)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Library                               │
//! │           (Vec<Book>, id assignment, search)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Vec<Book>
//!                       ▼
//!                ┌─────────────┐
//!                │  BookStore  │
//!                │   (JSON)    │
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod book;
pub mod store;
pub mod command;
pub mod library;
pub mod menu;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CatalogError, Result};
pub use config::Config;
pub use book::{Book, BookId};
pub use command::{Command, Outcome};
pub use library::Library;
pub use menu::Menu;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Bookshelf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
