//! Library Module
//!
//! The catalog itself: owns the books and keeps the file in step with them.
//!
//! ## Responsibilities
//! - Load the catalog once at construction
//! - Assign ids as `max(existing) + 1`
//! - Persist the full catalog after every mutation (write-through)
//! - Answer lookups and searches with linear scans

use std::path::Path;

use crate::book::{Book, BookId};
use crate::command::{Command, Outcome};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::store::BookStore;

/// The book catalog
///
/// ## Persistence Model: Write-Through
///
/// - `add_book`, `remove_book` and `update_status` each perform exactly one
///   full-file write before returning
/// - Failed lookups (`NotFound`, `InvalidStatus`) write nothing
/// - There is no in-memory state that has not been handed to the store
pub struct Library {
    /// Library configuration
    config: Config,

    /// Backing JSON file
    store: BookStore,

    /// Books in insertion order
    books: Vec<Book>,
}

impl Library {
    /// Open the catalog described by the config
    ///
    /// A missing or unparseable file yields an empty catalog. Only I/O
    /// failures on an existing file are returned.
    pub fn open(config: Config) -> Result<Self> {
        let store = BookStore::from_config(&config);
        let books = store.load()?;

        tracing::debug!(
            "Opened catalog {} with {} books",
            store.path().display(),
            books.len()
        );

        Ok(Self {
            config,
            store,
            books,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified storage file
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.storage_path = path.to_path_buf();
        Self::open(config)
    }

    /// Execute a command
    ///
    /// Routes commands to the matching operation. A missing id becomes
    /// `Outcome::NotFound`; every other error is returned.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Add {
                title,
                author,
                year,
            } => self.add_book(title, author, year).map(Outcome::Added),
            Command::Remove { id } => {
                let Ok(book_id) = BookId::try_from(id) else {
                    return Ok(Outcome::NotFound(id));
                };
                match self.remove_book(book_id) {
                    Ok(book) => Ok(Outcome::Removed(book)),
                    Err(CatalogError::NotFound(_)) => Ok(Outcome::NotFound(id)),
                    Err(e) => Err(e),
                }
            }
            Command::Search { query } => Ok(Outcome::Matches(
                self.search(&query).into_iter().cloned().collect(),
            )),
            Command::List => {
                if self.books.is_empty() {
                    Ok(Outcome::Empty)
                } else {
                    Ok(Outcome::Listing(self.books.clone()))
                }
            }
            Command::UpdateStatus { id, status } => {
                let Ok(book_id) = BookId::try_from(id) else {
                    return Ok(Outcome::NotFound(id));
                };
                match self.update_status(book_id, status) {
                    Ok(book) => Ok(Outcome::StatusUpdated(book)),
                    Err(CatalogError::NotFound(_)) => Ok(Outcome::NotFound(id)),
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Add a book with the configured default status
    ///
    /// Steps:
    /// 1. Assign id = max existing id + 1 (1 for an empty catalog)
    /// 2. Append to the end of the catalog
    /// 3. Persist, dropping the book again if the write fails
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Result<Book> {
        let book = Book::new(
            self.next_id()?,
            title,
            author,
            year,
            self.config.default_status.clone(),
        );

        self.books.push(book.clone());
        if let Err(e) = self.save() {
            self.books.pop();
            return Err(e);
        }

        tracing::info!("Book added: {} (ID: {})", book.title, book.id);
        Ok(book)
    }

    /// Remove a book by id
    ///
    /// Returns the removed book, or `CatalogError::NotFound` with the
    /// catalog untouched. A failed write puts the book back in place.
    pub fn remove_book(&mut self, id: BookId) -> Result<Book> {
        let index = self.position(id).ok_or(CatalogError::NotFound(id))?;

        let book = self.books.remove(index);
        if let Err(e) = self.save() {
            self.books.insert(index, book);
            return Err(e);
        }

        tracing::info!("Book with ID {} removed", id);
        Ok(book)
    }

    /// Find a book by id
    pub fn find_by_id(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Search titles and authors (case-insensitive substring) and years
    /// (exact match), in catalog order
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let lowered = query.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.matches(query, &lowered))
            .collect()
    }

    /// All books in insertion order
    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    /// Replace a book's status verbatim
    ///
    /// Rejected with `CatalogError::InvalidStatus` only when the config
    /// restricts statuses.
    pub fn update_status(&mut self, id: BookId, status: impl Into<String>) -> Result<Book> {
        let status = status.into();
        let index = self.position(id).ok_or(CatalogError::NotFound(id))?;

        if !self.config.is_status_allowed(&status) {
            return Err(CatalogError::InvalidStatus(status));
        }

        let previous = std::mem::replace(&mut self.books[index].status, status);
        if let Err(e) = self.save() {
            self.books[index].status = previous;
            return Err(e);
        }

        let book = self.books[index].clone();
        tracing::info!("Status of book with ID {} updated to '{}'", id, book.status);
        Ok(book)
    }

    /// Write the whole catalog to the store
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.books)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Get the catalog file path
    pub fn storage_path(&self) -> &Path {
        self.store.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// max + 1, or `IdExhausted` when the largest id is `u64::MAX`
    fn next_id(&self) -> Result<BookId> {
        let max = self.books.iter().map(|book| book.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(CatalogError::IdExhausted(max))
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }
}
