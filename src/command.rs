//! Command Module
//!
//! Requests to a Library and their structured results.
//!
//! ### Commands
//! - Add:          title, author, year
//! - Remove:       id
//! - Search:       query
//! - List:         no arguments
//! - UpdateStatus: id, status
//!
//! ### Outcomes
//! - Added / Removed / StatusUpdated: the affected book
//! - NotFound: the id that matched nothing
//! - Matches: search results, possibly empty
//! - Listing / Empty: the whole catalog, split so an empty library is never
//!   confused with a search that found nothing

use std::fmt;

use crate::book::Book;

/// A request to a Library
///
/// Ids are signed since they usually come from text input. A negative id
/// can never match a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new book
    Add {
        title: String,
        author: String,
        year: i32,
    },

    /// Remove a book by id
    Remove { id: i64 },

    /// Search titles, authors and years
    Search { query: String },

    /// List every book
    List,

    /// Replace a book's status
    UpdateStatus { id: i64, status: String },
}

/// The result of executing a Command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Book),

    Removed(Book),

    StatusUpdated(Book),

    /// No book has this id
    NotFound(i64),

    /// Search results in catalog order
    Matches(Vec<Book>),

    /// Every book in catalog order, never empty
    Listing(Vec<Book>),

    /// The catalog holds no books
    Empty,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added(book) => write!(f, "Book added: {} (ID: {})", book.title, book.id),
            Outcome::Removed(book) => write!(f, "Book with ID {} removed.", book.id),
            Outcome::StatusUpdated(book) => write!(
                f,
                "Status of book with ID {} updated to '{}'.",
                book.id, book.status
            ),
            Outcome::NotFound(id) => write!(f, "Book with ID {} not found.", id),
            Outcome::Matches(books) if books.is_empty() => write!(f, "No books found."),
            Outcome::Matches(books) | Outcome::Listing(books) => write_lines(f, books),
            Outcome::Empty => write!(f, "The library is empty."),
        }
    }
}

/// One book per line, no trailing newline
fn write_lines(f: &mut fmt::Formatter<'_>, books: &[Book]) -> fmt::Result {
    for (i, book) in books.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}", book)?;
    }
    Ok(())
}
