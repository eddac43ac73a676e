//! Interactive Menu
//!
//! The text loop driving a Library: six numbered actions, fields read one
//! prompt at a time.
//!
//! ```text
//! Menu:
//! 1. Add book
//! 2. Remove book
//! 3. Search books
//! 4. List all books
//! 5. Update book status
//! 6. Exit
//! ```
//!
//! An unknown choice re-prompts. A non-numeric id or year re-prompts for the
//! same field instead of ending the session. End of input ends the session
//! like choice 6.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::command::{Command, Outcome};
use crate::config::{CHECKED_OUT_STATUS, DEFAULT_STATUS};
use crate::error::{CatalogError, Result};
use crate::library::Library;

/// Whether the loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Runs the interactive session over any line reader and writer
pub struct Menu<'a, R, W> {
    /// The catalog being edited
    library: &'a mut Library,

    /// Line-oriented user input
    input: R,

    /// Prompts and results
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a menu over the given library and streams
    pub fn new(library: &'a mut Library, input: R, output: W) -> Self {
        Self {
            library,
            input,
            output,
        }
    }

    /// Run the session (blocking until exit or end of input)
    ///
    /// Storage failures end the session with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("Enter action number: ")? else {
                tracing::debug!("Input closed, leaving menu");
                return Ok(());
            };

            let step = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.remove()?,
                "3" => self.search()?,
                "4" => self.list()?,
                "5" => self.update_status()?,
                "6" => {
                    writeln!(self.output, "Goodbye.")?;
                    Step::Exit
                }
                _ => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please pick an action from the menu."
                    )?;
                    Step::Continue
                }
            };

            if step == Step::Exit {
                return Ok(());
            }
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn add(&mut self) -> Result<Step> {
        let Some(title) = self.prompt("Enter book title: ")? else {
            return Ok(Step::Exit);
        };
        let Some(author) = self.prompt("Enter book author: ")? else {
            return Ok(Step::Exit);
        };
        let Some(year) = self.prompt_number::<i32>("Enter publication year: ")? else {
            return Ok(Step::Exit);
        };

        self.execute(Command::Add {
            title,
            author,
            year,
        })
    }

    fn remove(&mut self) -> Result<Step> {
        let Some(id) = self.prompt_number::<i64>("Enter ID of the book to remove: ")? else {
            return Ok(Step::Exit);
        };

        self.execute(Command::Remove { id })
    }

    fn search(&mut self) -> Result<Step> {
        let Some(query) = self.prompt("Enter search query (title, author or year): ")? else {
            return Ok(Step::Exit);
        };

        self.execute(Command::Search { query })
    }

    fn list(&mut self) -> Result<Step> {
        self.execute(Command::List)
    }

    fn update_status(&mut self) -> Result<Step> {
        let Some(id) = self.prompt_number::<i64>("Enter ID of the book to update: ")? else {
            return Ok(Step::Exit);
        };
        let label = format!(
            "Enter new status ('{}' or '{}'): ",
            DEFAULT_STATUS, CHECKED_OUT_STATUS
        );
        let Some(status) = self.prompt(&label)? else {
            return Ok(Step::Exit);
        };

        self.execute(Command::UpdateStatus { id, status })
    }

    /// Run a command and print its outcome
    fn execute(&mut self, command: Command) -> Result<Step> {
        let outcome: Outcome = match self.library.execute(command) {
            Ok(outcome) => outcome,
            Err(CatalogError::InvalidStatus(status)) => {
                writeln!(self.output, "Status '{}' is not allowed.", status)?;
                return Ok(Step::Continue);
            }
            Err(e) => {
                tracing::warn!("Menu action failed: {}", e);
                return Err(e);
            }
        };

        writeln!(self.output, "{}", outcome)?;
        Ok(Step::Continue)
    }

    // =========================================================================
    // Input Helpers
    // =========================================================================

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Menu:")?;
        writeln!(self.output, "1. Add book")?;
        writeln!(self.output, "2. Remove book")?;
        writeln!(self.output, "3. Search books")?;
        writeln!(self.output, "4. List all books")?;
        writeln!(self.output, "5. Update book status")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    /// Print a label and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until the line parses as a number; `None` at end of input
    fn prompt_number<T: FromStr>(&mut self, label: &str) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    writeln!(self.output, "'{}' is not a number. Please try again.", line)?;
                }
            }
        }
    }
}
