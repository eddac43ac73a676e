//! Bookshelf CLI
//!
//! Runs the interactive menu, or a single catalog operation when a
//! subcommand is given.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use bookshelf::config::{JsonLayout, SaveMode};
use bookshelf::{Command, Config, Library, Menu, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// Bookshelf CLI
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Personal library catalog")]
#[command(version)]
struct Args {
    /// Catalog file
    #[arg(short, long, default_value = "books.json")]
    file: PathBuf,

    /// Only accept these statuses when updating (repeatable)
    #[arg(long = "allowed-status", value_name = "STATUS")]
    allowed_statuses: Vec<String>,

    /// Write the catalog on a single line
    #[arg(long)]
    compact: bool,

    /// Rewrite the catalog in place instead of via a temp file
    #[arg(long)]
    overwrite: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a book
    Add {
        /// Book title
        title: String,

        /// Book author
        author: String,

        /// Publication year
        #[arg(allow_negative_numbers = true)]
        year: i32,
    },

    /// Remove a book by ID
    Remove {
        /// The ID of the book
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Search by title, author or year
    Search {
        /// Text to look for
        query: String,
    },

    /// List every book
    List,

    /// Change a book's status
    Status {
        /// The ID of the book
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// The new status
        status: String,
    },

    /// Start the interactive menu (default)
    Menu,
}

impl Commands {
    /// The library command to run, or `None` for the interactive menu
    fn into_command(self) -> Option<Command> {
        match self {
            Commands::Add {
                title,
                author,
                year,
            } => Some(Command::Add {
                title,
                author,
                year,
            }),
            Commands::Remove { id } => Some(Command::Remove { id }),
            Commands::Search { query } => Some(Command::Search { query }),
            Commands::List => Some(Command::List),
            Commands::Status { id, status } => Some(Command::UpdateStatus { id, status }),
            Commands::Menu => None,
        }
    }
}

fn main() {
    // Initialize tracing/logging (stderr, so stdout stays for the menu)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,bookshelf=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    tracing::debug!("Bookshelf v{}", bookshelf::VERSION);

    let mut builder = Config::builder()
        .storage_path(&args.file)
        .json_layout(if args.compact {
            JsonLayout::Compact
        } else {
            JsonLayout::Pretty
        })
        .save_mode(if args.overwrite {
            SaveMode::Overwrite
        } else {
            SaveMode::AtomicRename
        });
    if !args.allowed_statuses.is_empty() {
        builder = builder.allowed_statuses(args.allowed_statuses);
    }
    let config = builder.build()?;

    let mut library = Library::open(config)?;

    let command = args.command.and_then(Commands::into_command);
    match command {
        Some(command) => {
            let outcome = library.execute(command)?;
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", outcome)?;
        }
        None => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            Menu::new(&mut library, stdin, stdout).run()?;
        }
    }

    Ok(())
}
