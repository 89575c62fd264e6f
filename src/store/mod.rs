//! Store Module
//!
//! SQLite-backed persistence for books, including the archival routine.

mod book_store;


// Re-export public types
pub use book_store::BookStore;

// == Public Constants ==
/// Default age, in years, past which a book is archived
pub const DEFAULT_ARCHIVE_THRESHOLD_YEARS: i32 = 10;

/// Schema applied by `BookStore::migrate`. Length limits mirror the catalogue's
/// column sizes; violations surface as database errors.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id           TEXT PRIMARY KEY NOT NULL,
    title        TEXT NOT NULL CHECK (length(title) <= 255),
    author       TEXT NOT NULL CHECK (length(author) <= 255),
    isbn         TEXT NOT NULL DEFAULT '' CHECK (length(isbn) <= 20),
    publisher    TEXT NOT NULL DEFAULT '' CHECK (length(publisher) <= 255),
    year         INTEGER NOT NULL,
    description  TEXT NOT NULL DEFAULT '' CHECK (length(description) <= 1000),
    archived     INTEGER NOT NULL DEFAULT 0,
    validated_on TEXT
);
CREATE INDEX IF NOT EXISTS idx_books_archived_year ON books (archived, year);
"#;
