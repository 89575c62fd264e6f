//! Book Store Module
//!
//! CRUD over the `books` table plus the bulk archive-by-age routine.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::models::Book;
use crate::secrets::Clock;
use crate::store::SCHEMA_SQL;

const BOOK_COLUMNS: &str =
    "id, title, author, isbn, publisher, year, description, archived, validated_on";

// == Book Store ==
/// Persistence for books. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct BookStore {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl BookStore {
    // == Constructors ==
    /// Opens a pool for `url` and applies the schema.
    ///
    /// In-memory databases live only as long as their connection, so they are
    /// pinned to a single connection that never idles out.
    pub async fn connect(url: &str, max_connections: u32, clock: Arc<dyn Clock>) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(opts).await?;
        let store = Self::from_pool(pool, clock);
        store.migrate().await?;
        Ok(store)
    }

    /// A fresh, private in-memory store.
    pub async fn in_memory(clock: Arc<dyn Clock>) -> Result<Self> {
        Self::connect("sqlite::memory:", 1, clock).await
    }

    fn from_pool(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Creates the `books` table and its index if missing.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    // == Create ==
    /// Inserts `book` under a fresh UUID, discarding any id it carried.
    pub async fn create(&self, mut book: Book) -> Result<Book> {
        book.id = Uuid::new_v4().to_string();

        sqlx::query(&format!(
            "INSERT INTO books ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            BOOK_COLUMNS
        ))
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.publisher)
        .bind(book.year)
        .bind(&book.description)
        .bind(book.archived)
        .bind(book.validated_on)
        .execute(&self.pool)
        .await?;

        debug!(id = %book.id, "Book created");
        Ok(book)
    }

    // == Read ==
    /// Every book, in no particular order.
    pub async fn get_all(&self) -> Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books", BOOK_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = ?",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    // == Update ==
    /// Overwrites every field except the id with `updated`'s values.
    ///
    /// Returns the stored record, or `None` if no book has `id`.
    pub async fn update(&self, id: &str, updated: &Book) -> Result<Option<Book>> {
        let result = sqlx::query(
            "UPDATE books SET title = ?, author = ?, isbn = ?, publisher = ?, year = ?, \
             description = ?, archived = ?, validated_on = ? WHERE id = ?",
        )
        .bind(&updated.title)
        .bind(&updated.author)
        .bind(&updated.isbn)
        .bind(&updated.publisher)
        .bind(updated.year)
        .bind(&updated.description)
        .bind(updated.archived)
        .bind(updated.validated_on)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    // == Delete ==
    /// Removes the book with `id`, returning whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Removes every book.
    pub async fn purge(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        info!(removed = result.rows_affected(), "Books purged");
        Ok(result.rows_affected())
    }

    // == Count ==
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // == Archival ==
    /// Archives unarchived books published `threshold_years` or more years ago,
    /// stamped with the store clock's current time.
    pub async fn validate_and_archive_old_books(&self, threshold_years: i32) -> Result<u64> {
        self.validate_and_archive_old_books_at(threshold_years, self.clock.now())
            .await
    }

    /// Archives every book with `archived = false` and
    /// `year <= now.year() - threshold_years`, setting `validated_on = now` on
    /// each. The batch commits as one transaction; already archived books are
    /// left alone. Returns how many books were archived.
    ///
    /// The cutoff saturates at the `i32` bounds instead of overflowing.
    pub async fn validate_and_archive_old_books_at(
        &self,
        threshold_years: i32,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let cutoff_year = now.year().saturating_sub(threshold_years);

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE books SET archived = ?, validated_on = ? WHERE archived = 0 AND year <= ?",
        )
        .bind(true)
        .bind(now)
        .bind(cutoff_year)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let updated = result.rows_affected();
        debug!(cutoff_year, updated, "Archival batch committed");
        Ok(updated)
    }
}
