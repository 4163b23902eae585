//! Books repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, description, price, created_at, updated_at";

/// Escape LIKE pattern metacharacters so filter text is matched literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Append the optional substring filters to a WHERE clause.
///
/// Shared between the count and the page queries so both always see the
/// same result set.
fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a BookQuery) {
    if let Some(ref title) = query.title {
        builder
            .push(" AND title ILIKE ")
            .push_bind(format!("%{}%", escape_like(title)));
    }
    if let Some(ref author) = query.author {
        builder
            .push(" AND author ILIKE ")
            .push_bind(format!("%{}%", escape_like(author)));
    }
    if let Some(ref genre) = query.genre {
        builder
            .push(" AND genre ILIKE ")
            .push_bind(format!("%{}%", escape_like(genre)));
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search books with optional filters and pagination.
    ///
    /// Returns the requested page slice in insertion order plus the total
    /// match count. A page past the end yields an empty slice, not an error.
    pub async fn search(&self, query: &BookQuery, limit: i64, offset: i64) -> AppResult<(Vec<Book>, i64)> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM books WHERE 1=1");
        push_filters(&mut count_builder, query);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut select_builder =
            QueryBuilder::new(format!("SELECT {} FROM books WHERE 1=1", BOOK_COLUMNS));
        push_filters(&mut select_builder, query);
        select_builder
            .push(" ORDER BY id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let books = select_builder
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Get a book by id
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Insert a new book and return the persisted record
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, description, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.description)
        .bind(book.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Merge the provided fields over an existing book.
    ///
    /// COALESCE keeps the stored value for every column bound as NULL, so
    /// only fields present in the request change. Single-statement
    /// read-modify-write; concurrent updates are last-writer-wins.
    pub async fn update(&self, id: i32, update: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books SET
                title = COALESCE($1, title),
                author = COALESCE($2, author),
                genre = COALESCE($3, genre),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                updated_at = now()
            WHERE id = $6
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(update.title.as_deref())
        .bind(update.author.as_deref())
        .bind(update.genre.as_deref())
        .bind(update.description.as_deref())
        .bind(update.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Remove a book permanently
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        Ok(())
    }
}
