//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// Clamp the requested page to 1 or more
fn normalize_page(page: Option<i64>) -> i64 {
    page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE)
}

/// Clamp the requested page size to a positive value
fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT)
}

/// ceil(count / limit); zero matches means zero pages.
///
/// Division first: `count + limit - 1` would overflow for a well-formed
/// request carrying a huge limit.
fn total_pages(count: i64, limit: i64) -> i64 {
    count / limit + i64::from(count % limit != 0)
}

/// Offset of the requested page slice. Saturates instead of wrapping for
/// extreme page numbers; an offset past the end just yields an empty page.
fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

/// Resolve a path identifier. Anything that is not a well-formed id cannot
/// match a record, so it is "not found" rather than a client or server fault.
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Book not found".to_string()))
}

/// A page of search results
#[derive(Debug)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with filters and pagination
    pub async fn list(&self, query: &BookQuery) -> AppResult<BookPage> {
        let page = normalize_page(query.page);
        let limit = normalize_limit(query.limit);
        let offset = page_offset(page, limit);

        let (books, total) = self.repository.books.search(query, limit, offset).await?;

        Ok(BookPage {
            books,
            total_pages: total_pages(total, limit),
            current_page: page,
        })
    }

    /// Get a book by its identifier
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(parse_id(id)?).await
    }

    /// Create a new book
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = created.id, "Created book");
        Ok(created)
    }

    /// Merge the provided fields over an existing book
    pub async fn update(&self, id: &str, update: UpdateBook) -> AppResult<Book> {
        let id = parse_id(id)?;

        // Nothing to merge; report the current record without touching
        // updated_at.
        if update.is_empty() {
            return self.repository.books.get_by_id(id).await;
        }

        self.repository.books.update(id, &update).await
    }

    /// Delete a book permanently
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Deleted book");
        Ok(())
    }
}
