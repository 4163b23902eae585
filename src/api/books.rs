//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    AppState,
};

use super::{ApiQuery, AuthenticatedUser, ValidatedJson};

/// Paginated search response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List books with search filters and pagination
///
/// `GET /api/books` — public
pub async fn list_books(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BookQuery>,
) -> AppResult<Json<BookListResponse>> {
    let page = state.services.books.list(&query).await?;

    Ok(Json(BookListResponse {
        books: page.books,
        total_pages: page.total_pages,
        current_page: page.current_page,
    }))
}

/// Get a single book
///
/// `GET /api/books/:id` — public
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(&id).await?;
    Ok(Json(book))
}

/// Create a new book
///
/// `POST /api/books` — requires a bearer token
pub async fn create_book(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(book): ValidatedJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book; absent fields keep their stored value
///
/// `PUT /api/books/:id` — requires a bearer token
pub async fn update_book(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update(&id, update).await?;
    Ok(Json(updated))
}

/// Delete a book
///
/// `DELETE /api/books/:id` — requires a bearer token
pub async fn delete_book(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Book removed".to_string(),
    }))
}
