//! Book model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full book record from the books table
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request; all fields are mandatory
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Please add a book title"))]
    pub title: String,
    #[validate(length(min = 1, message = "Please add an author"))]
    pub author: String,
    #[validate(length(min = 1, message = "Please add a genre"))]
    pub genre: String,
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: f64,
}

/// Update book request; absent fields keep their stored value.
///
/// Presence is what matters, not truthiness: an explicit `price: 0` or an
/// empty string is applied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: Option<f64>,
}

impl UpdateBook {
    /// True when no field was provided at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.description.is_none()
            && self.price.is_none()
    }
}

/// Book search and pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct BookQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Case-insensitive substring match on title
    pub title: Option<String>,
    /// Case-insensitive substring match on author
    pub author: Option<String>,
    /// Case-insensitive substring match on genre
    pub genre: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_book_accepts_zero_price() {
        let book = CreateBook {
            title: "Free Sampler".to_string(),
            author: "Anon".to_string(),
            genre: "Fiction".to_string(),
            description: "A giveaway".to_string(),
            price: 0.0,
        };
        assert!(book.validate().is_ok());
    }

    #[test]
    fn create_book_rejects_negative_price() {
        let book = CreateBook {
            title: "Test Book".to_string(),
            author: "Author Name".to_string(),
            genre: "Fiction".to_string(),
            description: "A great book".to_string(),
            price: -1.0,
        };
        assert!(book.validate().is_err());
    }

    #[test]
    fn create_book_rejects_empty_title() {
        let book = CreateBook {
            title: String::new(),
            author: "Author Name".to_string(),
            genre: "Fiction".to_string(),
            description: "A great book".to_string(),
            price: 19.99,
        };
        assert!(book.validate().is_err());
    }

    #[test]
    fn update_book_validates_only_provided_fields() {
        let update = UpdateBook {
            title: None,
            author: None,
            genre: None,
            description: None,
            price: Some(24.99),
        };
        assert!(update.validate().is_ok());
        assert!(!update.is_empty());

        let update = UpdateBook {
            title: None,
            author: None,
            genre: None,
            description: None,
            price: Some(-5.0),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn update_book_detects_empty_request() {
        let update = UpdateBook {
            title: None,
            author: None,
            genre: None,
            description: None,
            price: None,
        };
        assert!(update.is_empty());
    }
}
