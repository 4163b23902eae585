//! API handlers for Bookshelf REST endpoints

pub mod auth;
pub mod books;
pub mod health;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::{error::AppError, models::user::Claims, AppState};

/// Extractor for the authenticated user from a JWT bearer token.
///
/// Runs before the body is read, so mutating routes reject missing or
/// invalid tokens regardless of body validity.
pub struct AuthenticatedUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = Claims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::Authentication("Not authorized, token failed".to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// JSON body extractor that turns deserialization and validation failures
/// into 400 responses surfacing the first offending field.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(first_violation(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Query-string extractor that reports malformed parameters with the same
/// `{message}` JSON envelope as every other failure.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        Ok(ApiQuery(value))
    }
}

/// Report only the first violated field, never an aggregate
fn first_violation(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .next()
        .and_then(|(field, field_errors)| {
            field_errors.first().map(|e| match e.message {
                Some(ref message) => message.to_string(),
                None => format!("Invalid value for field '{}'", field),
            })
        })
        .unwrap_or_else(|| "Invalid request body".to_string())
}
