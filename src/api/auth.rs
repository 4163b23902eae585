//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::user::{AuthResponse, LoginRequest, RegisterRequest},
    AppState,
};

use super::ValidatedJson;

/// Register a new user
///
/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let response = state
        .services
        .auth
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate a user
///
/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state
        .services
        .auth
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(response))
}
