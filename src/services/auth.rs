//! Registration, login and token issuance

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{AuthResponse, Claims, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user and issue a token for the fresh identity
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<AuthResponse> {
        if self.repository.users.email_exists(email).await? {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = self.hash_password(password)?;
        let user = self
            .repository
            .users
            .create(name, email, &password_hash)
            .await?;

        tracing::info!(user_id = user.id, "Registered new user");

        let token = self.issue_token(user.id)?;
        Ok(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }

    /// Authenticate by email and password.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response never reveals whether the account exists.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let user = self
            .repository
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let token = self.issue_token(user.id)?;
        Ok(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }

    /// Create a signed token with the configured expiry window
    fn issue_token(&self, user_id: i32) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + self.config.jwt_expiration_days * 24 * 3600;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Hash a password with a random per-record salt
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against the stored hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
