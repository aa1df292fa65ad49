//! Authentication service: login, signup, logout and token refresh.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use campus_common::{AppError, AppResult};
use campus_db::{entities::account, repositories::AccountRepository};
use chrono::Utc;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use validator::{Validate, ValidateEmail};

use super::token::{TokenService, TokenType};

/// Input for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Input for creating an account.
///
/// Every field is optional on the wire so that a missing field produces the
/// same validation error as an empty one.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(length(max = 150))]
    pub username: Option<String>,
    #[validate(length(max = 128))]
    pub password: Option<String>,
    #[validate(length(max = 254))]
    pub email: Option<String>,
}

/// Public part of an account returned with issued tokens.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&account::Model> for UserSummary {
    fn from(account: &account::Model) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
        }
    }
}

/// Token pair plus the account it was issued for.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserSummary,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    account_repo: AccountRepository,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub const fn new(account_repo: AccountRepository, token_service: TokenService) -> Self {
        Self {
            account_repo,
            token_service,
        }
    }

    /// Check credentials and issue a token pair.
    ///
    /// Unknown usernames, wrong passwords and inactive accounts all fail with
    /// the same error.
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthResponse> {
        let Some(account) = self.account_repo.find_by_username(&input.username).await? else {
            debug!(username = %input.username, "Login for unknown username");
            return Err(AppError::InvalidCredentials);
        };

        if !account.is_active || !verify_password(&input.password, &account.password) {
            debug!(user_id = account.id, "Login rejected");
            return Err(AppError::InvalidCredentials);
        }

        self.account_repo.touch_last_login(account.id).await?;
        let pair = self.token_service.issue_pair(account.id).await?;

        info!(user_id = account.id, "User logged in");

        Ok(AuthResponse {
            access: pair.access,
            refresh: pair.refresh,
            user: UserSummary::from(&account),
        })
    }

    /// Create an account with a default profile and issue a token pair.
    pub async fn signup(&self, input: SignupInput) -> AppResult<AuthResponse> {
        input.validate()?;

        let username = input.username.unwrap_or_default();
        let password = input.password.unwrap_or_default();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "username and password are required".to_string(),
            ));
        }

        let email = input.email.unwrap_or_default();
        if !email.is_empty() && !email.validate_email() {
            return Err(AppError::Validation("Enter a valid email address.".to_string()));
        }

        let model = account::ActiveModel {
            username: Set(username),
            password: Set(hash_password(&password)?),
            email: Set(email),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            is_active: Set(true),
            is_staff: Set(false),
            is_superuser: Set(false),
            last_login: Set(None),
            date_joined: Set(Utc::now().into()),
            ..Default::default()
        };

        let (account, _profile) = self.account_repo.create_with_profile(model).await?;
        let pair = self.token_service.issue_pair(account.id).await?;

        info!(user_id = account.id, username = %account.username, "Account created");

        Ok(AuthResponse {
            access: pair.access,
            refresh: pair.refresh,
            user: UserSummary::from(&account),
        })
    }

    /// Revoke a refresh token.
    ///
    /// Any problem with the token itself is reported as a validation error,
    /// including a token that was already revoked.
    pub async fn logout(&self, refresh: Option<String>) -> AppResult<()> {
        let refresh = refresh
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Validation("refresh token is required".to_string()))?;

        match self.token_service.blacklist(&refresh).await {
            Ok(claims) => {
                info!(user_id = claims.user_id, "User logged out");
                Ok(())
            }
            Err(AppError::InvalidToken(reason) | AppError::Validation(reason)) => {
                debug!(%reason, "Logout with unusable refresh token");
                Err(AppError::Validation("Invalid refresh token".to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Mint a new access token from a live refresh token.
    pub async fn refresh(&self, refresh: &str) -> AppResult<String> {
        let claims = self.token_service.verify_refresh(refresh).await?;
        self.token_service.issue_access(claims.user_id)
    }

    /// Resolve a bearer access token to an active account.
    pub async fn authenticate_access_token(&self, token: &str) -> AppResult<account::Model> {
        let claims = self.token_service.decode(token, TokenType::Access)?;

        match self.account_repo.find_by_id(claims.user_id).await? {
            Some(account) if account.is_active => Ok(account),
            _ => Err(AppError::InvalidToken("User not found".to_string())),
        }
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
///
/// A stored hash that cannot be parsed never matches.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Stored password hash is unusable");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
