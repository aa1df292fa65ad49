//! JWT issuance and revocation.
//!
//! Access and refresh tokens are HS256 JWTs carrying a `token_type` claim.
//! Every refresh token is recorded in the outstanding token ledger so that
//! logout can revoke it; access tokens are short-lived and never recorded.

use campus_common::{AppError, AppResult, config::AuthConfig};
use campus_db::repositories::{IssuedToken, TokenRepository};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Kind of token, carried in the `token_type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    /// Unique token ID (UUID v4)
    pub jti: String,
    pub user_id: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// An access token with its refresh token.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Token service.
#[derive(Clone)]
pub struct TokenService {
    token_repo: TokenRepository,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenService {
    /// Create a new token service.
    #[must_use]
    pub fn new(token_repo: TokenRepository, config: &AuthConfig) -> Self {
        Self {
            token_repo,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_lifetime: Duration::seconds(config.access_token_lifetime_secs),
            refresh_lifetime: Duration::seconds(config.refresh_token_lifetime_secs),
        }
    }

    /// Mint an access token for an account.
    pub fn issue_access(&self, user_id: i64) -> AppResult<String> {
        self.sign(TokenType::Access, user_id).map(|(token, _)| token)
    }

    /// Mint an access and refresh token pair, recording the refresh token.
    pub async fn issue_pair(&self, user_id: i64) -> AppResult<TokenPair> {
        let access = self.issue_access(user_id)?;
        let (refresh, claims) = self.sign(TokenType::Refresh, user_id)?;

        self.token_repo
            .record_outstanding(issued_token(&refresh, &claims)?)
            .await?;

        Ok(TokenPair { access, refresh })
    }

    /// Decode a token and check its signature, expiry and type.
    pub fn decode(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;
        if claims.token_type != expected {
            return Err(AppError::InvalidToken("Token has wrong type".to_string()));
        }
        Ok(claims)
    }

    /// Decode a refresh token and make sure it has not been revoked.
    pub async fn verify_refresh(&self, token: &str) -> AppResult<Claims> {
        let claims = self.decode(token, TokenType::Refresh)?;

        if self.token_repo.is_blacklisted(&claims.jti).await? {
            warn!(user_id = claims.user_id, jti = %claims.jti, "Blacklisted refresh token presented");
            return Err(AppError::InvalidToken("Token is blacklisted".to_string()));
        }
        Ok(claims)
    }

    /// Revoke a refresh token.
    pub async fn blacklist(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_refresh(token).await?;
        self.token_repo
            .blacklist(issued_token(token, &claims)?)
            .await?;
        Ok(claims)
    }

    fn sign(&self, token_type: TokenType, user_id: i64) -> AppResult<(String, Claims)> {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => self.access_lifetime,
            TokenType::Refresh => self.refresh_lifetime,
        };

        let claims = Claims {
            token_type,
            jti: uuid::Uuid::new_v4().simple().to_string(),
            user_id,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok((token, claims))
    }
}

fn issued_token(token: &str, claims: &Claims) -> AppResult<IssuedToken> {
    let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
        .ok_or_else(|| AppError::InvalidToken("Token is invalid or expired".to_string()))?;

    Ok(IssuedToken {
        jti: claims.jti.clone(),
        user_id: Some(claims.user_id),
        token: token.to_string(),
        expires_at: expires_at.into(),
    })
}
