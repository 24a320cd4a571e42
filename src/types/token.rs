use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Discriminates the two halves of a token pair. An access token never
/// authorizes a refresh and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub typ: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// What a successful login hands back. Not persisted anywhere; the
/// claims are the only link between a token and its user.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: &'static str,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Issuance(#[source] jsonwebtoken::errors::Error),
}

impl From<TokenError> for crate::types::error::AppError {
    fn from(e: TokenError) -> Self {
        use crate::types::error::AppError;
        match e {
            TokenError::Expired => AppError::TokenExpired,
            TokenError::Issuance(e) => {
                log::error!("jwt signing failed: {e}");
                AppError::TokenIssuance
            }
            TokenError::Invalid | TokenError::Malformed => AppError::Unauthenticated,
        }
    }
}
