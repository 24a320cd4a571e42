use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::types::token::{Claims, TokenError, TokenKind, TokenPair};

/// Issues and verifies the HS256-signed bearer tokens. Holds the
/// process-wide signing key; pure apart from reading the clock.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: i64,
    refresh_ttl: i64,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        TokenService {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: access_ttl_secs,
            refresh_ttl: refresh_ttl_secs,
        }
    }

    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self::new(&cfg.secret, cfg.access_ttl_secs, cfg.refresh_ttl_secs)
    }

    /// Mint an access + refresh pair for a user.
    pub fn issue(&self, user_id: Uuid) -> Result<TokenPair, TokenError> {
        let token = self.sign(user_id, TokenKind::Access, self.access_ttl)?;
        let refresh_token = self.sign(user_id, TokenKind::Refresh, self.refresh_ttl)?;
        Ok(TokenPair {
            token,
            refresh_token,
            expires_in: self.access_ttl,
            token_type: "bearer",
        })
    }

    fn sign(&self, user_id: Uuid, kind: TokenKind, ttl_secs: i64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            typ: kind,
            iat: now,
            exp: now + ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Issuance)
    }

    /// Validate signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenError::Malformed,
                _ => TokenError::Invalid,
            }
        })?;
        Ok(data.claims)
    }

    /// Like `verify`, but an unexpected `typ` claim is a failure.
    pub fn verify_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        if claims.typ != kind {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }
}
