// ============================
// diary-core/src/auth/token.rs
// ============================
//! Signed session tokens.
//!
//! Tokens are HS256 JWTs carrying the account id and an expiry instant,
//! so integrity and expiry are verifiable without a store lookup. There
//! is no refresh and no revocation list; a token stays valid until its
//! expiry passes.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Token TTL (time to live)
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7); // 7 days

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Owning account id.
    sub: String,
    /// Issued at (seconds since epoch).
    iat: i64,
    /// Expiration (seconds since epoch).
    exp: i64,
}

/// HS256 keys plus the configured token lifetime.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; the default 60s leeway would keep expired
        // tokens alive for a minute.
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            validation,
        }
    }

    /// Issue a fresh token bound to `account_id`.
    pub fn issue(&self, account_id: Uuid) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|err| {
            tracing::warn!(error = %err, "token signing failed");
            Error::Internal
        })
    }

    /// Validate signature and expiry, returning the bound account id.
    pub fn verify(&self, token: Option<&str>) -> Result<Uuid> {
        let token = match token {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(Error::MissingToken),
        };
        let data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => Error::ExpiredToken,
                    _ => Error::InvalidToken,
                }
            })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| Error::InvalidToken)
    }
}
