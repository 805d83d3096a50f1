//! Local decoding of the bearer credential.
//!
//! The backend issues JWTs. The console never verifies the signature; it
//! only reads the payload to learn when the credential expires so startup
//! can refresh it without a wasted round-trip.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("credential is not a three-part token")]
    Malformed,

    #[error("credential payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("credential payload is not a JSON claims object: {0}")]
    Claims(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the Unix epoch
    pub exp: Option<i64>,
    pub iat: Option<i64>,
    pub sub: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credential {
    raw: String,
    claims: Claims,
}

impl Credential {
    pub fn decode(raw: &str) -> Result<Self, TokenError> {
        let mut parts = raw.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };
        if payload.is_empty() {
            return Err(TokenError::Malformed);
        }

        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        let claims: Claims = serde_json::from_slice(&bytes)?;

        Ok(Self {
            raw: raw.to_string(),
            claims,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims
            .exp
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// A credential without an `exp` claim never expires locally; the
    /// server still has the final word.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.claims.exp {
            Some(exp) => exp < now.timestamp(),
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn subject(&self) -> Option<&str> {
        self.claims
            .sub
            .as_deref()
            .or(self.claims.id.as_deref())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build an unsigned JWT-shaped credential for tests.
    pub fn make_token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    pub fn token_expiring_in(secs: i64) -> String {
        let exp = Utc::now().timestamp() + secs;
        make_token(serde_json::json!({ "id": "admin-1", "exp": exp }))
    }
}
