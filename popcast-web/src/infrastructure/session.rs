use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::account::SessionIdentity;

pub(crate) const SESSION_COOKIE: &str = "popcast_session";

#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error("session encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("session decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

/// Signed content of the session cookie.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionClaims {
    /// Admin id.
    pub(crate) sub: String,
    pub(crate) username: String,
    pub(crate) is_super_admin: bool,
    /// Backend bearer token.
    pub(crate) access_token: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

impl SessionClaims {
    /// The backend still accepts the bearer token carried by this session.
    pub(crate) fn has_live_token(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && !access_token_expired(&self.access_token, now)
    }

    /// Admin privileges need a live backend token and the super-admin flag.
    pub(crate) fn is_admin(&self, now: DateTime<Utc>) -> bool {
        self.is_super_admin && self.has_live_token(now)
    }
}

pub(crate) struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl SessionService {
    const DEFAULT_TTL_SECONDS: i64 = 4 * 60 * 60;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub(crate) fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub(crate) fn issue(&self, identity: &SessionIdentity) -> Result<String, SessionError> {
        self.issue_at(identity, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        identity: &SessionIdentity,
        now: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let claims = SessionClaims {
            sub: identity.admin_id.clone(),
            username: identity.username.clone(),
            is_super_admin: identity.is_super_admin,
            access_token: identity.access_token.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(SessionError::Encode)
    }

    pub(crate) fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(SessionError::Decode)?;

        Ok(token_data.claims)
    }
}

#[derive(Debug, Deserialize)]
struct BackendTokenClaims {
    exp: Option<i64>,
}

/// Reads `exp` from the backend bearer token without checking its signature.
///
/// A token without `exp` never expires here; one that cannot be decoded counts
/// as expired.
pub(crate) fn access_token_expired(token: &str, now: DateTime<Utc>) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    match decode::<BackendTokenClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data
            .claims
            .exp
            .is_some_and(|exp| exp <= now.timestamp()),
        Err(_) => true,
    }
}
