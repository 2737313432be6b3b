//! JWT makers and the claims mapping they share.

mod eddsa;
mod hmac;

pub use eddsa::JwtEdDsaMaker;
pub use hmac::{JwtMaker, MIN_SECRET_KEY_SIZE};

use chrono::DateTime;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TokenFailure, classify};
use crate::{MakerError, Payload, Scheme};

/// JWT claims for a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// JWT ID (payload id)
    jti: String,
    /// Subject (username)
    sub: String,
    /// Issued at (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
}

impl From<&Payload> for Claims {
    fn from(payload: &Payload) -> Self {
        Self {
            jti: payload.id().to_string(),
            sub: payload.username().to_string(),
            iat: payload.issued_at().timestamp(),
            exp: payload.expired_at().timestamp(),
        }
    }
}

impl TryFrom<Claims> for Payload {
    type Error = MakerError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.jti).map_err(|_| MakerError::InvalidToken)?;
        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(MakerError::InvalidToken)?;
        let expired_at = DateTime::from_timestamp(claims.exp, 0).ok_or(MakerError::InvalidToken)?;
        Ok(Payload::from_claims(id, claims.sub, issued_at, expired_at))
    }
}

impl TokenFailure for jsonwebtoken::errors::Error {
    fn is_expiry(&self) -> bool {
        matches!(self.kind(), ErrorKind::ExpiredSignature)
    }
}

/// Sign `payload` with `algorithm`.
fn encode(algorithm: Algorithm, payload: &Payload, key: &EncodingKey) -> Result<String, MakerError> {
    jsonwebtoken::encode(&Header::new(algorithm), &Claims::from(payload), key)
        .map_err(|e| MakerError::Encoding(e.to_string()))
}

/// Verify a token signed with `algorithm` and rebuild its payload.
///
/// Only `algorithm` is accepted. Expiry is left to [`Payload::valid`], so the
/// library does not check `exp` here, only that it is present. A token
/// without `jti` has no id to rebuild and is rejected.
fn decode(
    scheme: Scheme,
    algorithm: Algorithm,
    token: &str,
    key: &DecodingKey,
) -> Result<Payload, MakerError> {
    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp", "iat", "sub"]);

    let token_data = jsonwebtoken::decode::<Claims>(token, key, &validation)
        .map_err(|e| classify(scheme, e))?;

    Payload::try_from(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_claims_from_payload() {
        let payload = Payload::new("alice", TimeDelta::hours(1)).unwrap();
        let claims = Claims::from(&payload);

        assert_eq!(claims.jti, payload.id().to_string());
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_claims_with_bad_id_rejected() {
        let claims = Claims {
            jti: "not-a-uuid".to_string(),
            sub: "alice".to_string(),
            iat: 0,
            exp: 0,
        };
        assert_eq!(Payload::try_from(claims), Err(MakerError::InvalidToken));
    }

    #[test]
    fn test_expired_signature_is_expiry() {
        let err = jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature);
        assert!(err.is_expiry());
        let err = jsonwebtoken::errors::Error::from(ErrorKind::InvalidSignature);
        assert!(!err.is_expiry());
    }
}
