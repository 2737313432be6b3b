//! PASETO makers and the claims mapping they share.
//!
//! Claims are the registered PASETO claims: `jti` carries the payload id,
//! `sub` the username, `iat`/`nbf`/`exp` RFC 3339 timestamps at second
//! precision.

use std::fmt::Display;

use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use rusty_paseto::prelude::*;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::TokenFailure;
use crate::{MakerError, Payload, Scheme};

/// Build a token for `$payload` with the claims every PASETO maker embeds.
/// Expands inside a function returning `Result<String, MakerError>`.
macro_rules! seal_with {
    ($version:ty, $purpose:ty, $payload:expr, $key:expr) => {{
        let claims = $crate::paseto::ClaimStrings::from($payload);
        let issued_at = IssuedAtClaim::try_from(claims.issued_at.as_str())
            .map_err($crate::paseto::encoding_error)?;
        let not_before = NotBeforeClaim::try_from(claims.issued_at.as_str())
            .map_err($crate::paseto::encoding_error)?;
        let expiration = ExpirationClaim::try_from(claims.expired_at.as_str())
            .map_err($crate::paseto::encoding_error)?;

        PasetoBuilder::<$version, $purpose>::default()
            .set_claim(TokenIdentifierClaim::from(claims.id.as_str()))
            .set_claim(SubjectClaim::from(claims.username.as_str()))
            .set_claim(issued_at)
            .set_claim(not_before)
            .set_claim(expiration)
            .build($key)
            .map_err($crate::paseto::encoding_error)
    }};
}

/// Parse and authenticate `$token`, then rebuild its payload. Bodies shorter
/// than `$min_body` bytes never reach the parser.
macro_rules! open_with {
    ($version:ty, $purpose:ty, $token:expr, $key:expr, $scheme:expr, $min_body:expr) => {{
        $crate::paseto::ensure_body_len($scheme, $token, $min_body)?;
        let claims = PasetoParser::<$version, $purpose>::default()
            .parse($token, $key)
            .map_err(|e| $crate::error::classify($scheme, e))?;
        $crate::paseto::payload_from_claims(claims)
    }};
}

mod local;
mod public;

pub use local::{PasetoV2Local, PasetoV3Local};
pub use public::{PasetoV2Public, PasetoV3Public};

/// Payload fields rendered the way PASETO claims expect them.
struct ClaimStrings {
    id: String,
    username: String,
    issued_at: String,
    expired_at: String,
}

impl From<&Payload> for ClaimStrings {
    fn from(payload: &Payload) -> Self {
        Self {
            id: payload.id().to_string(),
            username: payload.username().to_string(),
            issued_at: payload
                .issued_at()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            expired_at: payload
                .expired_at()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// The subset of a parsed token's claims a payload is rebuilt from.
#[derive(Debug, Deserialize)]
struct ParsedClaims {
    jti: String,
    sub: String,
    iat: String,
    exp: String,
}

fn payload_from_claims(claims: serde_json::Value) -> Result<Payload, MakerError> {
    let claims: ParsedClaims =
        serde_json::from_value(claims).map_err(|_| MakerError::InvalidToken)?;

    let id = Uuid::parse_str(&claims.jti).map_err(|_| MakerError::InvalidToken)?;
    let issued_at = parse_time(&claims.iat)?;
    let expired_at = parse_time(&claims.exp)?;

    Ok(Payload::from_claims(id, claims.sub, issued_at, expired_at))
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, MakerError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| MakerError::InvalidToken)
}

/// Reject a token whose decoded body is too short to hold what its format
/// puts around the claims (nonce and tag, or signature).
fn ensure_body_len(scheme: Scheme, token: &str, min_len: usize) -> Result<(), MakerError> {
    let body = scheme
        .paseto_header()
        .and_then(|header| token.strip_prefix(header))
        .ok_or(MakerError::InvalidToken)?;
    let body = body.split_once('.').map_or(body, |(body, _footer)| body);

    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(body)
        .map_err(|_| MakerError::InvalidToken)?;
    if decoded.len() <= min_len {
        debug!(scheme = %scheme, len = decoded.len(), "Token body too short");
        return Err(MakerError::InvalidToken);
    }
    Ok(())
}

fn encoding_error(err: impl Display) -> MakerError {
    MakerError::Encoding(err.to_string())
}

/// Decode a hex key of exactly `N` bytes. The error is a reason, without
/// any of the key material.
fn decode_key<const N: usize>(key_hex: &str) -> Result<Key<N>, String> {
    let bytes = hex::decode(key_hex).map_err(|_| "is not valid hex".to_string())?;
    let bytes: [u8; N] = bytes
        .try_into()
        .map_err(|_| format!("must be {N} bytes long"))?;
    Ok(Key::from(&bytes))
}

impl TokenFailure for GenericParserError {
    fn is_expiry(&self) -> bool {
        matches!(
            self,
            GenericParserError::ClaimError {
                source: PasetoClaimError::Expired
            }
        )
    }
}

impl TokenFailure for pasetors::errors::Error {
    fn is_expiry(&self) -> bool {
        matches!(
            self,
            pasetors::errors::Error::ClaimValidation(pasetors::errors::ClaimValidationError::Exp)
        )
    }
}
