//! Asymmetric (`public`) PASETO makers.
//!
//! `v2.public` is signed through `rusty_paseto`, `v3.public` through
//! `pasetors`. Both check their key material with the curve crates at
//! construction, so a maker that builds can always sign.

use pasetors::claims::{Claims, ClaimsValidationRules};
use pasetors::keys::{AsymmetricPublicKey, AsymmetricSecretKey};
use pasetors::token::UntrustedToken;
use pasetors::version3::{self, PublicToken};
use rusty_paseto::prelude::*;

use super::{ClaimStrings, decode_key, encoding_error, ensure_body_len, payload_from_claims};
use crate::error::classify;
use crate::maker::Backend;
use crate::{MakerError, Payload, Scheme};

/// Ed25519 signature length.
const V2_SIGNATURE_SIZE: usize = 64;
/// P-384 signature length (`r || s`).
const V3_SIGNATURE_SIZE: usize = 96;

fn private_key_error(e: impl std::fmt::Display) -> MakerError {
    MakerError::InvalidKey(format!("could not initialize private asymmetric key: {e}"))
}

fn public_key_error(e: impl std::fmt::Display) -> MakerError {
    MakerError::InvalidKey(format!("could not initialize public asymmetric key: {e}"))
}

/// Signs and verifies `v2.public` tokens with Ed25519.
pub struct PasetoV2Public {
    private_key: Key<64>,
    public_key: Key<32>,
}

impl PasetoV2Public {
    /// Create a maker from a hex-encoded 64-byte private key (seed followed
    /// by its public half) and a hex-encoded 32-byte public key.
    pub fn new(private_key_hex: &str, public_key_hex: &str) -> Result<Self, MakerError> {
        let private_key = decode_key::<64>(private_key_hex).map_err(private_key_error)?;
        ed25519_dalek::SigningKey::from_keypair_bytes(&private_key).map_err(private_key_error)?;

        let public_key = decode_key::<32>(public_key_hex).map_err(public_key_error)?;
        ed25519_dalek::VerifyingKey::from_bytes(&public_key).map_err(public_key_error)?;

        Ok(Self {
            private_key,
            public_key,
        })
    }
}

impl Backend for PasetoV2Public {
    const SCHEME: Scheme = Scheme::PasetoV2Public;

    fn seal(&self, payload: &Payload) -> Result<String, MakerError> {
        let private_key = PasetoAsymmetricPrivateKey::<V2, Public>::from(&self.private_key);
        seal_with!(V2, Public, payload, &private_key)
    }

    fn open(&self, token: &str) -> Result<Payload, MakerError> {
        let public_key = PasetoAsymmetricPublicKey::<V2, Public>::from(&self.public_key);
        open_with!(V2, Public, token, &public_key, Self::SCHEME, V2_SIGNATURE_SIZE)
    }
}

/// Signs and verifies `v3.public` tokens with ECDSA over P-384.
pub struct PasetoV3Public {
    secret_key: AsymmetricSecretKey<version3::V3>,
    public_key: AsymmetricPublicKey<version3::V3>,
}

impl PasetoV3Public {
    /// Create a maker from a hex-encoded 48-byte secret scalar and a
    /// hex-encoded 49-byte compressed public point.
    pub fn new(private_key_hex: &str, public_key_hex: &str) -> Result<Self, MakerError> {
        let private_key = decode_key::<48>(private_key_hex).map_err(private_key_error)?;
        p384::SecretKey::from_slice(private_key.as_slice()).map_err(private_key_error)?;
        let secret_key = AsymmetricSecretKey::<version3::V3>::from(private_key.as_slice())
            .map_err(private_key_error)?;

        let public_key = decode_key::<49>(public_key_hex).map_err(public_key_error)?;
        p384::PublicKey::from_sec1_bytes(public_key.as_slice()).map_err(public_key_error)?;
        let public_key = AsymmetricPublicKey::<version3::V3>::from(public_key.as_slice())
            .map_err(public_key_error)?;

        Ok(Self {
            secret_key,
            public_key,
        })
    }
}

impl Backend for PasetoV3Public {
    const SCHEME: Scheme = Scheme::PasetoV3Public;

    fn seal(&self, payload: &Payload) -> Result<String, MakerError> {
        let claims = ClaimStrings::from(payload);
        let message = serde_json::json!({
            "jti": claims.id,
            "sub": claims.username,
            "iat": claims.issued_at,
            "nbf": claims.issued_at,
            "exp": claims.expired_at,
        })
        .to_string();

        PublicToken::sign(&self.secret_key, message.as_bytes(), None, None).map_err(encoding_error)
    }

    fn open(&self, token: &str) -> Result<Payload, MakerError> {
        ensure_body_len(Self::SCHEME, token, V3_SIGNATURE_SIZE)?;

        let untrusted = UntrustedToken::<pasetors::Public, version3::V3>::try_from(token)
            .map_err(|e| classify(Self::SCHEME, e))?;
        let trusted = PublicToken::verify(&self.public_key, &untrusted, None, None)
            .map_err(|e| classify(Self::SCHEME, e))?;

        let claims =
            Claims::from_string(trusted.payload()).map_err(|e| classify(Self::SCHEME, e))?;
        ClaimsValidationRules::new()
            .validate_claims(&claims)
            .map_err(|e| classify(Self::SCHEME, e))?;

        let claims = serde_json::from_str(trusted.payload()).map_err(|_| MakerError::InvalidToken)?;
        payload_from_claims(claims)
    }
}
