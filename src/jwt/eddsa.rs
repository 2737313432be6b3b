//! EdDSA (Ed25519) JWT maker.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::maker::Backend;
use crate::{MakerError, Payload, Scheme};

/// Signs JWTs with an Ed25519 private key and verifies them with the
/// matching public key.
pub struct JwtEdDsaMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtEdDsaMaker {
    /// Create a maker from a PKCS#8 private key and an SPKI public key, both
    /// PEM encoded.
    pub fn new(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self, MakerError> {
        let encoding_key = EncodingKey::from_ed_pem(private_key_pem).map_err(|e| {
            MakerError::InvalidKey(format!("could not initialize private asymmetric key: {e}"))
        })?;
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem).map_err(|e| {
            MakerError::InvalidKey(format!("could not initialize public asymmetric key: {e}"))
        })?;

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }
}

impl Backend for JwtEdDsaMaker {
    const SCHEME: Scheme = Scheme::JwtEdDsa;

    fn seal(&self, payload: &Payload) -> Result<String, MakerError> {
        super::encode(Algorithm::EdDSA, payload, &self.encoding_key)
    }

    fn open(&self, token: &str) -> Result<Payload, MakerError> {
        super::decode(Self::SCHEME, Algorithm::EdDSA, token, &self.decoding_key)
    }
}
