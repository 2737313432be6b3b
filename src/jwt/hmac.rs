//! HS256 JWT maker.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::maker::Backend;
use crate::{MakerError, Payload, Scheme};

/// Shortest shared secret accepted, in bytes.
pub const MIN_SECRET_KEY_SIZE: usize = 32;

/// Signs and verifies HS256 JWTs with a shared secret.
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtMaker {
    /// Create a maker from `secret`, which must be at least
    /// [`MIN_SECRET_KEY_SIZE`] bytes long.
    pub fn new(secret: &str) -> Result<Self, MakerError> {
        if secret.len() < MIN_SECRET_KEY_SIZE {
            return Err(MakerError::InvalidKey(format!(
                "secret must be at least {MIN_SECRET_KEY_SIZE} characters"
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }
}

impl Backend for JwtMaker {
    const SCHEME: Scheme = Scheme::JwtHs256;

    fn seal(&self, payload: &Payload) -> Result<String, MakerError> {
        super::encode(Algorithm::HS256, payload, &self.encoding_key)
    }

    fn open(&self, token: &str) -> Result<Payload, MakerError> {
        super::decode(Self::SCHEME, Algorithm::HS256, token, &self.decoding_key)
    }
}
