//! Symmetric (`local`) PASETO makers.

use rusty_paseto::prelude::*;

use super::decode_key;
use crate::maker::Backend;
use crate::{MakerError, Payload, Scheme};

/// Size of a PASETO local key in bytes.
const SYMMETRIC_KEY_SIZE: usize = 32;

fn symmetric_key(symmetric_key_hex: &str) -> Result<Key<SYMMETRIC_KEY_SIZE>, MakerError> {
    decode_key(symmetric_key_hex).map_err(|e| MakerError::InvalidKey(format!("symmetric key {e}")))
}

/// Generate a local maker for one PASETO version. `$min_body` is the nonce
/// plus tag length every body must exceed.
macro_rules! paseto_local_maker {
    ($version:ident, $header:literal, $min_body:expr) => {
        paste::paste! {
            #[doc = concat!("Encrypts and decrypts `", $header, "` tokens with a 32-byte symmetric key.")]
            pub struct [<Paseto $version Local>] {
                key: PasetoSymmetricKey<$version, Local>,
            }

            impl [<Paseto $version Local>] {
                /// Create a maker from a hex-encoded 32-byte key.
                pub fn new(symmetric_key_hex: &str) -> Result<Self, MakerError> {
                    let key = PasetoSymmetricKey::<$version, Local>::try_from(symmetric_key(
                        symmetric_key_hex,
                    )?)
                    .map_err(|e| {
                        MakerError::InvalidKey(format!("could not initialize symmetric key: {e}"))
                    })?;
                    Ok(Self { key })
                }
            }

            impl Backend for [<Paseto $version Local>] {
                const SCHEME: Scheme = Scheme::[<Paseto $version Local>];

                fn seal(&self, payload: &Payload) -> Result<String, MakerError> {
                    seal_with!($version, Local, payload, &self.key)
                }

                fn open(&self, token: &str) -> Result<Payload, MakerError> {
                    open_with!($version, Local, token, &self.key, Self::SCHEME, $min_body)
                }
            }
        }
    };
}

paseto_local_maker!(V2, "v2.local", 24 + 16);
paseto_local_maker!(V3, "v3.local", 32 + 48);
