//! The maker contract and the algorithm binding every maker is held to.

use std::fmt;

use chrono::TimeDelta;
use jsonwebtoken::Algorithm;
use serde::Serialize;

use crate::{MakerError, Payload};

/// A token signing or encryption scheme, as declared by a token's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// JWT signed with HMAC-SHA256
    JwtHs256,
    /// JWT signed with Ed25519
    JwtEdDsa,
    PasetoV2Local,
    PasetoV3Local,
    PasetoV2Public,
    PasetoV3Public,
}

impl Scheme {
    pub const ALL: [Scheme; 6] = [
        Scheme::JwtHs256,
        Scheme::JwtEdDsa,
        Scheme::PasetoV2Local,
        Scheme::PasetoV3Local,
        Scheme::PasetoV2Public,
        Scheme::PasetoV3Public,
    ];

    /// PASETO header (`version.purpose.`), `None` for JWT schemes.
    pub fn paseto_header(self) -> Option<&'static str> {
        match self {
            Scheme::PasetoV2Local => Some("v2.local."),
            Scheme::PasetoV3Local => Some("v3.local."),
            Scheme::PasetoV2Public => Some("v2.public."),
            Scheme::PasetoV3Public => Some("v3.public."),
            Scheme::JwtHs256 | Scheme::JwtEdDsa => None,
        }
    }

    /// Read the scheme a token claims to use, without authenticating it.
    pub fn declared_by(token: &str) -> Option<Scheme> {
        if let Some(scheme) = Scheme::ALL
            .into_iter()
            .find(|s| s.paseto_header().is_some_and(|h| token.starts_with(h)))
        {
            return Some(scheme);
        }

        let header = jsonwebtoken::decode_header(token).ok()?;
        match header.alg {
            Algorithm::HS256 => Some(Scheme::JwtHs256),
            Algorithm::EdDSA => Some(Scheme::JwtEdDsa),
            _ => None,
        }
    }

    /// Refuse a token whose declared scheme is not exactly `self`.
    ///
    /// Runs before any cryptographic check so a token can never be verified
    /// under a different algorithm than the one the maker is pinned to.
    pub fn ensure_declared_by(self, token: &str) -> Result<(), MakerError> {
        match Scheme::declared_by(token) {
            Some(declared) if declared == self => Ok(()),
            declared => {
                tracing::debug!(
                    expected = %self,
                    declared = ?declared,
                    "Token scheme does not match maker"
                );
                Err(MakerError::InvalidToken)
            }
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::JwtHs256 => "jwt-hs256",
            Scheme::JwtEdDsa => "jwt-eddsa",
            Scheme::PasetoV2Local => "paseto-v2-local",
            Scheme::PasetoV3Local => "paseto-v3-local",
            Scheme::PasetoV2Public => "paseto-v2-public",
            Scheme::PasetoV3Public => "paseto-v3-public",
        };
        f.write_str(name)
    }
}

/// Result of minting a token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// The encoded token string
    pub token: String,
    /// The claims embedded in `token`
    pub payload: Payload,
}

pub(crate) mod sealed {
    use crate::{MakerError, Payload, Scheme};

    /// The cryptographic half of a maker. Only this crate implements it, and
    /// every implementor gets [`Maker`](crate::Maker) from the blanket impl.
    pub trait Backend: Send + Sync {
        /// The scheme this backend is pinned to.
        const SCHEME: Scheme;

        /// Encode `payload` into a token string.
        fn seal(&self, payload: &Payload) -> Result<String, MakerError>;

        /// Authenticate `token` under this backend's key and rebuild its
        /// payload. Only called once the token declares [`Self::SCHEME`].
        fn open(&self, token: &str) -> Result<Payload, MakerError>;
    }
}

pub(crate) use sealed::Backend;

/// Mints and validates tokens for one scheme and one set of keys.
///
/// Every maker in this crate gets this trait through a single blanket impl,
/// so [`Maker::verify_token`] always checks the declared scheme, then
/// authenticates, then checks expiry. Backends cannot reorder or skip steps.
pub trait Maker: Send + Sync {
    /// The scheme this maker is pinned to.
    fn scheme(&self) -> Scheme;

    /// Create a token for `username` that expires after `duration`.
    fn create_token(&self, username: &str, duration: TimeDelta) -> Result<IssuedToken, MakerError>;

    /// Verify `token` and return the payload it carries.
    fn verify_token(&self, token: &str) -> Result<Payload, MakerError>;
}

impl<T: Backend> Maker for T {
    fn scheme(&self) -> Scheme {
        T::SCHEME
    }

    fn create_token(&self, username: &str, duration: TimeDelta) -> Result<IssuedToken, MakerError> {
        let payload = Payload::new(username, duration)?;
        let token = self.seal(&payload)?;
        Ok(IssuedToken { token, payload })
    }

    fn verify_token(&self, token: &str) -> Result<Payload, MakerError> {
        T::SCHEME.ensure_declared_by(token)?;
        let payload = self.open(token)?;
        payload.valid()?;
        Ok(payload)
    }
}
