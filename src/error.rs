//! Error taxonomy shared by every maker.

use std::fmt;

/// Errors returned by makers and payloads.
///
/// Verification only ever yields [`MakerError::InvalidToken`] or
/// [`MakerError::ExpiredToken`]; the underlying library cause is logged, not
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MakerError {
    /// Malformed token, wrong key, wrong algorithm or failed authentication
    InvalidToken,
    /// Token authenticated but its expiry has elapsed
    ExpiredToken,
    /// Key material rejected at construction
    InvalidKey(String),
    /// Payload could not be built (id generation, timestamp overflow)
    Payload(String),
    /// The token encoder failed
    Encoding(String),
}

impl fmt::Display for MakerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MakerError::InvalidToken => write!(f, "token is invalid"),
            MakerError::ExpiredToken => write!(f, "token has expired"),
            MakerError::InvalidKey(msg) => write!(f, "invalid key: {msg}"),
            MakerError::Payload(msg) => write!(f, "could not create payload: {msg}"),
            MakerError::Encoding(msg) => write!(f, "could not encode token: {msg}"),
        }
    }
}

impl std::error::Error for MakerError {}

/// A verification failure reported by a token library.
///
/// Libraries signal expiry differently; each backend tells us whether its
/// error means "expired" and everything else collapses to an invalid token.
pub(crate) trait TokenFailure: fmt::Display {
    fn is_expiry(&self) -> bool;
}

/// Map a library failure onto the public taxonomy.
pub(crate) fn classify<E: TokenFailure>(scheme: crate::Scheme, err: E) -> MakerError {
    tracing::debug!(scheme = %scheme, error = %err, "Token rejected");
    if err.is_expiry() {
        MakerError::ExpiredToken
    } else {
        MakerError::InvalidToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scheme;

    struct Failure(bool);

    impl fmt::Display for Failure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "mac mismatch")
        }
    }

    impl TokenFailure for Failure {
        fn is_expiry(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_classify_collapses_detail() {
        assert_eq!(
            classify(Scheme::PasetoV2Local, Failure(false)),
            MakerError::InvalidToken
        );
        assert_eq!(
            classify(Scheme::PasetoV2Local, Failure(true)),
            MakerError::ExpiredToken
        );
    }

    #[test]
    fn test_display_does_not_leak_cause() {
        let err = classify(Scheme::JwtHs256, Failure(false));
        assert_eq!(err.to_string(), "token is invalid");
    }
}
