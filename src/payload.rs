//! Token claims and their expiry check.

use chrono::{DateTime, TimeDelta, Utc};
use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MakerError;

/// Claims carried by every token, whatever the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    id: Uuid,
    username: String,
    issued_at: DateTime<Utc>,
    expired_at: DateTime<Utc>,
}

impl Payload {
    /// Create a payload for `username` valid for `duration` from now.
    ///
    /// Zero and negative durations are accepted and yield a payload that is
    /// already expired.
    pub fn new(username: &str, duration: TimeDelta) -> Result<Self, MakerError> {
        let id = random_id()?;
        let issued_at = Utc::now();
        let expired_at = issued_at
            .checked_add_signed(duration)
            .ok_or_else(|| MakerError::Payload("expiration out of range".to_string()))?;

        Ok(Self {
            id,
            username: username.to_string(),
            issued_at,
            expired_at,
        })
    }

    /// Rebuild a payload from claims read back out of a token.
    pub(crate) fn from_claims(
        id: Uuid,
        username: String,
        issued_at: DateTime<Utc>,
        expired_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            issued_at,
            expired_at,
        }
    }

    /// Fails with [`MakerError::ExpiredToken`] once the wall clock is past
    /// `expired_at`.
    pub fn valid(&self) -> Result<(), MakerError> {
        if Utc::now() > self.expired_at {
            return Err(MakerError::ExpiredToken);
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expired_at(&self) -> DateTime<Utc> {
        self.expired_at
    }
}

/// v4 UUID from the OS generator, surfacing its failure instead of panicking.
fn random_id() -> Result<Uuid, MakerError> {
    let mut bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| MakerError::Payload(format!("id generation failed: {e}")))?;
    Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
}
