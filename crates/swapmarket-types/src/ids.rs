//! Identifiers used throughout SwapMarket.
//!
//! Orders are content-addressed by their [`Fingerprint`]; settlement records
//! carry a UUIDv7 [`RecordId`] for time-ordered indexing.

use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Replay-protection key of an order: keccak-256 of its canonical encoding.
///
/// The same 32 bytes are what the maker signs (after prefixing), so the
/// engine and the maker's tooling always agree on an order's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Fingerprint(pub B256);

impl Fingerprint {
    /// The all-zero fingerprint. Never produced by a real order.
    pub const ZERO: Self = Self(B256::ZERO);

    #[must_use]
    pub fn as_b256(&self) -> &B256 {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0.0
    }

    /// First four bytes as hex, for compact log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<B256> for Fingerprint {
    fn from(hash: B256) -> Self {
        Self(hash)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Identifier of an emitted settlement record. Uses UUIDv7 so indexers can
/// sort records by emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
