//! Consumed-order set. Prevents an order from being settled twice.
//!
//! Like a spent-output set: each order fingerprint can be consumed once,
//! by settlement or by cancellation, and stays consumed forever. There is
//! no eviction.
//!
//! Consumption happens in two steps. [`ConsumedOrders::reserve`] marks the
//! fingerprint before any asset moves and hands back a
//! [`PendingConsumption`]. Committing it makes the mark durable; dropping
//! it uncommitted releases the mark, so a failed settlement leaves the
//! set exactly as it was.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swapmarket_types::{Fingerprint, MarketError, Result};

/// How an order was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumptionKind {
    Settled,
    Cancelled,
}

impl std::fmt::Display for ConsumptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Settled => write!(f, "SETTLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Durable consumption of one fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumption {
    pub kind: ConsumptionKind,
    pub at: DateTime<Utc>,
}

/// Fingerprints that were settled or cancelled.
///
/// A `None` slot is a reservation held by an in-flight settlement.
#[derive(Debug, Default)]
pub struct ConsumedOrders {
    entries: HashMap<Fingerprint, Option<Consumption>>,
}

impl ConsumedOrders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `fingerprint` as taken. The mark is visible to
    /// [`is_consumed`](Self::is_consumed) immediately.
    ///
    /// # Errors
    /// Returns [`MarketError::AlreadyConsumed`] if the fingerprint is
    /// consumed or reserved.
    pub fn reserve(&mut self, fingerprint: Fingerprint) -> Result<PendingConsumption<'_>> {
        if self.entries.contains_key(&fingerprint) {
            return Err(MarketError::AlreadyConsumed(fingerprint));
        }
        self.entries.insert(fingerprint, None);
        Ok(PendingConsumption {
            set: self,
            fingerprint,
            committed: false,
        })
    }

    /// Whether the fingerprint is consumed or reserved.
    #[must_use]
    pub fn is_consumed(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    /// Durable consumption details, if any.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Consumption> {
        self.entries.get(fingerprint).copied().flatten()
    }

    /// Number of fingerprints tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been consumed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A reservation that is either committed or released on drop.
#[must_use = "an uncommitted reservation is released when dropped"]
pub struct PendingConsumption<'a> {
    set: &'a mut ConsumedOrders,
    fingerprint: Fingerprint,
    committed: bool,
}

impl PendingConsumption<'_> {
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Make the reservation permanent.
    pub fn commit(mut self, kind: ConsumptionKind) -> Consumption {
        let consumption = Consumption {
            kind,
            at: Utc::now(),
        };
        self.set.entries.insert(self.fingerprint, Some(consumption));
        self.committed = true;
        consumption
    }
}

impl Drop for PendingConsumption<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.set.entries.remove(&self.fingerprint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    fn fp(b: u8) -> Fingerprint {
        Fingerprint(B256::repeat_byte(b))
    }

    #[test]
    fn first_consume_ok() {
        let mut set = ConsumedOrders::new();
        let c = set.reserve(fp(1)).unwrap().commit(ConsumptionKind::Settled);
        assert_eq!(c.kind, ConsumptionKind::Settled);
        assert!(set.is_consumed(&fp(1)));
        assert_eq!(set.get(&fp(1)), Some(c));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn double_consume_blocked() {
        let mut set = ConsumedOrders::new();
        set.reserve(fp(1)).unwrap().commit(ConsumptionKind::Settled);

        let err = set.reserve(fp(1)).err().expect("second reserve must fail");
        assert!(
            matches!(err, MarketError::AlreadyConsumed(f) if f == fp(1)),
            "Expected AlreadyConsumed, got: {err:?}"
        );
    }

    #[test]
    fn cancelled_blocks_settlement() {
        let mut set = ConsumedOrders::new();
        set.reserve(fp(1)).unwrap().commit(ConsumptionKind::Cancelled);
        assert!(set.reserve(fp(1)).is_err());
        assert_eq!(set.get(&fp(1)).unwrap().kind, ConsumptionKind::Cancelled);
    }

    #[test]
    fn dropped_reservation_is_released() {
        let mut set = ConsumedOrders::new();
        {
            let pending = set.reserve(fp(1)).unwrap();
            assert_eq!(pending.fingerprint(), fp(1));
        }
        assert!(!set.is_consumed(&fp(1)));
        assert!(set.is_empty());
        set.reserve(fp(1)).unwrap().commit(ConsumptionKind::Settled);
        assert!(set.is_consumed(&fp(1)));
    }

    #[test]
    fn different_fingerprints_ok() {
        let mut set = ConsumedOrders::new();
        for b in 1..=3 {
            set.reserve(fp(b)).unwrap().commit(ConsumptionKind::Settled);
        }
        assert_eq!(set.len(), 3);
        assert!(set.is_consumed(&fp(2)));
        assert!(!set.is_consumed(&fp(4)));
    }

    #[test]
    fn no_eviction_under_volume() {
        let mut set = ConsumedOrders::new();
        for i in 0..10_000u32 {
            let mut bytes = [0u8; 32];
            bytes[..4].copy_from_slice(&i.to_be_bytes());
            set.reserve(Fingerprint(B256::from(bytes)))
                .unwrap()
                .commit(ConsumptionKind::Settled);
        }
        assert_eq!(set.len(), 10_000);
        assert!(set.is_consumed(&Fingerprint(B256::ZERO)));
    }

    #[test]
    fn empty_set() {
        let set = ConsumedOrders::new();
        assert!(set.is_empty());
        assert_eq!(set.get(&fp(1)), None);
    }
}
