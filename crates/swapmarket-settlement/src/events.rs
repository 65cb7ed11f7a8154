//! Append-only log of market events for indexers.
//!
//! Events are advisory. Nothing in settlement reads them back except the
//! history queries.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use swapmarket_types::{AssetKind, CancellationRecord, SettlementRecord};

/// Something observable that happened in the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketEvent {
    Settled(SettlementRecord),
    Cancelled(CancellationRecord),
    WhitelistChanged {
        kind: AssetKind,
        asset: Address,
        allowed: bool,
        by: Address,
    },
    AdminTransferred {
        from: Address,
        to: Address,
    },
}

impl MarketEvent {
    /// Stable topic string for filtering.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Settled(_) => "SETTLEMENT",
            Self::Cancelled(_) => "CANCEL",
            Self::WhitelistChanged { .. } => "WHITELIST",
            Self::AdminTransferred { .. } => "ADMIN",
        }
    }
}

#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<MarketEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MarketEvent) {
        tracing::debug!(topic = event.topic(), seq = self.events.len(), "market event");
        self.events.push(event);
    }

    /// Every event, oldest first.
    #[must_use]
    pub fn all(&self) -> &[MarketEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Settlements involving `party`, most recent `limit`, oldest first.
    #[must_use]
    pub fn settlements_for(&self, party: Address, limit: usize) -> Vec<&SettlementRecord> {
        let matching: Vec<&SettlementRecord> = self
            .events
            .iter()
            .filter_map(|event| match event {
                MarketEvent::Settled(record) if record.involves(party) => Some(record),
                _ => None,
            })
            .collect();
        let start = matching.len().saturating_sub(limit);
        matching[start..].to_vec()
    }
}
