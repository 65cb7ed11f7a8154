//! Records emitted by the engine for off-chain indexers.
//!
//! Records are advisory: settlement correctness never depends on them.

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Fingerprint, Order, RecordId};

/// The two transfer legs of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementLeg {
    /// Leg A: fungible amount, maker → taker.
    Fungible,
    /// Leg B: non-fungible item, taker → maker.
    NonFungible,
}

impl std::fmt::Display for SettlementLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fungible => write!(f, "FUNGIBLE"),
            Self::NonFungible => write!(f, "NON_FUNGIBLE"),
        }
    }
}

/// Emitted once per successful settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub record_id: RecordId,
    pub fingerprint: Fingerprint,
    pub order_id: U256,
    pub maker: Address,
    /// The party that actually took the order (the caller, for open offers).
    pub taker: Address,
    pub fungible_asset: Address,
    pub amount: U256,
    pub non_fungible_asset: Address,
    pub token_id: U256,
    pub settled_at: DateTime<Utc>,
}

impl SettlementRecord {
    /// Build the record for `order` settled with `taker` as counterparty.
    #[must_use]
    pub fn new(order: &Order, fingerprint: Fingerprint, taker: Address) -> Self {
        Self {
            record_id: RecordId::new(),
            fingerprint,
            order_id: order.order_id,
            maker: order.maker,
            taker,
            fungible_asset: order.fungible_asset,
            amount: order.amount,
            non_fungible_asset: order.non_fungible_asset,
            token_id: order.token_id,
            settled_at: Utc::now(),
        }
    }

    /// Whether `party` was either side of this settlement.
    #[must_use]
    pub fn involves(&self, party: Address) -> bool {
        self.maker == party || self.taker == party
    }
}

/// Emitted when a maker cancels an order before it is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationRecord {
    pub fingerprint: Fingerprint,
    pub order_id: U256,
    pub maker: Address,
    pub cancelled_at: DateTime<Utc>,
}

impl CancellationRecord {
    #[must_use]
    pub fn new(order: &Order, fingerprint: Fingerprint) -> Self {
        Self {
            fingerprint,
            order_id: order.order_id,
            maker: order.maker,
            cancelled_at: Utc::now(),
        }
    }
}
