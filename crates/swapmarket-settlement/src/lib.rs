//! # swapmarket-settlement
//!
//! **Settlement Engine**: whitelist administration, replay protection,
//! and atomic two-leg settlement of maker-signed orders.
//!
//! ## Architecture
//!
//! [`Market`] receives `(order, signature, caller)` from a taker and:
//! 1. Rejects fingerprints already in [`ConsumedOrders`]
//! 2. Authenticates the maker's signature
//! 3. Checks the caller and the [`WhitelistRegistry`]
//! 4. Moves the fungible amount to the taker and the item to the maker
//! 5. Records a [`SettlementRecord`](swapmarket_types::SettlementRecord)
//!    in the [`EventLog`]
//!
//! Every rejection leaves balances, ownership, whitelist and consumed set
//! untouched.

pub mod consumed;
pub mod engine;
pub mod events;
pub mod whitelist;

pub use consumed::{ConsumedOrders, Consumption, ConsumptionKind, PendingConsumption};
pub use engine::Market;
pub use events::{EventLog, MarketEvent};
pub use whitelist::WhitelistRegistry;
