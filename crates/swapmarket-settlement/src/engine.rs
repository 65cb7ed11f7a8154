//! The settlement engine.
//!
//! `settle` takes a maker-signed order and swaps the two assets in one
//! atomic step:
//! 1. Reject already-consumed fingerprints
//! 2. Recover the signer and require it to be the maker
//! 3. Require the caller to be the order's taker
//! 4. Require both asset ledgers to be whitelisted
//! 5. Mark the fingerprint consumed
//! 6. Leg A: fungible amount, maker → taker
//! 7. Leg B: non-fungible item, taker → maker
//! 8. Commit and record the settlement
//!
//! A failure at any step leaves the market exactly as it was.

use alloy_primitives::Address;
use swapmarket_ledger::SettlementLedgers;
use swapmarket_signing::{Verification, authenticate, verify};
use swapmarket_types::constants::{DEFAULT_HISTORY_LIMIT, ENGINE_NAME, VERSION};
use swapmarket_types::{
    AssetKind, CancellationRecord, Fingerprint, MarketConfig, MarketError, Order, Result,
    SettlementLeg, SettlementRecord,
};

use crate::consumed::{ConsumedOrders, Consumption, ConsumptionKind};
use crate::events::{EventLog, MarketEvent};
use crate::whitelist::WhitelistRegistry;

/// A single marketplace instance over a set of asset ledgers.
///
/// Mutating operations take `&mut self`, so one settlement runs to
/// completion before the next begins. Share across threads behind a mutex.
#[derive(Debug)]
pub struct Market<L: SettlementLedgers> {
    config: MarketConfig,
    whitelist: WhitelistRegistry,
    consumed: ConsumedOrders,
    ledgers: L,
    events: EventLog,
}

impl<L: SettlementLedgers> Market<L> {
    /// Build a market from a validated configuration. The whitelist is
    /// seeded from the configuration's lists.
    ///
    /// # Errors
    /// [`MarketError::Configuration`] if `config` fails validation.
    pub fn new(config: MarketConfig, ledgers: L) -> Result<Self> {
        config.validate()?;
        let whitelist = WhitelistRegistry::from_config(&config);
        Self::with_registry(config, whitelist, ledgers)
    }

    /// Build a market around an existing registry.
    ///
    /// The configuration is validated, but its seed lists and `admin` are
    /// not applied: the registry's own sets and administrator govern.
    ///
    /// # Errors
    /// [`MarketError::Configuration`] if `config` fails validation.
    pub fn with_registry(
        config: MarketConfig,
        whitelist: WhitelistRegistry,
        ledgers: L,
    ) -> Result<Self> {
        config.validate()?;
        if whitelist.admin() != config.admin {
            tracing::debug!(
                config_admin = %config.admin,
                registry_admin = %whitelist.admin(),
                "registry admin overrides configured admin"
            );
        }
        tracing::info!(
            name = ENGINE_NAME,
            version = VERSION,
            engine = %config.engine_address,
            admin = %whitelist.admin(),
            open_offers = config.allow_open_offers,
            "market initialised"
        );
        Ok(Self {
            config,
            whitelist,
            consumed: ConsumedOrders::new(),
            ledgers,
            events: EventLog::new(),
        })
    }

    // ------------------------------------------------------------------
    // Settlement
    // ------------------------------------------------------------------

    /// Settle `order` on behalf of `caller`.
    ///
    /// # Errors
    /// - `AlreadyConsumed` if the order was settled or cancelled before
    /// - `InvalidSignature` / `SignerMismatch` if the maker did not sign it
    /// - `OrderNotOpen` if the signed status is not `Open`
    /// - `CallerNotAuthorized` if `caller` is not the taker
    /// - `AssetNotWhitelisted` if either ledger is not approved
    /// - `TransferFailed` if a leg fails; nothing is applied
    pub fn settle(
        &mut self,
        order: &Order,
        signature: &[u8],
        caller: Address,
    ) -> Result<SettlementRecord> {
        let fingerprint = order.fingerprint();
        match self.try_settle(order, signature, caller, fingerprint) {
            Ok(record) => {
                tracing::info!(
                    fingerprint = %fingerprint,
                    maker = %record.maker,
                    taker = %record.taker,
                    amount = %record.amount,
                    token_id = %record.token_id,
                    "order settled"
                );
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(
                    fingerprint = %fingerprint,
                    caller = %caller,
                    code = err.code(),
                    error = %err,
                    "settlement rejected"
                );
                Err(err)
            }
        }
    }

    fn try_settle(
        &mut self,
        order: &Order,
        signature: &[u8],
        caller: Address,
        fingerprint: Fingerprint,
    ) -> Result<SettlementRecord> {
        if self.consumed.is_consumed(&fingerprint) {
            return Err(MarketError::AlreadyConsumed(fingerprint));
        }

        let signer = authenticate(order, signature)?;
        if signer != order.maker {
            return Err(MarketError::SignerMismatch {
                maker: order.maker,
                recovered: signer,
            });
        }
        if !order.is_open() {
            return Err(MarketError::OrderNotOpen(order.status));
        }
        tracing::debug!(fingerprint = %fingerprint, "signature accepted");

        let taker = self.resolve_taker(order, caller)?;
        self.check_whitelisted(order)?;

        // Released on drop unless committed below.
        let pending = self.consumed.reserve(fingerprint)?;
        let engine = self.config.engine_address;
        let checkpoint = self.ledgers.checkpoint();

        if let Err(cause) = self.ledgers.transfer_fungible(
            order.fungible_asset,
            engine,
            order.maker,
            taker,
            order.amount,
        ) {
            self.ledgers.revert_to(checkpoint);
            return Err(MarketError::TransferFailed {
                leg: SettlementLeg::Fungible,
                cause,
            });
        }
        tracing::debug!(fingerprint = %fingerprint, leg = %SettlementLeg::Fungible, "leg applied");

        if let Err(cause) = self.ledgers.transfer_non_fungible(
            order.non_fungible_asset,
            engine,
            taker,
            order.maker,
            order.token_id,
        ) {
            self.ledgers.revert_to(checkpoint);
            return Err(MarketError::TransferFailed {
                leg: SettlementLeg::NonFungible,
                cause,
            });
        }
        tracing::debug!(fingerprint = %fingerprint, leg = %SettlementLeg::NonFungible, "leg applied");

        self.ledgers.commit(checkpoint);
        pending.commit(ConsumptionKind::Settled);

        let record = SettlementRecord::new(order, fingerprint, taker);
        self.events.push(MarketEvent::Settled(record.clone()));
        Ok(record)
    }

    /// The address the non-fungible leg is taken from.
    fn resolve_taker(&self, order: &Order, caller: Address) -> Result<Address> {
        if order.is_open_offer() && self.config.allow_open_offers && !caller.is_zero() {
            return Ok(caller);
        }
        if caller.is_zero() || caller != order.taker {
            return Err(MarketError::CallerNotAuthorized {
                caller,
                expected: order.taker,
            });
        }
        Ok(caller)
    }

    fn check_whitelisted(&self, order: &Order) -> Result<()> {
        for (kind, asset) in [
            (AssetKind::Fungible, order.fungible_asset),
            (AssetKind::NonFungible, order.non_fungible_asset),
        ] {
            if !self.whitelist.is_allowed(kind, asset) {
                return Err(MarketError::AssetNotWhitelisted { kind, asset });
            }
        }
        Ok(())
    }

    /// Withdraw `order` so it can never settle. Only the maker may cancel.
    ///
    /// # Errors
    /// `CallerNotAuthorized` if `caller` is not the maker, `AlreadyConsumed`
    /// if the order was settled or cancelled before.
    pub fn cancel(&mut self, order: &Order, caller: Address) -> Result<CancellationRecord> {
        if caller != order.maker {
            return Err(MarketError::CallerNotAuthorized {
                caller,
                expected: order.maker,
            });
        }
        let fingerprint = order.fingerprint();
        self.consumed
            .reserve(fingerprint)?
            .commit(ConsumptionKind::Cancelled);

        let record = CancellationRecord::new(order, fingerprint);
        tracing::info!(fingerprint = %fingerprint, maker = %order.maker, "order cancelled");
        self.events.push(MarketEvent::Cancelled(record.clone()));
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Whitelist administration
    // ------------------------------------------------------------------

    pub fn set_fungible_allowed(
        &mut self,
        caller: Address,
        asset: Address,
        allowed: bool,
    ) -> Result<()> {
        self.set_allowed(caller, AssetKind::Fungible, asset, allowed)
    }

    pub fn set_non_fungible_allowed(
        &mut self,
        caller: Address,
        asset: Address,
        allowed: bool,
    ) -> Result<()> {
        self.set_allowed(caller, AssetKind::NonFungible, asset, allowed)
    }

    fn set_allowed(
        &mut self,
        caller: Address,
        kind: AssetKind,
        asset: Address,
        allowed: bool,
    ) -> Result<()> {
        self.whitelist.set_allowed(caller, kind, asset, allowed)?;
        self.events.push(MarketEvent::WhitelistChanged {
            kind,
            asset,
            allowed,
            by: caller,
        });
        Ok(())
    }

    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> Result<()> {
        self.whitelist.transfer_admin(caller, new_admin)?;
        self.events.push(MarketEvent::AdminTransferred {
            from: caller,
            to: new_admin,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Read-only signature check. Does not look at consumption state.
    pub fn verify_order(&self, order: &Order, signature: &[u8]) -> Result<Verification> {
        verify(order, signature)
    }

    #[must_use]
    pub fn is_consumed(&self, fingerprint: &Fingerprint) -> bool {
        self.consumed.is_consumed(fingerprint)
    }

    #[must_use]
    pub fn consumption(&self, fingerprint: &Fingerprint) -> Option<Consumption> {
        self.consumed.get(fingerprint)
    }

    /// The settlement record for `fingerprint`, if it was settled.
    #[must_use]
    pub fn settlement(&self, fingerprint: &Fingerprint) -> Option<&SettlementRecord> {
        self.events.all().iter().find_map(|event| match event {
            MarketEvent::Settled(record) if record.fingerprint == *fingerprint => Some(record),
            _ => None,
        })
    }

    /// The most recent `limit` settlements where `party` was maker or taker.
    #[must_use]
    pub fn history(&self, party: Address, limit: usize) -> Vec<&SettlementRecord> {
        self.events.settlements_for(party, limit)
    }

    /// [`history`](Self::history) with the default page size.
    #[must_use]
    pub fn recent_history(&self, party: Address) -> Vec<&SettlementRecord> {
        self.history(party, DEFAULT_HISTORY_LIMIT)
    }

    #[must_use]
    pub fn events(&self) -> &[MarketEvent] {
        self.events.all()
    }

    #[must_use]
    pub fn whitelist(&self) -> &WhitelistRegistry {
        &self.whitelist
    }

    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    #[must_use]
    pub fn ledgers(&self) -> &L {
        &self.ledgers
    }

    /// Direct ledger access for minting and approvals outside settlement.
    pub fn ledgers_mut(&mut self) -> &mut L {
        &mut self.ledgers
    }
}
