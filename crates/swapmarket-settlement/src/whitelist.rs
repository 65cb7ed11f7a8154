//! Whitelist registry: administrator-controlled sets of tradable assets.
//!
//! The engine reads both sets before every settlement. Only the
//! administrator may change them; everyone may read them.

use std::collections::HashSet;

use alloy_primitives::Address;
use swapmarket_types::{AssetKind, MarketConfig, MarketError, Result};

/// Approved fungible and non-fungible ledger addresses.
#[derive(Debug, Clone)]
pub struct WhitelistRegistry {
    admin: Address,
    fungible: HashSet<Address>,
    non_fungible: HashSet<Address>,
}

impl WhitelistRegistry {
    /// Empty registry administered by `admin`.
    #[must_use]
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            fungible: HashSet::new(),
            non_fungible: HashSet::new(),
        }
    }

    /// Registry seeded from a deployment configuration.
    #[must_use]
    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            admin: config.admin,
            fungible: config.fungible_whitelist.iter().copied().collect(),
            non_fungible: config.non_fungible_whitelist.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn admin(&self) -> Address {
        self.admin
    }

    fn require_admin(&self, caller: Address) -> Result<()> {
        if caller == self.admin {
            Ok(())
        } else {
            Err(MarketError::Unauthorized { caller })
        }
    }

    /// Allow or disallow a fungible ledger.
    pub fn set_fungible_allowed(
        &mut self,
        caller: Address,
        asset: Address,
        allowed: bool,
    ) -> Result<()> {
        self.set_allowed(caller, AssetKind::Fungible, asset, allowed)
    }

    /// Allow or disallow a non-fungible ledger.
    pub fn set_non_fungible_allowed(
        &mut self,
        caller: Address,
        asset: Address,
        allowed: bool,
    ) -> Result<()> {
        self.set_allowed(caller, AssetKind::NonFungible, asset, allowed)
    }

    /// Allow or disallow `asset` in the set for `kind`. Last write wins.
    pub fn set_allowed(
        &mut self,
        caller: Address,
        kind: AssetKind,
        asset: Address,
        allowed: bool,
    ) -> Result<()> {
        self.require_admin(caller)?;
        let set = match kind {
            AssetKind::Fungible => &mut self.fungible,
            AssetKind::NonFungible => &mut self.non_fungible,
        };
        if allowed {
            set.insert(asset);
        } else {
            set.remove(&asset);
        }
        tracing::info!(%kind, %asset, allowed, "whitelist updated");
        Ok(())
    }

    /// Hand the administrator capability to `new_admin`.
    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> Result<()> {
        self.require_admin(caller)?;
        if new_admin.is_zero() {
            return Err(MarketError::Configuration(
                "admin must not be the zero address".into(),
            ));
        }
        tracing::info!(from = %self.admin, to = %new_admin, "whitelist admin transferred");
        self.admin = new_admin;
        Ok(())
    }

    #[must_use]
    pub fn is_fungible_allowed(&self, asset: Address) -> bool {
        self.fungible.contains(&asset)
    }

    #[must_use]
    pub fn is_non_fungible_allowed(&self, asset: Address) -> bool {
        self.non_fungible.contains(&asset)
    }

    #[must_use]
    pub fn is_allowed(&self, kind: AssetKind, asset: Address) -> bool {
        match kind {
            AssetKind::Fungible => self.is_fungible_allowed(asset),
            AssetKind::NonFungible => self.is_non_fungible_allowed(asset),
        }
    }

    /// Allowed assets of `kind`, sorted.
    #[must_use]
    pub fn allowed(&self, kind: AssetKind) -> Vec<Address> {
        let set = match kind {
            AssetKind::Fungible => &self.fungible,
            AssetKind::NonFungible => &self.non_fungible,
        };
        let mut out: Vec<Address> = set.iter().copied().collect();
        out.sort();
        out
    }
}
