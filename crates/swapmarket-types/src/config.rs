//! Configuration for a SwapMarket deployment.

use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{MarketError, Result};

/// Deployment configuration of a single market instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Address the engine acts as when spending allowances and approvals.
    pub engine_address: Address,
    /// Holder of the whitelist administrator capability.
    pub admin: Address,
    /// Honour the zero-address taker sentinel as "any caller may take".
    #[serde(default)]
    pub allow_open_offers: bool,
    /// Fungible ledgers approved at deployment.
    #[serde(default)]
    pub fungible_whitelist: Vec<Address>,
    /// Non-fungible ledgers approved at deployment.
    #[serde(default)]
    pub non_fungible_whitelist: Vec<Address>,
}

impl MarketConfig {
    /// A closed-taker market with empty whitelists.
    #[must_use]
    pub fn new(engine_address: Address, admin: Address) -> Self {
        Self {
            engine_address,
            admin,
            allow_open_offers: false,
            fungible_whitelist: Vec::new(),
            non_fungible_whitelist: Vec::new(),
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| MarketError::Configuration(format!("invalid market config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Reject configurations that could never operate safely.
    pub fn validate(&self) -> Result<()> {
        if self.engine_address.is_zero() {
            return Err(MarketError::Configuration(
                "engine_address must not be the zero address".into(),
            ));
        }
        if self.admin.is_zero() {
            return Err(MarketError::Configuration(
                "admin must not be the zero address".into(),
            ));
        }
        if self
            .fungible_whitelist
            .iter()
            .chain(&self.non_fungible_whitelist)
            .any(|asset| asset.is_zero())
        {
            return Err(MarketError::Configuration(
                "whitelists must not contain the zero address".into(),
            ));
        }
        Ok(())
    }
}
