//! Maker-side order signing.

use alloy_primitives::Address;
use alloy_signer::{Signer, SignerSync};
use swapmarket_types::{MarketError, Order, Result, order_hash};

use crate::authenticator::personal_message_hash;

/// Signs orders on behalf of a maker key.
///
/// Produces exactly the payload [`authenticate`](crate::authenticate)
/// recovers from, so tooling built on this type cannot drift from the engine.
pub struct OrderSigner<S> {
    inner: S,
}

impl<S> OrderSigner<S>
where
    S: Signer + SignerSync,
{
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The address orders signed here recover to.
    #[must_use]
    pub fn maker(&self) -> Address {
        Signer::address(&self.inner)
    }

    /// Sign `order`, returning the 65-byte `r ‖ s ‖ v` signature (`v` = 27/28).
    ///
    /// Signing an order whose `maker` is not this key is allowed; the engine
    /// will reject it with a signer mismatch.
    pub fn sign(&self, order: &Order) -> Result<Vec<u8>> {
        if order.maker != self.maker() {
            tracing::warn!(
                maker = %order.maker,
                signer = %self.maker(),
                "signing order for a different maker"
            );
        }
        let prehash = personal_message_hash(&order_hash(order));
        let sig = self
            .inner
            .sign_hash_sync(&prehash)
            .map_err(|e| MarketError::SigningFailed(e.to_string()))?;
        Ok(sig.as_bytes().to_vec())
    }

    /// The wrapped key.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}
