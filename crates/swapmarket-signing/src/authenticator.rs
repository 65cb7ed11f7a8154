//! Signer recovery for signed orders.
//!
//! Everything here is a pure function of its inputs. Recovery never
//! compares against `order.maker`; that decision belongs to the caller.

use alloy_primitives::{Address, B256, Signature, keccak256};
use swapmarket_types::constants::{PERSONAL_MESSAGE_PREFIX, SIGNATURE_LEN};
use swapmarket_types::{Fingerprint, MarketError, Order, Result, order_hash};

/// Apply the personal-message prefix to a 32-byte hash and hash again.
#[must_use]
pub fn personal_message_hash(hash: &B256) -> B256 {
    let mut buf = [0u8; PERSONAL_MESSAGE_PREFIX.len() + 32];
    buf[..PERSONAL_MESSAGE_PREFIX.len()].copy_from_slice(PERSONAL_MESSAGE_PREFIX);
    buf[PERSONAL_MESSAGE_PREFIX.len()..].copy_from_slice(hash.as_slice());
    keccak256(buf)
}

/// Recover the address that produced `signature` over `prehash`.
///
/// `signature` is `r ‖ s ‖ v` with `v` in `{0, 1, 27, 28}`.
///
/// # Errors
/// [`MarketError::InvalidSignature`] if the signature has the wrong length,
/// an unusable parity byte, or does not describe a valid curve point.
pub fn recover_signer(prehash: &B256, signature: &[u8]) -> Result<Address> {
    if signature.len() != SIGNATURE_LEN {
        return Err(MarketError::InvalidSignature {
            reason: format!(
                "expected {SIGNATURE_LEN} bytes, got {}",
                signature.len()
            ),
        });
    }

    let sig = Signature::from_raw(signature).map_err(|e| MarketError::InvalidSignature {
        reason: e.to_string(),
    })?;

    sig.recover_address_from_prehash(prehash)
        .map_err(|e| MarketError::InvalidSignature {
            reason: e.to_string(),
        })
}

/// Recover the signer of `order` from `signature`.
///
/// Computes the canonical order hash, applies the personal-message prefix,
/// and recovers. Returns whoever signed; the result is not checked against
/// `order.maker`.
pub fn authenticate(order: &Order, signature: &[u8]) -> Result<Address> {
    let prehash = personal_message_hash(&order_hash(order));
    let signer = recover_signer(&prehash, signature)?;
    tracing::trace!(signer = %signer, maker = %order.maker, "recovered order signer");
    Ok(signer)
}

/// Outcome of a read-only signature check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// Address recovered from the signature.
    pub signer: Address,
    /// Fingerprint of the order that was checked.
    pub fingerprint: Fingerprint,
    /// Whether `signer == order.maker`.
    pub signer_is_maker: bool,
}

/// Diagnostic check of an (order, signature) pair. Never mutates anything.
pub fn verify(order: &Order, signature: &[u8]) -> Result<Verification> {
    let signer = authenticate(order, signature)?;
    Ok(Verification {
        signer,
        fingerprint: order.fingerprint(),
        signer_is_maker: signer == order.maker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, b256, eip191_hash_message};
    use alloy_signer::{Signer, SignerSync};
    use alloy_signer_local::PrivateKeySigner;
    use rand::Rng;
    use swapmarket_types::OrderStatus;

    use crate::OrderSigner;

    fn signed_order() -> (PrivateKeySigner, Order, Vec<u8>) {
        let key = PrivateKeySigner::random();
        let order = Order::dummy(key.address(), Address::repeat_byte(0x22));
        let sig = OrderSigner::new(key.clone()).sign(&order).unwrap();
        (key, order, sig)
    }

    #[test]
    fn prefix_matches_eip191() {
        let hash = B256::repeat_byte(0x5a);
        assert_eq!(
            personal_message_hash(&hash),
            eip191_hash_message(hash.as_slice())
        );
    }

    #[test]
    fn golden_prefixed_hash() {
        let hash = b256!("19afd21d05f09350521610993e4bb4fb8e347ea8ca4438703f9f37c2b392a23e");
        assert_eq!(
            personal_message_hash(&hash),
            b256!("5f472bd290175d13eb29c6ad1b8450573eaaa06c08b5330a60f1a452c26e72c2")
        );
    }

    #[test]
    fn recovers_maker() {
        let (key, order, sig) = signed_order();
        assert_eq!(authenticate(&order, &sig).unwrap(), key.address());
    }

    #[test]
    fn personal_sign_of_order_hash_is_accepted() {
        // Tools that personal-sign the raw 32-byte order hash interoperate.
        let key = PrivateKeySigner::random();
        let order = Order::dummy(key.address(), Address::repeat_byte(0x22));
        let sig = key
            .sign_message_sync(order_hash(&order).as_slice())
            .unwrap();
        assert_eq!(authenticate(&order, &sig.as_bytes()).unwrap(), key.address());
    }

    #[test]
    fn accepts_zero_one_parity() {
        let (key, order, mut sig) = signed_order();
        sig[64] -= 27;
        assert!(sig[64] <= 1);
        assert_eq!(authenticate(&order, &sig).unwrap(), key.address());
    }

    #[test]
    fn wrong_length_is_invalid() {
        let (_, order, sig) = signed_order();
        for bad in [&sig[..64], &[][..]] {
            let err = authenticate(&order, bad).unwrap_err();
            assert!(matches!(err, MarketError::InvalidSignature { .. }), "{err}");
        }
        let mut long = sig.clone();
        long.push(0);
        assert!(matches!(
            authenticate(&order, &long).unwrap_err(),
            MarketError::InvalidSignature { .. }
        ));
    }

    #[test]
    fn bad_parity_is_invalid() {
        let (_, order, mut sig) = signed_order();
        sig[64] = 5;
        let err = authenticate(&order, &sig).unwrap_err();
        assert!(matches!(err, MarketError::InvalidSignature { .. }));
    }

    #[test]
    fn zero_signature_is_invalid() {
        let order = Order::dummy(Address::repeat_byte(1), Address::repeat_byte(2));
        let mut sig = vec![0u8; SIGNATURE_LEN];
        sig[64] = 27;
        let err = authenticate(&order, &sig).unwrap_err();
        assert!(matches!(err, MarketError::InvalidSignature { .. }));
    }

    #[test]
    fn other_key_recovers_other_address() {
        let (key, order, _) = signed_order();
        let forger = PrivateKeySigner::random();
        let forged = OrderSigner::new(forger.clone()).sign(&order).unwrap();
        let recovered = authenticate(&order, &forged).unwrap();
        assert_eq!(recovered, forger.address());
        assert_ne!(recovered, key.address());
    }

    #[test]
    fn any_field_change_breaks_authentication() {
        let (key, order, sig) = signed_order();
        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let mut tampered = order.clone();
            match rng.gen_range(0..8) {
                0 => tampered.order_id ^= U256::from(1u64) << rng.gen_range(0..256usize),
                1 => tampered.maker.0[rng.gen_range(0..20)] ^= 1 << rng.gen_range(0..8),
                2 => tampered.taker.0[rng.gen_range(0..20)] ^= 1 << rng.gen_range(0..8),
                3 => {
                    tampered.non_fungible_asset.0[rng.gen_range(0..20)] ^=
                        1 << rng.gen_range(0..8);
                }
                4 => tampered.token_id ^= U256::from(1u64) << rng.gen_range(0..256usize),
                5 => {
                    tampered.fungible_asset.0[rng.gen_range(0..20)] ^= 1 << rng.gen_range(0..8);
                }
                6 => tampered.amount ^= U256::from(1u64) << rng.gen_range(0..256usize),
                _ => tampered.status = OrderStatus::Inactive,
            }
            match authenticate(&tampered, &sig) {
                Ok(addr) => assert_ne!(addr, key.address(), "{tampered:?}"),
                Err(err) => assert!(matches!(err, MarketError::InvalidSignature { .. })),
            }
        }
    }

    #[test]
    fn verify_reports_match_and_fingerprint() {
        let (key, order, sig) = signed_order();
        let v = verify(&order, &sig).unwrap();
        assert_eq!(v.signer, key.address());
        assert!(v.signer_is_maker);
        assert_eq!(v.fingerprint, order.fingerprint());

        let mut other = order.clone();
        other.maker = Address::repeat_byte(0x99);
        let v = verify(&other, &sig).unwrap();
        assert!(!v.signer_is_maker);
    }
}
