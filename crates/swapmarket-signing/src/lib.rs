//! # swapmarket-signing
//!
//! Off-chain signature handling for SwapMarket orders.
//!
//! ## Signed payload
//!
//! ```text
//! order_hash = keccak256(encode_order(order))                    // 177 packed bytes
//! prehash    = keccak256("\x19Ethereum Signed Message:\n32" ‖ order_hash)
//! signature  = secp256k1 recoverable signature over prehash     // r ‖ s ‖ v, 65 bytes
//! ```
//!
//! The prefix keeps a signed order from ever being valid as a raw
//! transaction signature, and vice versa.
//!
//! - [`authenticator`]: pure recovery of the signing address
//! - [`signer`]: maker-side signing with any [`alloy_signer::SignerSync`]

pub mod authenticator;
pub mod signer;

pub use authenticator::{Verification, authenticate, personal_message_hash, recover_signer, verify};
pub use signer::OrderSigner;
