//! Canonical byte encoding of an [`Order`].
//!
//! The layout is Solidity's packed encoding (`abi.encodePacked`) of the
//! order fields, big-endian and without padding between fields:
//!
//! ```text
//! offset  width  field
//!      0     32  order_id            uint256
//!     32     20  maker               address
//!     52     20  taker               address
//!     72     20  non_fungible_asset  address
//!     92     32  token_id            uint256
//!    124     20  fungible_asset      address
//!    144     32  amount              uint256
//!    176      1  status              uint8
//! ```
//!
//! Every field has a fixed width, so distinct orders always encode to
//! distinct byte strings. Maker tooling must reproduce this layout exactly;
//! any deviation surfaces only as a signature that recovers the wrong address.

use alloy_primitives::{Address, B256, U256, keccak256};

use crate::Order;
use crate::constants::{ADDRESS_WIDTH, ENCODED_ORDER_LEN, UINT256_WIDTH};

/// Packed encoding of `order`. See the module docs for the layout.
#[must_use]
pub fn encode_order(order: &Order) -> [u8; ENCODED_ORDER_LEN] {
    let mut out = [0u8; ENCODED_ORDER_LEN];
    let mut w = PackedWriter {
        buf: &mut out,
        pos: 0,
    };
    w.uint256(order.order_id);
    w.address(order.maker);
    w.address(order.taker);
    w.address(order.non_fungible_asset);
    w.uint256(order.token_id);
    w.address(order.fungible_asset);
    w.uint256(order.amount);
    w.uint8(order.status.as_u8());
    debug_assert_eq!(w.pos, ENCODED_ORDER_LEN);
    out
}

/// keccak-256 of [`encode_order`]. This is the hash the maker signs
/// (after the personal-message prefix) and the order's fingerprint.
#[must_use]
pub fn order_hash(order: &Order) -> B256 {
    keccak256(encode_order(order))
}

struct PackedWriter<'a> {
    buf: &'a mut [u8; ENCODED_ORDER_LEN],
    pos: usize,
}

impl PackedWriter<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    fn uint256(&mut self, value: U256) {
        let bytes: [u8; UINT256_WIDTH] = value.to_be_bytes();
        self.put(&bytes);
    }

    fn address(&mut self, value: Address) {
        let bytes: &[u8] = value.as_slice();
        debug_assert_eq!(bytes.len(), ADDRESS_WIDTH);
        self.put(bytes);
    }

    fn uint8(&mut self, value: u8) {
        self.put(&[value]);
    }
}
