//! System-wide constants for the SwapMarket settlement engine.

/// Width of a packed `uint256` field in the canonical order encoding.
pub const UINT256_WIDTH: usize = 32;

/// Width of a packed address field in the canonical order encoding.
pub const ADDRESS_WIDTH: usize = 20;

/// Width of the packed `uint8` status field.
pub const STATUS_WIDTH: usize = 1;

/// Total length of a canonically encoded order:
/// 3 × uint256 + 4 × address + 1 × uint8.
pub const ENCODED_ORDER_LEN: usize = 3 * UINT256_WIDTH + 4 * ADDRESS_WIDTH + STATUS_WIDTH;

/// Personal-message prefix applied to the 32-byte order hash before signing.
/// The trailing `32` is the decimal length of the hash being signed.
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Length of a raw `r ‖ s ‖ v` recoverable signature.
pub const SIGNATURE_LEN: usize = 65;

/// Default number of records returned by history queries.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "SwapMarket";
