//! Chain constants used across the estimation workspace.
//!
//! Intrinsic gas accounting constants follow the Thor transaction model:
//! every transaction pays a base fee, every clause a flat fee, and the
//! clause payload is charged per byte with zero bytes cheaper than
//! non-zero bytes. Contract addresses are the chain's built-in contracts,
//! which live at ASCII-named addresses.

/// Base gas charged for any transaction.
pub const TX_GAS: u64 = 5000;

/// Gas charged per clause.
pub const CLAUSE_GAS: u64 = 16000;

/// Gas charged per clause when the clause creates a contract (no `to`).
pub const CLAUSE_GAS_CONTRACT_CREATION: u64 = 48000;

/// Gas charged per zero byte of clause data.
pub const ZERO_BYTE_GAS: u64 = 4;

/// Gas charged per non-zero byte of clause data.
pub const NON_ZERO_BYTE_GAS: u64 = 68;

/// Flat fee for invoking the VM. Only charged when simulated execution
/// actually consumed gas.
pub const VM_GAS: u64 = 15000;

/// Address of the built-in Params contract (ASCII "Params").
pub const PARAMS_ADDRESS: &str = "0x0000000000000000000000000000506172616d73";

/// Storage key of the base gas price inside the Params contract
/// (ASCII "base-gas-price", left-padded to 32 bytes).
pub const BASE_GAS_PRICE_KEY: &str =
	"0x000000000000000000000000000000000000626173652d6761732d7072696365";

/// Function selector for `get(bytes32)` on the Params contract.
pub const PARAMS_GET_SELECTOR: &str = "0x8eaa6ac0";

/// Address of the built-in Energy contract (ASCII "Energy"), the
/// fee-paying token of the chain.
pub const ENERGY_ADDRESS: &str = "0x0000000000000000000000000000456e65726779";

/// Function selector for `transfer(address,uint256)`.
pub const TRANSFER_SELECTOR: &str = "0xa9059cbb";

/// Gas price coefficient applied when a transaction does not specify one.
pub const DEFAULT_GAS_COEFFICIENT: u8 = 0;

/// Upper bound of the gas price coefficient range.
pub const MAX_GAS_COEFFICIENT: u8 = 255;

/// Response header carrying the node's reported version.
pub const VERSION_HEADER: &str = "x-thorest-ver";

/// Minimum node version that supports the "next" simulation revision.
pub const REVISION_NEXT_MIN_VERSION: &str = "2.1.3";

/// Standard hex string prefix.
pub const HEX_PREFIX: &str = "0x";
