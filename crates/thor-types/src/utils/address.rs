//! Address validation and padding helpers.
//!
//! Addresses on the wire are 20 bytes as 0x-prefixed hex. Calldata words
//! and event topics embed them left-padded to 32 bytes.

use super::formatting::without_0x_prefix;
use alloy_primitives::U256;

/// Checks whether a string is a well-formed 20-byte hex address.
pub fn is_valid_address(address: &str) -> bool {
	let stripped = without_0x_prefix(address);
	stripped.len() == 40 && stripped.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Left-pads an address to a 32-byte hex word with "0x" prefix.
///
/// Returns `None` when the input is not a valid address.
pub fn pad_address(address: &str) -> Option<String> {
	if !is_valid_address(address) {
		return None;
	}
	Some(format!(
		"0x{:0>64}",
		without_0x_prefix(address).to_lowercase()
	))
}

/// Parses a 0x-prefixed hex quantity into a [`U256`].
///
/// An empty quantity ("0x") parses as zero, matching node responses for
/// untouched storage slots.
pub fn parse_hex_quantity(quantity: &str) -> Option<U256> {
	let stripped = without_0x_prefix(quantity.trim());
	if stripped.is_empty() {
		return Some(U256::ZERO);
	}
	U256::from_str_radix(stripped, 16).ok()
}
