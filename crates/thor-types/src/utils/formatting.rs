//! String formatting utilities.
//!
//! Provides functions for hex string prefix management used throughout
//! the workspace when moving between wire payloads and byte values.

/// Adds "0x" prefix to a hex string if it doesn't already have one.
///
/// # Arguments
///
/// * `hex_str` - A hex string that may or may not have "0x" prefix
///
/// # Returns
///
/// A hex string with "0x" prefix.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.to_lowercase().starts_with("0x") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Removes "0x" prefix from a hex string if present.
///
/// # Arguments
///
/// * `hex_str` - A hex string that may or may not have "0x" prefix
///
/// # Returns
///
/// A hex string without "0x" prefix.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}
