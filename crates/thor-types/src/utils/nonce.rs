//! Nonce generation for transaction bodies.

use rand::RngCore;

/// Generates a random transaction nonce: four random bytes rendered as a
/// 0x-prefixed hex string.
pub fn generate_nonce() -> String {
	let mut bytes = [0u8; 4];
	rand::thread_rng().fill_bytes(&mut bytes);
	format!("0x{}", hex::encode(bytes))
}
