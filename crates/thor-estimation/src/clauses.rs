//! Transfer clause construction for the native and token assets.
//!
//! Native transfers move value directly to the recipient. Token
//! transfers call `transfer(address,uint256)` on the token contract with
//! the recipient and amount packed into 32-byte calldata words.

use crate::EstimationError;
use alloy_primitives::U256;
use thor_types::{pad_address, without_0x_prefix, Clause, TRANSFER_SELECTOR};

/// Builds the clause for a native asset transfer.
pub fn native_transfer(recipient: &str, amount: U256) -> Clause {
	Clause {
		to: Some(recipient.to_string()),
		value: Some(format!("0x{:x}", amount)),
		data: Some("0x".to_string()),
	}
}

/// Builds the clause for a fungible token transfer.
///
/// Fails when the recipient is not a well-formed address.
pub fn token_transfer(
	token_address: &str,
	recipient: &str,
	amount: U256,
) -> Result<Clause, EstimationError> {
	let recipient_word = pad_address(recipient).ok_or_else(|| {
		EstimationError::InvalidTransaction(format!("Invalid recipient address: {}", recipient))
	})?;
	let amount_word = format!("{:0>64}", format!("{:x}", amount));

	Ok(Clause {
		to: Some(token_address.to_string()),
		value: Some("0x0".to_string()),
		data: Some(format!(
			"{}{}{}",
			TRANSFER_SELECTOR,
			without_0x_prefix(&recipient_word),
			amount_word
		)),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use thor_types::ENERGY_ADDRESS;

	const RECIPIENT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

	#[test]
	fn test_native_transfer_clause() {
		let clause = native_transfer(RECIPIENT, U256::from(30u64));
		assert_eq!(clause.to.as_deref(), Some(RECIPIENT));
		assert_eq!(clause.value.as_deref(), Some("0x1e"));
		assert_eq!(clause.data.as_deref(), Some("0x"));
	}

	#[test]
	fn test_token_transfer_clause() {
		let clause = token_transfer(ENERGY_ADDRESS, RECIPIENT, U256::from(30u64)).unwrap();
		assert_eq!(clause.to.as_deref(), Some(ENERGY_ADDRESS));
		assert_eq!(clause.value.as_deref(), Some("0x0"));

		let data = clause.data.unwrap();
		// selector + recipient word + amount word
		assert_eq!(data.len(), 2 + 8 + 64 + 64);
		assert!(data.starts_with(TRANSFER_SELECTOR));
		assert!(data.contains("5fbdb2315678afecb367f032d93f642f64180aa3"));
		assert!(data.ends_with(&format!("{:0>64}", "1e")));
	}

	#[test]
	fn test_token_transfer_rejects_bad_recipient() {
		assert!(matches!(
			token_transfer(ENERGY_ADDRESS, "0x1234", U256::from(1u64)),
			Err(EstimationError::InvalidTransaction(_))
		));
	}
}
