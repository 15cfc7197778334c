//! Account types for primary and token balances.
//!
//! On this chain a primary account holds the native asset while fees are
//! paid in a separate energy token, so a primary balance is never reduced
//! by its own fees. Token accounts hang off a primary account and pay
//! their transfer fees from their own balance.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// A primary account with its native balance and any token sub-accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
	/// The account address as a 0x-prefixed hex string.
	pub address: String,
	/// Native asset balance.
	pub balance: U256,
	/// Token sub-accounts attached to this account.
	#[serde(default)]
	pub token_accounts: Vec<TokenAccount>,
}

impl Account {
	/// Looks up a token sub-account by its identifier.
	pub fn token_account(&self, id: &str) -> Option<&TokenAccount> {
		self.token_accounts.iter().find(|t| t.id == id)
	}
}

/// A token sub-account holding a balance in a fungible token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
	/// Identifier of this sub-account within its parent.
	pub id: String,
	/// Address of the token contract.
	pub token_address: String,
	/// Token balance.
	pub balance: U256,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_token_account_lookup() {
		let account = Account {
			address: "0x0123456789012345678901234567890123456789".to_string(),
			balance: U256::from(100u64),
			token_accounts: vec![TokenAccount {
				id: "energy".to_string(),
				token_address: crate::constants::ENERGY_ADDRESS.to_string(),
				balance: U256::from(50u64),
			}],
		};

		assert!(account.token_account("energy").is_some());
		assert!(account.token_account("missing").is_none());
	}
}
