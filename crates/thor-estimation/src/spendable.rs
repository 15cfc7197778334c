//! One-shot maximum spendable amount estimation.
//!
//! Answers "what is the most this account can send" without the full
//! fixed-point resolution. Native fees are paid in the energy token, so
//! a primary account can always send its whole balance; only a token
//! account needs a fee estimate subtracted, and a single estimate
//! suffices because the transfer payload size barely depends on the
//! amount.

use crate::{EstimationError, SpendableResolver};
use alloy_primitives::U256;
use std::sync::Arc;
use thor_node::NodeQueryInterface;
use thor_types::{Account, TokenAccount, TransactionRequest};

/// Estimates the maximum spendable amount of an account.
pub struct MaxSpendableEstimator {
	resolver: SpendableResolver,
}

impl MaxSpendableEstimator {
	/// Creates a new MaxSpendableEstimator backed by the given node
	/// client.
	pub fn new(node: Arc<dyn NodeQueryInterface>) -> Self {
		Self {
			resolver: SpendableResolver::new(node),
		}
	}

	/// Estimates the maximum amount spendable from an account.
	///
	/// A primary target returns the account balance unchanged, as does a
	/// token target without a candidate request (nothing to estimate
	/// against). A token target with a request gets one fee estimate
	/// subtracted, floored at zero.
	pub async fn estimate_max_spendable(
		&self,
		account: &Account,
		token_account: Option<&TokenAccount>,
		request: Option<&TransactionRequest>,
	) -> Result<U256, EstimationError> {
		let (token, request) = match (token_account, request) {
			(Some(token), Some(request)) => (token, request),
			(Some(token), None) => return Ok(token.balance),
			(None, _) => return Ok(account.balance),
		};

		let estimate = self
			.resolver
			.calculate_gas_fees(request, Some(token), Some(&account.address))
			.await?;

		Ok(token.balance.saturating_sub(estimate.estimated_gas_fees))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use thor_node::implementations::mock::{MockNodeConfig, MockNodeQuery};
	use thor_types::{TransactionBody, ENERGY_ADDRESS};

	const RECIPIENT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

	fn estimator(config: MockNodeConfig) -> MaxSpendableEstimator {
		MaxSpendableEstimator::new(Arc::new(MockNodeQuery::new(config)))
	}

	fn account(balance: u64) -> Account {
		Account {
			address: "0x0123456789012345678901234567890123456789".to_string(),
			balance: U256::from(balance),
			token_accounts: vec![],
		}
	}

	fn token(balance: u64) -> TokenAccount {
		TokenAccount {
			id: "energy".to_string(),
			token_address: ENERGY_ADDRESS.to_string(),
			balance: U256::from(balance),
		}
	}

	fn transfer_request(amount: &str) -> TransactionRequest {
		TransactionRequest {
			recipient: RECIPIENT.to_string(),
			amount: amount.to_string(),
			use_all_amount: false,
			token_account_id: Some("energy".to_string()),
			body: TransactionBody::new(vec![]),
		}
	}

	#[tokio::test]
	async fn test_primary_account_returns_balance() {
		let estimator = estimator(MockNodeConfig::default());
		let request = transfer_request("30");

		let max = estimator
			.estimate_max_spendable(&account(100), None, Some(&request))
			.await
			.unwrap();

		assert_eq!(max, U256::from(100u64));
	}

	#[tokio::test]
	async fn test_token_account_without_request_returns_balance() {
		let estimator = estimator(MockNodeConfig::default());

		let max = estimator
			.estimate_max_spendable(&account(100), Some(&token(50)), None)
			.await
			.unwrap();

		assert_eq!(max, U256::from(50u64));
	}

	#[tokio::test]
	async fn test_token_account_subtracts_fee() {
		// base price 1 at coefficient 0 makes the fee equal the gas:
		// 21000 intrinsic + 1872 for the transfer calldata bytes
		let estimator = estimator(MockNodeConfig {
			base_gas_price: "0x1".to_string(),
			..MockNodeConfig::default()
		});
		let request = transfer_request("30");

		let max = estimator
			.estimate_max_spendable(&account(100), Some(&token(50_000)), Some(&request))
			.await
			.unwrap();

		assert_eq!(max, U256::from(50_000 - 22_872u64));
	}

	#[tokio::test]
	async fn test_token_balance_below_fee_floors_at_zero() {
		let estimator = estimator(MockNodeConfig {
			base_gas_price: "0x1".to_string(),
			..MockNodeConfig::default()
		});
		let request = transfer_request("30");

		let max = estimator
			.estimate_max_spendable(&account(100), Some(&token(10)), Some(&request))
			.await
			.unwrap();

		assert_eq!(max, U256::ZERO);
	}
}
