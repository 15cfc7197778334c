//! The amount/fee/spendable fixed-point resolver.
//!
//! Amount, fees, and spendable balance are mutually dependent: fees
//! follow from the candidate transaction's encoded amount, the spendable
//! balance follows from the fees, and a "send everything" request makes
//! the amount equal the spendable balance. There is no closed form, so
//! the resolver iterates: each round re-estimates fees for the current
//! candidate amount and recomputes the amount, stopping at the first
//! fixed point. The iteration is bounded as a safety valve against
//! pathological inputs; convergence normally happens within two rounds.

use crate::{clauses, EstimationError, FeeCalculator, GasEstimator};
use alloy_primitives::U256;
use std::sync::Arc;
use thor_node::NodeQueryInterface;
use thor_types::{
	is_valid_address, Account, EstimationResult, TokenAccount, TransactionBody, TransactionInfo,
	TransactionRequest,
};

/// Upper bound on resolution rounds.
const MAX_ROUNDS: usize = 5;

/// Resolves the mutually dependent amount, fees, and spendable balance
/// of a transfer request.
pub struct SpendableResolver {
	gas: GasEstimator,
	fees: FeeCalculator,
}

impl SpendableResolver {
	/// Creates a new SpendableResolver backed by the given node client.
	pub fn new(node: Arc<dyn NodeQueryInterface>) -> Self {
		Self {
			gas: GasEstimator::new(Arc::clone(&node)),
			fees: FeeCalculator::new(node),
		}
	}

	/// Estimates gas and fees for one candidate transfer.
	///
	/// Builds the transfer clauses for the requested asset, estimates
	/// total gas, and prices it at the request's gas price coefficient.
	/// A missing or malformed recipient yields a zero estimate rather
	/// than an error; the request is simply not estimable yet.
	pub async fn calculate_gas_fees(
		&self,
		request: &TransactionRequest,
		token_account: Option<&TokenAccount>,
		caller: Option<&str>,
	) -> Result<EstimationResult, EstimationError> {
		if !is_valid_address(&request.recipient) {
			return Ok(EstimationResult::zero());
		}

		let amount = request.parsed_amount().unwrap_or(U256::ZERO);
		let transfer = match token_account {
			Some(token) => clauses::token_transfer(&token.token_address, &request.recipient, amount)?,
			None => clauses::native_transfer(&request.recipient, amount),
		};

		let body = TransactionBody {
			clauses: vec![transfer],
			gas_price_coef: request.body.gas_price_coef,
		};
		let estimated_gas = self.gas.estimate(&body, caller).await?;
		let estimated_gas_fees = self
			.fees
			.calculate_fee(estimated_gas, body.gas_price_coef)
			.await?;

		Ok(EstimationResult {
			estimated_gas,
			estimated_gas_fees,
		})
	}

	/// Resolves the amount, fees, and spendable balance of a request.
	///
	/// A non-numeric requested amount is the fail-soft path: no
	/// estimation happens and the account balance passes through with
	/// zero fees. Otherwise the resolver runs at least one full round
	/// (fees must be computed once even when the amount cannot change)
	/// and at most [`MAX_ROUNDS`], failing with
	/// [`EstimationError::AmountAndFeesUnresolvable`] when no round
	/// reaches a fixed point.
	///
	/// `fixed_fees` skips estimation entirely, for callers that already
	/// hold a known-stable gas/fee pair.
	pub async fn resolve(
		&self,
		account: &Account,
		request: &TransactionRequest,
		fixed_fees: Option<EstimationResult>,
	) -> Result<TransactionInfo, EstimationError> {
		let token_account = request
			.token_account_id
			.as_deref()
			.and_then(|id| account.token_account(id))
			.cloned();
		let is_token_account = token_account.is_some();

		let requested = match request.parsed_amount() {
			Some(amount) => amount,
			None => {
				return Ok(TransactionInfo {
					is_token_account,
					amount: U256::ZERO,
					spendable_balance: account.balance,
					balance: account.balance,
					token_account,
					estimated_fees: U256::ZERO,
					estimated_gas: 0,
				});
			}
		};

		let mut amount = requested;
		let mut balance = account.balance;
		let mut spendable_balance = account.balance;
		let mut estimate = EstimationResult::zero();
		let mut converged = false;

		for round in 0..MAX_ROUNDS {
			let previous = amount;

			// Fresh candidate per round; no state shared across rounds
			let candidate = TransactionRequest {
				amount: amount.to_string(),
				..request.clone()
			};
			estimate = match fixed_fees {
				Some(fixed) => fixed,
				None => {
					self.calculate_gas_fees(
						&candidate,
						token_account.as_ref(),
						Some(&account.address),
					)
					.await?
				}
			};

			match &token_account {
				Some(token) => {
					balance = token.balance;
					spendable_balance = token.balance.saturating_sub(estimate.estimated_gas_fees);
				}
				None => {
					// Native fees are paid in the energy token, so the
					// primary balance is never reduced by its own fee
					balance = account.balance;
					spendable_balance = account.balance;
				}
			}

			amount = if request.use_all_amount {
				spendable_balance
			} else {
				requested
			};

			tracing::debug!(
				round,
				amount = %amount,
				fees = %estimate.estimated_gas_fees,
				"Resolution round"
			);

			if amount == previous {
				converged = true;
				break;
			}
		}

		if !converged {
			return Err(EstimationError::AmountAndFeesUnresolvable);
		}

		Ok(TransactionInfo {
			is_token_account,
			amount,
			spendable_balance,
			balance,
			token_account,
			estimated_fees: estimate.estimated_gas_fees,
			estimated_gas: estimate.estimated_gas,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use thor_node::implementations::mock::{MockNodeConfig, MockNodeQuery};
	use thor_types::ENERGY_ADDRESS;

	const RECIPIENT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

	fn account_with_token(balance: u64, token_balance: u64) -> Account {
		Account {
			address: "0x0123456789012345678901234567890123456789".to_string(),
			balance: U256::from(balance),
			token_accounts: vec![TokenAccount {
				id: "energy".to_string(),
				token_address: ENERGY_ADDRESS.to_string(),
				balance: U256::from(token_balance),
			}],
		}
	}

	fn request(amount: &str, use_all: bool, token: bool) -> TransactionRequest {
		TransactionRequest {
			recipient: RECIPIENT.to_string(),
			amount: amount.to_string(),
			use_all_amount: use_all,
			token_account_id: token.then(|| "energy".to_string()),
			body: TransactionBody::new(vec![]),
		}
	}

	fn fixed(fee: u64) -> EstimationResult {
		EstimationResult {
			estimated_gas: 21000,
			estimated_gas_fees: U256::from(fee),
		}
	}

	fn make_resolver(config: MockNodeConfig) -> (SpendableResolver, Arc<MockNodeQuery>) {
		let mock = Arc::new(MockNodeQuery::new(config));
		(
			SpendableResolver::new(Arc::clone(&mock) as Arc<dyn NodeQueryInterface>),
			mock,
		)
	}

	#[tokio::test]
	async fn test_fixed_amount_converges_in_one_round() {
		// token balance 100, amount 30, fee 5: spendable floors to 95
		let (resolver, _) = make_resolver(MockNodeConfig::default());
		let account = account_with_token(1000, 100);

		let info = resolver
			.resolve(&account, &request("30", false, true), Some(fixed(5)))
			.await
			.unwrap();

		assert!(info.is_token_account);
		assert_eq!(info.amount, U256::from(30u64));
		assert_eq!(info.balance, U256::from(100u64));
		assert_eq!(info.spendable_balance, U256::from(95u64));
		assert_eq!(info.estimated_fees, U256::from(5u64));
		assert_eq!(info.estimated_gas, 21000);
	}

	#[tokio::test]
	async fn test_use_all_amount_converges_to_spendable() {
		// token balance 50, stable fee 8: amount settles at 42
		let (resolver, _) = make_resolver(MockNodeConfig::default());
		let account = account_with_token(1000, 50);

		let info = resolver
			.resolve(&account, &request("0", true, true), Some(fixed(8)))
			.await
			.unwrap();

		assert_eq!(info.amount, U256::from(42u64));
		assert_eq!(info.spendable_balance, U256::from(42u64));
	}

	#[tokio::test]
	async fn test_non_numeric_amount_passes_through() {
		let (resolver, mock) = make_resolver(MockNodeConfig::default());
		let account = account_with_token(1000, 50);

		let info = resolver
			.resolve(&account, &request("not-a-number", false, true), None)
			.await
			.unwrap();

		assert_eq!(info.estimated_fees, U256::ZERO);
		assert_eq!(info.estimated_gas, 0);
		assert_eq!(info.balance, U256::from(1000u64));
		assert_eq!(info.spendable_balance, U256::from(1000u64));
		// no estimation happened
		assert_eq!(mock.simulations_served(), 0);
	}

	#[tokio::test]
	async fn test_spendable_floors_at_zero() {
		let (resolver, _) = make_resolver(MockNodeConfig::default());
		let account = account_with_token(1000, 5);

		let info = resolver
			.resolve(&account, &request("1", false, true), Some(fixed(8)))
			.await
			.unwrap();

		assert_eq!(info.spendable_balance, U256::ZERO);
	}

	#[tokio::test]
	async fn test_primary_balance_not_reduced_by_fee() {
		let (resolver, _) = make_resolver(MockNodeConfig::default());
		let account = account_with_token(100, 0);

		let info = resolver
			.resolve(&account, &request("30", false, false), Some(fixed(5)))
			.await
			.unwrap();

		assert!(!info.is_token_account);
		assert_eq!(info.amount, U256::from(30u64));
		assert_eq!(info.balance, U256::from(100u64));
		assert_eq!(info.spendable_balance, U256::from(100u64));
		assert_eq!(info.estimated_fees, U256::from(5u64));
	}

	#[tokio::test]
	async fn test_oscillating_fee_fails_at_round_five() {
		// execution gas alternates every round, so the use-all amount
		// never stabilizes
		let (resolver, mock) = make_resolver(MockNodeConfig {
			gas_used: vec![1000, 2000, 1000, 2000, 1000],
			base_gas_price: "0x1".to_string(),
			..MockNodeConfig::default()
		});
		let account = account_with_token(1000, 1_000_000);

		let err = resolver
			.resolve(&account, &request("0", true, true), None)
			.await
			.unwrap_err();

		assert!(matches!(err, EstimationError::AmountAndFeesUnresolvable));
		assert_eq!(mock.simulations_served(), 5);
	}

	#[tokio::test]
	async fn test_convergence_on_fifth_round_succeeds() {
		// fees move for four rounds and repeat on the fifth
		let (resolver, mock) = make_resolver(MockNodeConfig {
			gas_used: vec![1000, 2000, 3000, 4000],
			base_gas_price: "0x1".to_string(),
			..MockNodeConfig::default()
		});
		let account = account_with_token(1000, 1_000_000);

		let info = resolver
			.resolve(&account, &request("0", true, true), None)
			.await
			.unwrap();

		assert_eq!(info.amount, info.spendable_balance);
		assert_eq!(info.amount, U256::from(958_000u64));
		assert_eq!(mock.simulations_served(), 5);
	}

	#[tokio::test]
	async fn test_resolution_is_idempotent() {
		let (resolver, _) = make_resolver(MockNodeConfig {
			gas_used: vec![500],
			..MockNodeConfig::default()
		});
		let account = account_with_token(1000, 5_000_000_000_000_000_000u64);
		let req = request("30", false, true);

		let first = resolver.resolve(&account, &req, None).await.unwrap();
		let second = resolver.resolve(&account, &req, None).await.unwrap();

		assert_eq!(first, second);
		assert!(first.estimated_fees > U256::ZERO);
	}

	#[tokio::test]
	async fn test_simulation_failure_propagates() {
		let (resolver, _) = make_resolver(MockNodeConfig {
			fail_simulation: true,
			..MockNodeConfig::default()
		});
		let account = account_with_token(1000, 100);

		assert!(matches!(
			resolver
				.resolve(&account, &request("30", false, true), None)
				.await,
			Err(EstimationError::Node(_))
		));
	}

	#[tokio::test]
	async fn test_invalid_recipient_yields_zero_estimate() {
		let (resolver, mock) = make_resolver(MockNodeConfig::default());
		let mut req = request("30", false, true);
		req.recipient = "0x1234".to_string();

		let estimate = resolver
			.calculate_gas_fees(&req, None, None)
			.await
			.unwrap();

		assert_eq!(estimate, EstimationResult::zero());
		assert_eq!(mock.simulations_served(), 0);
	}
}
