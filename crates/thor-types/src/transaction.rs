//! Transaction clauses, bodies, requests, and estimation results.
//!
//! A transaction bundles an ordered sequence of clauses, each moving value
//! and/or carrying calldata to one destination. Bodies are immutable per
//! estimation attempt: the resolver constructs a fresh body value for each
//! iteration instead of mutating state shared across iterations.

use crate::account::TokenAccount;
use crate::constants::DEFAULT_GAS_COEFFICIENT;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// One destination/value/data triplet within a transaction.
///
/// A `to` of `None` denotes contract creation, which is charged a higher
/// per-clause intrinsic fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
	/// Destination address, or `None` for contract creation.
	pub to: Option<String>,
	/// Value transferred, as a 0x-prefixed hex quantity.
	pub value: Option<String>,
	/// Calldata, as a 0x-prefixed hex string.
	pub data: Option<String>,
}

/// The clause list and pricing knob of a candidate transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
	/// Ordered clauses of the transaction.
	pub clauses: Vec<Clause>,
	/// Gas price coefficient in [0, 255]; linearly interpolates between
	/// the base gas price and the maximum tolerated gas price.
	#[serde(default)]
	pub gas_price_coef: u8,
}

impl TransactionBody {
	/// Creates a body with the given clauses and the default coefficient.
	pub fn new(clauses: Vec<Clause>) -> Self {
		Self {
			clauses,
			gas_price_coef: DEFAULT_GAS_COEFFICIENT,
		}
	}
}

/// A caller's transfer intent, as received from a higher-level flow.
///
/// The amount is kept in its wire form (a decimal string); a value that
/// does not parse as a number is the fail-soft path of the resolver, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
	/// Recipient address.
	pub recipient: String,
	/// Requested amount as a decimal string.
	pub amount: String,
	/// Whether the caller asked to send the whole spendable balance.
	#[serde(default)]
	pub use_all_amount: bool,
	/// Token sub-account to spend from, or `None` for the primary asset.
	#[serde(default)]
	pub token_account_id: Option<String>,
	/// Candidate transaction body.
	pub body: TransactionBody,
}

impl TransactionRequest {
	/// Parses the requested amount, returning `None` when it is not a
	/// valid decimal number.
	pub fn parsed_amount(&self) -> Option<U256> {
		let raw = self.amount.trim();
		if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}
		U256::from_str_radix(raw, 10).ok()
	}
}

/// A gas and fee estimate, produced fresh on every call.
///
/// Never cached: gas prices and simulated execution costs are
/// chain-state-dependent and may change between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationResult {
	/// Total estimated gas (intrinsic plus execution).
	pub estimated_gas: u64,
	/// Fee in the energy token for that gas at the requested coefficient.
	pub estimated_gas_fees: U256,
}

impl EstimationResult {
	/// A zero estimate, used on fail-soft paths.
	pub fn zero() -> Self {
		Self {
			estimated_gas: 0,
			estimated_gas_fees: U256::ZERO,
		}
	}
}

/// The converged output of a spendable resolution.
///
/// Owned exclusively by the caller after return; the resolver holds no
/// reference to it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
	/// Whether the resolution targeted a token sub-account.
	pub is_token_account: bool,
	/// The resolved amount.
	pub amount: U256,
	/// The spendable balance after fees; never negative.
	pub spendable_balance: U256,
	/// The balance of the targeted account.
	pub balance: U256,
	/// The targeted token sub-account, when any.
	pub token_account: Option<TokenAccount>,
	/// The converged fee estimate.
	pub estimated_fees: U256,
	/// The converged gas estimate.
	pub estimated_gas: u64,
}
