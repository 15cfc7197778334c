//! Wire types exchanged with a Thorest-style node.
//!
//! These structures mirror the JSON payloads of the node's REST API. They
//! are defined here rather than in the node crate so that the estimation
//! engine can consume simulation outputs without depending on a concrete
//! client implementation.

use crate::transaction::Clause;
use serde::{Deserialize, Serialize};

/// A clause reformatted for a simulation request.
///
/// Missing values default to `"0x0"` and missing data to `"0x"` so that
/// the node always receives well-formed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClause {
	/// Destination address, or `None` for contract creation.
	pub to: Option<String>,
	/// Value transferred, as a 0x-prefixed hex quantity.
	pub value: String,
	/// Calldata, as a 0x-prefixed hex string.
	pub data: String,
}

impl From<&Clause> for SimulationClause {
	fn from(clause: &Clause) -> Self {
		Self {
			to: clause.to.clone(),
			value: clause.value.clone().unwrap_or_else(|| "0x0".to_string()),
			data: clause.data.clone().unwrap_or_else(|| "0x".to_string()),
		}
	}
}

/// The simulated outcome of one clause.
///
/// The node returns exactly one output per input clause, order preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
	/// Returned data, as a 0x-prefixed hex string.
	pub data: String,
	/// Gas consumed by simulated execution of this clause.
	pub gas_used: u64,
	/// Whether the clause reverted during simulation.
	#[serde(default)]
	pub reverted: bool,
	/// VM error message, empty on success.
	#[serde(default)]
	pub vm_error: String,
}

/// Snapshot of an account's on-chain state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
	/// Native asset balance as a 0x-prefixed hex quantity.
	pub balance: String,
	/// Energy token balance as a 0x-prefixed hex quantity.
	pub energy: String,
	/// Whether the address holds contract code.
	#[serde(default)]
	pub has_code: bool,
}

/// Summary of the best block, used for height and block-ref derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
	/// Block identifier as a 0x-prefixed hex string.
	pub id: String,
	/// Block height.
	pub number: u64,
	/// Unix timestamp of the block.
	#[serde(default)]
	pub timestamp: u64,
	/// Identifier of the parent block.
	#[serde(default)]
	pub parent_id: String,
}

impl BlockSummary {
	/// Derives the block ref used in transaction bodies: the first eight
	/// bytes of the block id (18 characters with the prefix). Never
	/// panics, even on ids that are not well-formed hex.
	pub fn block_ref(&self) -> String {
		self.id.chars().take(18).collect()
	}
}
