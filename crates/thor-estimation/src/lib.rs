//! Estimation engine for the Thor estimation workspace.
//!
//! This module computes gas costs and fees for candidate transactions and
//! resolves the circular dependency between amount, spendable balance,
//! and fees. Fees depend on the transaction's encoded amount (through
//! clause payload size and simulated execution), spendable balance
//! depends on fees, and a "send everything" request makes the amount
//! depend on the spendable balance in turn. The resolver closes that loop
//! with a bounded fixed-point iteration.

use thiserror::Error;
use thor_node::NodeError;

/// Transfer clause construction for the native and token assets.
pub mod clauses;
/// Fee calculation from gas and the chain's base gas price.
pub mod fees;
/// Intrinsic and simulated gas estimation.
pub mod gas;
/// The amount/fee/spendable fixed-point resolver.
pub mod resolver;
/// One-shot maximum spendable amount estimation.
pub mod spendable;

pub use fees::FeeCalculator;
pub use gas::GasEstimator;
pub use resolver::SpendableResolver;
pub use spendable::MaxSpendableEstimator;

/// Errors that can occur during estimation operations.
#[derive(Debug, Error)]
pub enum EstimationError {
	/// Error propagated from the node client.
	#[error("Node error: {0}")]
	Node(#[from] NodeError),
	/// Error that occurs when the node answers a single-value query with
	/// the wrong number of results or an unparseable value.
	#[error("Unexpected response: {0}")]
	UnexpectedResponse(String),
	/// Error that occurs when amount and fees fail to stabilize within
	/// the iteration bound.
	#[error("Cannot determine amount and fees")]
	AmountAndFeesUnresolvable,
	/// Error that occurs when a candidate transaction cannot be encoded.
	#[error("Invalid transaction: {0}")]
	InvalidTransaction(String),
}
