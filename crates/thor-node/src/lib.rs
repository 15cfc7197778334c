//! Node query module for the Thor estimation workspace.
//!
//! This module handles read-only interaction with a Thorest-style ledger
//! node: clause simulation, account state, best-block queries, and
//! transaction submission. It provides a trait-based abstraction so the
//! estimation engine can run against a live node or a deterministic mock.

use alloy_primitives::U256;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use thor_types::{
	AccountState, BlockSummary, ConfigSchema, ImplementationRegistry, SimulationClause,
	SimulationOutput,
};

pub mod revision;

/// Re-export implementations
pub mod implementations {
	pub mod mock;
	pub mod http {
		pub mod thorest;
	}
}

pub use revision::Revision;

/// Errors that can occur during node query operations.
#[derive(Debug, Error)]
pub enum NodeError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the node returns a malformed payload.
	#[error("Unexpected response: {0}")]
	UnexpectedResponse(String),
	/// Error that occurs when configuration is invalid.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the interface for node query implementations.
///
/// This trait must be implemented by any node client that wants to back
/// the estimation engine. All operations are read-only except `submit`;
/// none of them retries internally, and transport errors surface
/// immediately as [`NodeError::Network`].
#[async_trait]
pub trait NodeQueryInterface: Send + Sync {
	/// Returns the configuration schema for this node client
	/// implementation.
	///
	/// This allows each implementation to define its own configuration
	/// requirements with specific validation rules. The schema is used to
	/// validate TOML configuration before initializing the client.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Simulates the execution of a batch of clauses against current
	/// chain state.
	///
	/// Returns one output per input clause, order preserved. The state
	/// revision the simulation targets is chosen per call from the node's
	/// reported version; see [`Revision::for_version`].
	async fn simulate(
		&self,
		clauses: &[SimulationClause],
		caller: Option<&str>,
	) -> Result<Vec<SimulationOutput>, NodeError>;

	/// Fetches the on-chain state of an account.
	async fn get_account(&self, address: &str) -> Result<AccountState, NodeError>;

	/// Fetches a summary of the best (most recent) block.
	async fn get_best_block(&self) -> Result<BlockSummary, NodeError>;

	/// Derives the block ref of the best block, for use in transaction
	/// bodies.
	async fn get_block_ref(&self) -> Result<String, NodeError>;

	/// Submits a raw signed transaction and returns its id.
	async fn submit(&self, raw_tx: &str) -> Result<String, NodeError>;

	/// Returns the fee paid by a settled transaction, or zero when the
	/// receipt carries no payment.
	async fn get_transaction_fees(&self, tx_id: &str) -> Result<U256, NodeError>;
}

/// Type alias for node client factory functions.
///
/// This is the function signature that all node client implementations
/// must provide to create instances of their interface.
pub type NodeQueryFactory = fn(&toml::Value) -> Result<Box<dyn NodeQueryInterface>, NodeError>;

/// Registry trait for node client implementations.
pub trait NodeQueryRegistry: ImplementationRegistry<Factory = NodeQueryFactory> {}

/// Get all registered node client implementations.
///
/// Returns a vector of (name, factory) tuples for all available node
/// client implementations.
pub fn get_all_implementations() -> Vec<(&'static str, NodeQueryFactory)> {
	use implementations::{http::thorest, mock};

	vec![
		(thorest::Registry::NAME, thorest::Registry::factory()),
		(mock::Registry::NAME, mock::Registry::factory()),
	]
}

/// Service that fronts the configured node client implementations.
///
/// The NodeQueryService holds the named implementations constructed from
/// configuration and routes every query to the primary one.
pub struct NodeQueryService {
	/// Map of implementation names to their interfaces.
	implementations: HashMap<String, Arc<dyn NodeQueryInterface>>,
	/// The primary implementation to use for queries.
	primary_implementation: String,
}

impl NodeQueryService {
	/// Creates a new NodeQueryService with the given implementations.
	///
	/// Fails with a configuration error when the primary implementation
	/// is not among the available ones.
	pub fn new(
		implementations: HashMap<String, Arc<dyn NodeQueryInterface>>,
		primary_implementation: String,
	) -> Result<Self, NodeError> {
		if !implementations.contains_key(&primary_implementation) {
			return Err(NodeError::Configuration(format!(
				"Primary implementation '{}' not found in available implementations",
				primary_implementation
			)));
		}

		Ok(Self {
			implementations,
			primary_implementation,
		})
	}

	/// Returns the primary node client.
	pub fn primary(&self) -> Arc<dyn NodeQueryInterface> {
		// Presence is checked at construction
		Arc::clone(&self.implementations[&self.primary_implementation])
	}

	/// Simulates clauses through the primary node client.
	pub async fn simulate(
		&self,
		clauses: &[SimulationClause],
		caller: Option<&str>,
	) -> Result<Vec<SimulationOutput>, NodeError> {
		self.primary().simulate(clauses, caller).await
	}

	/// Fetches account state through the primary node client.
	pub async fn get_account(&self, address: &str) -> Result<AccountState, NodeError> {
		self.primary().get_account(address).await
	}

	/// Fetches the best block through the primary node client.
	pub async fn get_best_block(&self) -> Result<BlockSummary, NodeError> {
		self.primary().get_best_block().await
	}

	/// Submits a raw transaction through the primary node client.
	pub async fn submit(&self, raw_tx: &str) -> Result<String, NodeError> {
		self.primary().submit(raw_tx).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use implementations::mock::{MockNodeConfig, MockNodeQuery};

	#[test]
	fn test_service_rejects_unknown_primary() {
		let mut implementations: HashMap<String, Arc<dyn NodeQueryInterface>> = HashMap::new();
		implementations.insert(
			"mock".to_string(),
			Arc::new(MockNodeQuery::new(MockNodeConfig::default())),
		);

		assert!(matches!(
			NodeQueryService::new(implementations, "thorest".to_string()),
			Err(NodeError::Configuration(_))
		));
	}

	#[tokio::test]
	async fn test_service_routes_to_primary() {
		let mut implementations: HashMap<String, Arc<dyn NodeQueryInterface>> = HashMap::new();
		implementations.insert(
			"mock".to_string(),
			Arc::new(MockNodeQuery::new(MockNodeConfig::default())),
		);

		let service = NodeQueryService::new(implementations, "mock".to_string()).unwrap();
		let block = service.get_best_block().await.unwrap();
		assert!(block.number > 0);
	}
}
