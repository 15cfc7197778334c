//! Mock node client for testing and development.
//!
//! This implementation answers queries from scripted data instead of a
//! live node. Simulation responses follow a configurable gas schedule so
//! consumers can exercise convergence behavior, and failures can be
//! injected to test propagation paths.

use crate::{NodeError, NodeQueryInterface};
use alloy_primitives::U256;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use thor_types::{
	without_0x_prefix, AccountState, BlockSummary, ConfigSchema, SimulationClause,
	SimulationOutput, ValidationError, PARAMS_ADDRESS, PARAMS_GET_SELECTOR,
};

/// Configuration for the mock node client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockNodeConfig {
	/// Whether this mock is enabled.
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	/// Execution gas returned per simulation call, in order. The last
	/// entry repeats once the schedule is exhausted.
	#[serde(default = "default_gas_used")]
	pub gas_used: Vec<u64>,
	/// Base gas price word returned for Params contract reads.
	#[serde(default = "default_base_gas_price")]
	pub base_gas_price: String,
	/// Version the mock node reports, used for revision selection.
	#[serde(default = "default_node_version")]
	pub node_version: String,
	/// When set, every simulation call fails with a network error.
	#[serde(default)]
	pub fail_simulation: bool,
	/// Native balance reported for any account.
	#[serde(default = "default_quantity")]
	pub balance: String,
	/// Energy balance reported for any account.
	#[serde(default = "default_quantity")]
	pub energy: String,
}

fn default_enabled() -> bool {
	true
}

fn default_gas_used() -> Vec<u64> {
	vec![0]
}

fn default_base_gas_price() -> String {
	// 1e13, the chain's launch-time base gas price
	"0x09184e72a000".to_string()
}

fn default_node_version() -> String {
	"2.1.3".to_string()
}

fn default_quantity() -> String {
	"0x0".to_string()
}

impl Default for MockNodeConfig {
	fn default() -> Self {
		Self {
			enabled: default_enabled(),
			gas_used: default_gas_used(),
			base_gas_price: default_base_gas_price(),
			node_version: default_node_version(),
			fail_simulation: false,
			balance: default_quantity(),
			energy: default_quantity(),
		}
	}
}

impl ConfigSchema for MockNodeConfig {
	fn validate(&self, _config: &toml::Value) -> Result<(), ValidationError> {
		if !self.enabled {
			return Err(ValidationError::InvalidValue {
				field: "enabled".to_string(),
				message: "Mock node client is disabled".to_string(),
			});
		}
		if self.gas_used.is_empty() {
			return Err(ValidationError::InvalidValue {
				field: "gas_used".to_string(),
				message: "gas_used schedule cannot be empty".to_string(),
			});
		}
		Ok(())
	}
}

/// Mock node client answering from scripted data.
pub struct MockNodeQuery {
	config: MockNodeConfig,
	/// Count of execution simulations served, driving the gas schedule.
	/// Params contract reads do not advance it.
	simulations: AtomicUsize,
}

impl MockNodeQuery {
	/// Creates a new mock node client with the given configuration.
	pub fn new(config: MockNodeConfig) -> Self {
		Self {
			config,
			simulations: AtomicUsize::new(0),
		}
	}

	/// Whether a clause batch is a base-gas-price read against the
	/// built-in Params contract.
	fn is_params_read(clauses: &[SimulationClause]) -> bool {
		clauses.len() == 1
			&& clauses[0].to.as_deref() == Some(PARAMS_ADDRESS)
			&& clauses[0].data.starts_with(PARAMS_GET_SELECTOR)
	}

	/// Next execution gas from the schedule; the last entry repeats.
	fn next_gas(&self) -> u64 {
		let index = self.simulations.fetch_add(1, Ordering::SeqCst);
		let schedule = &self.config.gas_used;
		schedule[index.min(schedule.len() - 1)]
	}

	/// Number of execution simulations served so far. Params contract
	/// reads are not counted.
	pub fn simulations_served(&self) -> usize {
		self.simulations.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl NodeQueryInterface for MockNodeQuery {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(self.config.clone())
	}

	async fn simulate(
		&self,
		clauses: &[SimulationClause],
		_caller: Option<&str>,
	) -> Result<Vec<SimulationOutput>, NodeError> {
		if self.config.fail_simulation {
			return Err(NodeError::Network("mock simulation failure".to_string()));
		}

		if Self::is_params_read(clauses) {
			let word = format!("0x{:0>64}", without_0x_prefix(&self.config.base_gas_price));
			return Ok(vec![SimulationOutput {
				data: word,
				gas_used: 0,
				reverted: false,
				vm_error: String::new(),
			}]);
		}

		// Attribute the scheduled gas to the first clause output
		let gas = self.next_gas();
		Ok(clauses
			.iter()
			.enumerate()
			.map(|(i, _)| SimulationOutput {
				data: "0x".to_string(),
				gas_used: if i == 0 { gas } else { 0 },
				reverted: false,
				vm_error: String::new(),
			})
			.collect())
	}

	async fn get_account(&self, _address: &str) -> Result<AccountState, NodeError> {
		Ok(AccountState {
			balance: self.config.balance.clone(),
			energy: self.config.energy.clone(),
			has_code: false,
		})
	}

	async fn get_best_block(&self) -> Result<BlockSummary, NodeError> {
		Ok(BlockSummary {
			id: "0x0134a4e6f1e9b6c2f575e66f3c8bbbd8bc303b30587f45e67e6a0e5b4f6c7a10"
				.to_string(),
			number: 20227302,
			timestamp: 0,
			parent_id: String::new(),
		})
	}

	async fn get_block_ref(&self) -> Result<String, NodeError> {
		Ok(self.get_best_block().await?.block_ref())
	}

	async fn submit(&self, _raw_tx: &str) -> Result<String, NodeError> {
		Ok("0x6d6f636b2d7472616e73616374696f6e2d6964000000000000000000000000".to_string())
	}

	async fn get_transaction_fees(&self, _tx_id: &str) -> Result<U256, NodeError> {
		Ok(U256::ZERO)
	}
}

/// Registry for the mock node client implementation.
pub struct Registry;

impl thor_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "mock";
	type Factory = crate::NodeQueryFactory;

	fn factory() -> Self::Factory {
		|config: &toml::Value| -> Result<Box<dyn NodeQueryInterface>, NodeError> {
			let mock_config: MockNodeConfig = config.clone().try_into().map_err(|e| {
				NodeError::Configuration(format!("Invalid mock config: {}", e))
			})?;

			Ok(Box::new(MockNodeQuery::new(mock_config)))
		}
	}
}

impl crate::NodeQueryRegistry for Registry {}
