//! Thorest REST client implementation.
//!
//! This module provides the concrete NodeQueryInterface implementation
//! for live nodes, speaking the Thorest HTTP API over reqwest. The
//! transport owns timeout policy; no call retries internally.

use crate::{NodeError, NodeQueryInterface, Revision};
use alloy_primitives::U256;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thor_types::{
	parse_hex_quantity, AccountState, BlockSummary, ConfigSchema, Field, FieldType, Schema,
	SimulationClause, SimulationOutput, ValidationError, VERSION_HEADER,
};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Request body of a simulation query.
#[derive(Debug, Serialize)]
struct SimulationRequest<'a> {
	clauses: &'a [SimulationClause],
	#[serde(skip_serializing_if = "Option::is_none")]
	caller: Option<&'a str>,
}

/// Request body of a raw transaction submission.
#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
	raw: &'a str,
}

/// Response body of a raw transaction submission.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
	#[serde(default)]
	id: Option<String>,
}

/// Transaction receipt fields consumed by this client.
#[derive(Debug, Deserialize)]
struct ReceiptResponse {
	#[serde(default)]
	paid: Option<String>,
}

/// HTTP client for a Thorest-style node.
///
/// Holds a single reqwest client and the node's base URL. Revision
/// selection happens per simulation call from the node's reported
/// version header, since the supported revision can change when the node
/// behind the URL is upgraded.
pub struct ThorestClient {
	client: reqwest::Client,
	base_url: String,
}

impl ThorestClient {
	/// Creates a new ThorestClient for the given base URL.
	pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, NodeError> {
		let client = reqwest::Client::builder()
			.timeout(std::time::Duration::from_secs(timeout_secs))
			.build()
			.map_err(|e| NodeError::Network(format!("Failed to build HTTP client: {}", e)))?;

		Ok(Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
		})
	}

	/// Probes the best block and chooses the simulation revision from the
	/// node's version header.
	async fn resolve_revision(&self) -> Result<Revision, NodeError> {
		let response = self
			.client
			.get(format!("{}/blocks/best", self.base_url))
			.send()
			.await
			.map_err(|e| NodeError::Network(format!("Failed to query best block: {}", e)))?
			.error_for_status()
			.map_err(|e| NodeError::Network(format!("Best block query failed: {}", e)))?;

		let reported = response
			.headers()
			.get(VERSION_HEADER)
			.and_then(|value| value.to_str().ok())
			.map(|value| value.to_string());

		Ok(Revision::for_version(reported.as_deref()))
	}
}

/// Configuration schema for the Thorest client.
pub struct ThorestClientSchema;

impl ThorestClientSchema {
	/// Static validation method for use before instance creation
	pub fn validate_config(config: &toml::Value) -> Result<(), ValidationError> {
		let instance = Self;
		instance.validate(config)
	}
}

impl ConfigSchema for ThorestClientSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![
				Field::new("base_url", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
							Ok(())
						}
						Some(_) => Err("base_url must be an http(s) URL".to_string()),
						None => Err("base_url must be a string".to_string()),
					}
				}),
			],
			vec![Field::new(
				"timeout_secs",
				FieldType::Integer {
					min: Some(1),
					max: Some(600),
				},
			)],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl NodeQueryInterface for ThorestClient {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(ThorestClientSchema)
	}

	async fn simulate(
		&self,
		clauses: &[SimulationClause],
		caller: Option<&str>,
	) -> Result<Vec<SimulationOutput>, NodeError> {
		let revision = self.resolve_revision().await?;
		tracing::debug!(revision = %revision, clauses = clauses.len(), "Simulating clauses");

		let outputs: Vec<SimulationOutput> = self
			.client
			.post(format!(
				"{}/accounts/*?revision={}",
				self.base_url, revision
			))
			.json(&SimulationRequest { clauses, caller })
			.send()
			.await
			.map_err(|e| NodeError::Network(format!("Failed to simulate clauses: {}", e)))?
			.error_for_status()
			.map_err(|e| NodeError::Network(format!("Simulation failed: {}", e)))?
			.json()
			.await
			.map_err(|e| {
				NodeError::UnexpectedResponse(format!("Malformed simulation response: {}", e))
			})?;

		Ok(outputs)
	}

	async fn get_account(&self, address: &str) -> Result<AccountState, NodeError> {
		self.client
			.get(format!("{}/accounts/{}", self.base_url, address))
			.send()
			.await
			.map_err(|e| NodeError::Network(format!("Failed to query account: {}", e)))?
			.error_for_status()
			.map_err(|e| NodeError::Network(format!("Account query failed: {}", e)))?
			.json()
			.await
			.map_err(|e| NodeError::UnexpectedResponse(format!("Malformed account state: {}", e)))
	}

	async fn get_best_block(&self) -> Result<BlockSummary, NodeError> {
		self.client
			.get(format!("{}/blocks/best", self.base_url))
			.send()
			.await
			.map_err(|e| NodeError::Network(format!("Failed to query best block: {}", e)))?
			.error_for_status()
			.map_err(|e| NodeError::Network(format!("Best block query failed: {}", e)))?
			.json()
			.await
			.map_err(|e| NodeError::UnexpectedResponse(format!("Malformed block summary: {}", e)))
	}

	async fn get_block_ref(&self) -> Result<String, NodeError> {
		Ok(self.get_best_block().await?.block_ref())
	}

	async fn submit(&self, raw_tx: &str) -> Result<String, NodeError> {
		let response: SubmitResponse = self
			.client
			.post(format!("{}/transactions", self.base_url))
			.json(&SubmitRequest { raw: raw_tx })
			.send()
			.await
			.map_err(|e| NodeError::Network(format!("Failed to submit transaction: {}", e)))?
			.error_for_status()
			.map_err(|e| NodeError::Network(format!("Transaction submission failed: {}", e)))?
			.json()
			.await
			.map_err(|e| {
				NodeError::UnexpectedResponse(format!("Malformed submission response: {}", e))
			})?;

		let id = response.id.ok_or_else(|| {
			NodeError::UnexpectedResponse("Expected an id to be returned".to_string())
		})?;
		tracing::info!(tx_id = %id, "Submitted transaction");

		Ok(id)
	}

	async fn get_transaction_fees(&self, tx_id: &str) -> Result<U256, NodeError> {
		let receipt: ReceiptResponse = self
			.client
			.get(format!(
				"{}/transactions/{}/receipt",
				self.base_url, tx_id
			))
			.send()
			.await
			.map_err(|e| NodeError::Network(format!("Failed to query receipt: {}", e)))?
			.error_for_status()
			.map_err(|e| NodeError::Network(format!("Receipt query failed: {}", e)))?
			.json()
			.await
			.map_err(|e| NodeError::UnexpectedResponse(format!("Malformed receipt: {}", e)))?;

		match receipt.paid {
			Some(paid) => parse_hex_quantity(&paid).ok_or_else(|| {
				NodeError::UnexpectedResponse(format!("Invalid paid amount: {}", paid))
			}),
			None => Ok(U256::ZERO),
		}
	}
}

/// Factory function to create a Thorest client from configuration.
///
/// # Parameters
/// - `config`: TOML configuration containing:
///   - `base_url` (required): the node's Thorest endpoint
///   - `timeout_secs` (optional): HTTP request timeout, default 30
///
/// # Returns
/// A boxed implementation of NodeQueryInterface for the configured node
pub fn create_thorest_client(
	config: &toml::Value,
) -> Result<Box<dyn NodeQueryInterface>, NodeError> {
	ThorestClientSchema::validate_config(config)
		.map_err(|e| NodeError::Configuration(format!("Invalid configuration: {}", e)))?;

	let base_url = config
		.get("base_url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| NodeError::Configuration("base_url is required".to_string()))?;

	let timeout_secs = config
		.get("timeout_secs")
		.and_then(|v| v.as_integer())
		.map(|v| v as u64)
		.unwrap_or(DEFAULT_TIMEOUT_SECS);

	Ok(Box::new(ThorestClient::new(base_url, timeout_secs)?))
}

/// Registry for the Thorest client implementation.
pub struct Registry;

impl thor_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "thorest";
	type Factory = crate::NodeQueryFactory;

	fn factory() -> Self::Factory {
		create_thorest_client
	}
}

impl crate::NodeQueryRegistry for Registry {}
