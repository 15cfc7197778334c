//! Intrinsic and simulated gas estimation.
//!
//! Total gas for a candidate transaction is the intrinsic gas (wire cost
//! of the encoded clauses) plus the gas consumed by simulated execution.
//! The VM invocation fee is only charged when simulated execution
//! actually consumed gas: clauses that do nothing on-chain incur no VM
//! charge.

use crate::EstimationError;
use std::sync::Arc;
use thor_node::NodeQueryInterface;
use thor_types::{
	without_0x_prefix, Clause, SimulationClause, TransactionBody, CLAUSE_GAS,
	CLAUSE_GAS_CONTRACT_CREATION, NON_ZERO_BYTE_GAS, TX_GAS, VM_GAS, ZERO_BYTE_GAS,
};

/// Computes total gas estimates for candidate transaction bodies.
pub struct GasEstimator {
	node: Arc<dyn NodeQueryInterface>,
}

impl GasEstimator {
	/// Creates a new GasEstimator backed by the given node client.
	pub fn new(node: Arc<dyn NodeQueryInterface>) -> Self {
		Self { node }
	}

	/// Computes the intrinsic gas of a clause list.
	///
	/// Base fee plus a per-clause fee (higher for contract creation) plus
	/// the byte-level cost of clause data, where zero bytes are cheaper
	/// than non-zero bytes. An empty clause list is charged as a single
	/// empty clause.
	pub fn intrinsic_gas(clauses: &[Clause]) -> Result<u64, EstimationError> {
		if clauses.is_empty() {
			return Ok(TX_GAS + CLAUSE_GAS);
		}

		let mut gas = TX_GAS;
		for clause in clauses {
			gas += if clause.to.is_some() {
				CLAUSE_GAS
			} else {
				CLAUSE_GAS_CONTRACT_CREATION
			};
			gas += Self::data_gas(clause.data.as_deref().unwrap_or("0x"))?;
		}
		Ok(gas)
	}

	/// Byte-level cost of one clause's data.
	fn data_gas(data: &str) -> Result<u64, EstimationError> {
		let bytes = hex::decode(without_0x_prefix(data)).map_err(|e| {
			EstimationError::InvalidTransaction(format!("Invalid clause data hex: {}", e))
		})?;
		Ok(bytes
			.iter()
			.map(|&b| if b == 0 { ZERO_BYTE_GAS } else { NON_ZERO_BYTE_GAS })
			.sum())
	}

	/// Estimates the total gas a transaction body will use.
	///
	/// Simulates the clauses against current chain state and adds the
	/// summed execution gas (plus the VM invocation fee when execution
	/// gas is non-zero) to the intrinsic gas. A failed simulation
	/// propagates; the caller decides whether to retry.
	pub async fn estimate(
		&self,
		body: &TransactionBody,
		caller: Option<&str>,
	) -> Result<u64, EstimationError> {
		let intrinsic = Self::intrinsic_gas(&body.clauses)?;

		let formatted: Vec<SimulationClause> =
			body.clauses.iter().map(SimulationClause::from).collect();
		let outputs = self.node.simulate(&formatted, caller).await?;

		let execution: u64 = outputs.iter().map(|out| out.gas_used).sum();
		let total = intrinsic + if execution > 0 { execution + VM_GAS } else { 0 };
		tracing::debug!(intrinsic, execution, total, "Estimated gas");

		Ok(total)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use thor_node::implementations::mock::{MockNodeConfig, MockNodeQuery};

	fn transfer_clause(data: &str) -> Clause {
		Clause {
			to: Some("0x0123456789012345678901234567890123456789".to_string()),
			value: Some("0x1e".to_string()),
			data: Some(data.to_string()),
		}
	}

	#[test]
	fn test_intrinsic_gas_empty_clause_list() {
		assert_eq!(GasEstimator::intrinsic_gas(&[]).unwrap(), 21000);
	}

	#[test]
	fn test_intrinsic_gas_single_transfer() {
		let clauses = vec![transfer_clause("0x")];
		assert_eq!(GasEstimator::intrinsic_gas(&clauses).unwrap(), 21000);
	}

	#[test]
	fn test_intrinsic_gas_charges_data_bytes() {
		// one zero byte (4) and one non-zero byte (68)
		let clauses = vec![transfer_clause("0x00ff")];
		assert_eq!(GasEstimator::intrinsic_gas(&clauses).unwrap(), 21072);
	}

	#[test]
	fn test_intrinsic_gas_contract_creation() {
		let clauses = vec![Clause {
			to: None,
			value: None,
			data: Some("0x".to_string()),
		}];
		assert_eq!(GasEstimator::intrinsic_gas(&clauses).unwrap(), 53000);
	}

	#[test]
	fn test_intrinsic_gas_rejects_invalid_hex() {
		let clauses = vec![transfer_clause("0xzz")];
		assert!(matches!(
			GasEstimator::intrinsic_gas(&clauses),
			Err(EstimationError::InvalidTransaction(_))
		));
	}

	#[tokio::test]
	async fn test_zero_execution_gas_skips_vm_fee() {
		let estimator = GasEstimator::new(Arc::new(MockNodeQuery::new(MockNodeConfig {
			gas_used: vec![0],
			..MockNodeConfig::default()
		})));
		let body = TransactionBody::new(vec![transfer_clause("0x")]);

		// intrinsic only, no VM invocation fee
		assert_eq!(estimator.estimate(&body, None).await.unwrap(), 21000);
	}

	#[tokio::test]
	async fn test_execution_gas_adds_vm_fee() {
		let estimator = GasEstimator::new(Arc::new(MockNodeQuery::new(MockNodeConfig {
			gas_used: vec![700],
			..MockNodeConfig::default()
		})));
		let body = TransactionBody::new(vec![transfer_clause("0x")]);

		assert_eq!(
			estimator.estimate(&body, None).await.unwrap(),
			21000 + 700 + 15000
		);
	}

	#[tokio::test]
	async fn test_simulation_failure_propagates() {
		let estimator = GasEstimator::new(Arc::new(MockNodeQuery::new(MockNodeConfig {
			fail_simulation: true,
			..MockNodeConfig::default()
		})));
		let body = TransactionBody::new(vec![transfer_clause("0x")]);

		assert!(matches!(
			estimator.estimate(&body, None).await,
			Err(EstimationError::Node(_))
		));
	}
}
