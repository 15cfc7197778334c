//! Fee calculation from gas and the chain's base gas price.
//!
//! The fee follows a two-part pricing curve: the base gas price plus a
//! coefficient-weighted surcharge. The coefficient in [0, 255] linearly
//! interpolates between the base price and the maximum tolerated price,
//! with the surcharge floor-divided before the base price is added.

use crate::EstimationError;
use alloy_primitives::U256;
use std::sync::Arc;
use thor_node::NodeQueryInterface;
use thor_types::{
	parse_hex_quantity, without_0x_prefix, SimulationClause, BASE_GAS_PRICE_KEY,
	MAX_GAS_COEFFICIENT, PARAMS_ADDRESS, PARAMS_GET_SELECTOR,
};

/// Computes fees in the energy token for a given gas estimate.
pub struct FeeCalculator {
	node: Arc<dyn NodeQueryInterface>,
}

impl FeeCalculator {
	/// Creates a new FeeCalculator backed by the given node client.
	pub fn new(node: Arc<dyn NodeQueryInterface>) -> Self {
		Self { node }
	}

	/// Reads the current base gas price from the Params contract.
	///
	/// Fetched fresh on every call; the base price is chain state and may
	/// change between calls. The single-value query must return exactly
	/// one result, anything else signals a malformed node response.
	pub async fn base_gas_price(&self) -> Result<U256, EstimationError> {
		let query = SimulationClause {
			to: Some(PARAMS_ADDRESS.to_string()),
			value: "0x0".to_string(),
			data: format!(
				"{}{}",
				PARAMS_GET_SELECTOR,
				without_0x_prefix(BASE_GAS_PRICE_KEY)
			),
		};

		let outputs = self.node.simulate(&[query], None).await?;
		if outputs.len() != 1 {
			return Err(EstimationError::UnexpectedResponse(format!(
				"Expected one result for base gas price query, got {}",
				outputs.len()
			)));
		}

		parse_hex_quantity(&outputs[0].data).ok_or_else(|| {
			EstimationError::UnexpectedResponse(format!(
				"Invalid base gas price word: {}",
				outputs[0].data
			))
		})
	}

	/// Calculates the fee for a gas amount at a gas price coefficient.
	///
	/// `fee = (base * coef / 255 + base) * gas`, with the division
	/// flooring before the addition.
	pub async fn calculate_fee(
		&self,
		gas: u64,
		gas_price_coef: u8,
	) -> Result<U256, EstimationError> {
		let base = self.base_gas_price().await?;
		let surcharge = base * U256::from(gas_price_coef) / U256::from(MAX_GAS_COEFFICIENT);
		Ok((surcharge + base) * U256::from(gas))
	}
}
