//! Common types module for the Thor estimation workspace.
//!
//! This module defines the core data types and structures shared by the
//! node client and the estimation engine. It provides a centralized
//! location for domain types, wire types, and chain constants to ensure
//! consistency across all crates.

/// Account types for primary and token balances.
pub mod account;
/// Chain constants: intrinsic gas costs, built-in contracts, selectors.
pub mod constants;
/// Wire types exchanged with a Thorest-style node.
pub mod node;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Transaction clauses, bodies, requests, and estimation results.
pub mod transaction;
/// Utility functions for hex formatting, addresses, and versions.
pub mod utils;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use account::*;
pub use constants::*;
pub use node::*;
pub use registry::ImplementationRegistry;
pub use transaction::*;
pub use utils::{
	address::{is_valid_address, pad_address, parse_hex_quantity},
	formatting::{with_0x_prefix, without_0x_prefix},
	nonce::generate_nonce,
	version,
};
pub use validation::*;
