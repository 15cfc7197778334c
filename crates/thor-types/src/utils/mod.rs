//! Utility functions for hex formatting, addresses, versions, and nonces.
//!
//! This module provides helper functions for the string and byte
//! transformations commonly needed when talking to a Thorest-style node.

pub mod address;
pub mod formatting;
pub mod nonce;
pub mod version;

pub use address::{is_valid_address, pad_address, parse_hex_quantity};
pub use formatting::{with_0x_prefix, without_0x_prefix};
pub use nonce::generate_nonce;
