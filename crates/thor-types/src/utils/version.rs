//! Dotted version comparison for node compatibility gating.
//!
//! Node responses advertise the server version as a dotted string
//! ("2.1.3"). Components are compared numerically with missing components
//! treated as zero, so "2.1" equals "2.1.0". A string with any
//! non-numeric component orders before every well-formed version; the
//! caller treats such nodes as older than any known release rather than
//! failing.

use std::cmp::Ordering;

/// Parses a dotted version into numeric components.
///
/// Returns `None` when any component is not a plain decimal number.
fn parse(version: &str) -> Option<Vec<u64>> {
	version
		.trim()
		.split('.')
		.map(|part| part.parse::<u64>().ok())
		.collect()
}

/// Compares two dotted version strings.
///
/// Component-wise numeric ordering, shorter versions padded with zeros.
/// Malformed versions order before well-formed ones; two malformed
/// versions compare equal.
pub fn compare(a: &str, b: &str) -> Ordering {
	match (parse(a), parse(b)) {
		(Some(a_parts), Some(b_parts)) => {
			let len = a_parts.len().max(b_parts.len());
			for i in 0..len {
				let a_part = a_parts.get(i).copied().unwrap_or(0);
				let b_part = b_parts.get(i).copied().unwrap_or(0);
				match a_part.cmp(&b_part) {
					Ordering::Equal => continue,
					other => return other,
				}
			}
			Ordering::Equal
		}
		(Some(_), None) => Ordering::Greater,
		(None, Some(_)) => Ordering::Less,
		(None, None) => Ordering::Equal,
	}
}

/// Whether version `a` is at least version `b`.
pub fn at_least(a: &str, b: &str) -> bool {
	compare(a, b) != Ordering::Less
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ordering() {
		assert_eq!(compare("2.1.3", "2.1.3"), Ordering::Equal);
		assert_eq!(compare("2.1.4", "2.1.3"), Ordering::Greater);
		assert_eq!(compare("2.1.2", "2.1.3"), Ordering::Less);
		assert_eq!(compare("2.2", "2.1.9"), Ordering::Greater);
		assert_eq!(compare("3", "2.9.9"), Ordering::Greater);
	}

	#[test]
	fn test_component_wise_equality() {
		// "2.1" and "2.1.0" denote the same release
		assert_eq!(compare("2.1", "2.1.0"), Ordering::Equal);
		assert!(at_least("2.1.3", "2.1.3.0"));
	}

	#[test]
	fn test_malformed_orders_before_everything() {
		assert_eq!(compare("garbage", "0.0.1"), Ordering::Less);
		assert_eq!(compare("2.x.1", "2.0.0"), Ordering::Less);
		assert_eq!(compare("", "0.0.0"), Ordering::Less);
		assert!(!at_least("garbage", "2.1.3"));
	}

	#[test]
	fn test_at_least() {
		assert!(at_least("2.1.3", "2.1.3"));
		assert!(at_least("2.1.4", "2.1.3"));
		assert!(!at_least("2.1.2", "2.1.3"));
	}
}
