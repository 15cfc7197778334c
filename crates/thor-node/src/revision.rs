//! Simulation revision selection.
//!
//! Simulation queries target a state revision. Older nodes only answer
//! consistently for `"best"` (the latest settled block); nodes from
//! 2.1.3 onwards support `"next"`, which simulates against the block
//! currently being produced. The node advertises its version in the
//! `x-thorest-ver` response header.

use thor_types::{version, REVISION_NEXT_MIN_VERSION};

/// The state revision a simulation query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
	/// The latest settled block.
	Best,
	/// The block currently being produced.
	Next,
}

impl Revision {
	/// Wire value of the revision, as used in query strings.
	pub fn as_str(&self) -> &'static str {
		match self {
			Revision::Best => "best",
			Revision::Next => "next",
		}
	}

	/// Chooses the revision for a node's reported version header.
	///
	/// Returns [`Revision::Next`] only when the header is present and
	/// compares at least 2.1.3; absent or malformed versions are treated
	/// as older than any known release and fall back to
	/// [`Revision::Best`].
	pub fn for_version(header: Option<&str>) -> Self {
		match header {
			Some(reported) if version::at_least(reported, REVISION_NEXT_MIN_VERSION) => {
				Revision::Next
			}
			_ => Revision::Best,
		}
	}
}

impl std::fmt::Display for Revision {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_revision_for_version() {
		assert_eq!(Revision::for_version(Some("2.1.3")), Revision::Next);
		assert_eq!(Revision::for_version(Some("2.2.0")), Revision::Next);
		assert_eq!(Revision::for_version(Some("3.0")), Revision::Next);
		assert_eq!(Revision::for_version(Some("2.1.2")), Revision::Best);
		assert_eq!(Revision::for_version(Some("1.9.9")), Revision::Best);
	}

	#[test]
	fn test_missing_or_malformed_header_uses_best() {
		assert_eq!(Revision::for_version(None), Revision::Best);
		assert_eq!(Revision::for_version(Some("")), Revision::Best);
		assert_eq!(Revision::for_version(Some("nightly")), Revision::Best);
	}

	#[test]
	fn test_wire_values() {
		assert_eq!(Revision::Best.as_str(), "best");
		assert_eq!(Revision::Next.as_str(), "next");
	}
}
