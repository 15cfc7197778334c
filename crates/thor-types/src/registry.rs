//! Registry trait for self-registering implementations.
//!
//! Each implementation module (the Thorest client, the mock client) must
//! provide a Registry struct that implements this trait, declaring its
//! configuration name and factory function.

/// Base trait for implementation registries.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this
	/// implementation, for example "thorest" or "mock".
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Returns the factory function that can create instances of this
	/// implementation from its configuration.
	fn factory() -> Self::Factory;
}
