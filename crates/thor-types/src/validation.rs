//! Configuration validation utilities.
//!
//! A small, type-safe framework for validating the TOML tables that
//! configure node-client implementations. Node-client configuration is
//! flat: string fields for endpoints and hex words, bounded integers for
//! timeouts and schedules. Schemas check presence, type, bounds, and
//! optional custom validators, and produce field-qualified errors.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// Error that occurs when a required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// Error that occurs when a field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// Error that occurs when field type is incorrect.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Represents the type of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer value with optional inclusive bounds.
	Integer {
		min: Option<i64>,
		max: Option<i64>,
	},
}

/// Type alias for field validator functions.
///
/// Validators perform additional checks beyond type checking; they
/// receive the TOML value and return an error message on failure.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A named, typed field within a schema, with an optional validator.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	/// Creates a new field with the given name and type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom validator to this field.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}

	/// Checks a present value against this field's type, bounds, and
	/// custom validator.
	fn check(&self, value: &toml::Value) -> Result<(), ValidationError> {
		match &self.field_type {
			FieldType::String => {
				if !value.is_str() {
					return Err(self.type_mismatch("string", value));
				}
			}
			FieldType::Integer { min, max } => {
				let int_val = value
					.as_integer()
					.ok_or_else(|| self.type_mismatch("integer", value))?;

				if let Some(min) = min {
					if int_val < *min {
						return Err(ValidationError::InvalidValue {
							field: self.name.clone(),
							message: format!("Value {} is less than minimum {}", int_val, min),
						});
					}
				}

				if let Some(max) = max {
					if int_val > *max {
						return Err(ValidationError::InvalidValue {
							field: self.name.clone(),
							message: format!("Value {} is greater than maximum {}", int_val, max),
						});
					}
				}
			}
		}

		if let Some(validator) = &self.validator {
			validator(value).map_err(|msg| ValidationError::InvalidValue {
				field: self.name.clone(),
				message: msg,
			})?;
		}

		Ok(())
	}

	fn type_mismatch(&self, expected: &str, actual: &toml::Value) -> ValidationError {
		ValidationError::TypeMismatch {
			field: self.name.clone(),
			expected: expected.to_string(),
			actual: actual.type_str().to_string(),
		}
	}
}

/// A validation schema: required fields that must be present and
/// optional fields that may be.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	/// Creates a new schema with required and optional fields.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	///
	/// Checks presence of required fields, then types, bounds, and custom
	/// validators of every present field.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			field.check(value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				field.check(value)?;
			}
		}

		Ok(())
	}
}

/// Trait defining a configuration schema that can validate TOML values.
///
/// Implemented by each node-client implementation so its configuration
/// can be checked before construction.
#[async_trait]
pub trait ConfigSchema: Send + Sync {
	/// Validates a TOML configuration value against this schema.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}
