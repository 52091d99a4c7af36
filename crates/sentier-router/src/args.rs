//! Arguments handed to view-models.
//!
//! [`RouteArgs`] carries the raw segments of the routed path plus every named
//! parameter, both by name and in declaration order.

use crate::error::PathError;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Arguments built from a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteArgs {
	/// Raw (undecoded) segments of the routed path.
	uri_parts: Vec<String>,
	/// Named parameters extracted from the path.
	params: HashMap<String, String>,
	/// Parameter values in the order they appear in the pattern.
	param_values: Vec<String>,
}

impl RouteArgs {
	/// Pair `values` positionally with `names`.
	///
	/// When a pattern repeats a name, the later value wins in the by-name view.
	pub fn new(uri_parts: Vec<String>, names: &[String], values: Vec<String>) -> Self {
		let params = names.iter().cloned().zip(values.iter().cloned()).collect();
		Self {
			uri_parts,
			params,
			param_values: values,
		}
	}

	/// Raw segments of the routed path.
	pub fn uri_parts(&self) -> &[String] {
		&self.uri_parts
	}

	/// Value of a named parameter.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// All named parameters.
	pub fn params(&self) -> &HashMap<String, String> {
		&self.params
	}

	/// Parameter values in declaration order.
	pub fn param_values(&self) -> &[String] {
		&self.param_values
	}

	/// Parse a named parameter into `T`.
	///
	/// # Errors
	///
	/// Returns [`PathError::Missing`] if no such parameter was captured and
	/// [`PathError::ParseError`] if the value does not parse.
	pub fn param<T>(&self, name: &str) -> Result<T, PathError>
	where
		T: FromStr,
		T::Err: Display,
	{
		let raw = self
			.get(name)
			.ok_or_else(|| PathError::Missing(name.to_string()))?;
		raw.parse::<T>().map_err(|e| PathError::ParseError {
			param: name.to_string(),
			param_type: std::any::type_name::<T>(),
			raw_value: raw.to_string(),
			reason: e.to_string(),
		})
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.param_values.len()
	}

	/// Returns whether there are no parameters.
	pub fn is_empty(&self) -> bool {
		self.param_values.is_empty()
	}
}
