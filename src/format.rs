//! Conversion of response bodies into the caller's requested shape.

use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::{ensure, ResultExt};

use crate::{error, Result};

/// Shape a caller wants a response body in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
	/// The body text, untouched.
	Raw,
	/// A generic JSON tree.
	Json,
	/// A typed record.
	Typed,
}

impl Default for OutputFormat {
	fn default() -> Self {
		OutputFormat::Typed
	}
}

impl std::str::FromStr for OutputFormat {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"raw" => Ok(OutputFormat::Raw),
			"json" => Ok(OutputFormat::Json),
			"typed" => Ok(OutputFormat::Typed),
			other => Err(format!("unknown output format: {}", other)),
		}
	}
}

/// A response body in one of the three output shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted<T> {
	Raw(String),
	Json(Value),
	Typed(T),
}

impl<T> Formatted<T> {
	pub fn as_raw(&self) -> Option<&str> {
		match self {
			Formatted::Raw(text) => Some(text),
			_ => None,
		}
	}

	pub fn as_json(&self) -> Option<&Value> {
		match self {
			Formatted::Json(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_typed(&self) -> Option<&T> {
		match self {
			Formatted::Typed(value) => Some(value),
			_ => None,
		}
	}

	pub fn into_typed(self) -> Option<T> {
		match self {
			Formatted::Typed(value) => Some(value),
			_ => None,
		}
	}
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Parses a body that must be a JSON object.
pub fn parse_object(text: &str) -> Result<Value> {
	let value: Value = serde_json::from_str(text).context(error::Parse)?;
	ensure!(
		value.is_object(),
		error::UnexpectedShape {
			expected: "object",
			found: kind(&value),
		}
	);
	Ok(value)
}

/// Parses a body that must be a JSON array.
pub fn parse_array(text: &str) -> Result<Vec<Value>> {
	match serde_json::from_str(text).context(error::Parse)? {
		Value::Array(elements) => Ok(elements),
		other => error::UnexpectedShape {
			expected: "array",
			found: kind(&other),
		}
		.fail(),
	}
}

/// Maps a parsed JSON object into a typed record.
pub fn typed_object<T: DeserializeOwned>(text: &str) -> Result<T> {
	serde_json::from_value(parse_object(text)?).context(error::Mapping {
		type_name: std::any::type_name::<T>(),
	})
}

/// Maps every element of a parsed JSON array, in order.
pub fn typed_list<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
	parse_array(text)?
		.into_iter()
		.enumerate()
		.map(|(index, element)| {
			serde_json::from_value(element).context(error::ElementMapping {
				type_name: std::any::type_name::<T>(),
				index,
			})
		})
		.collect()
}

/// Formats a single-object response body.
pub fn format_object<T: DeserializeOwned>(
	text: String,
	format: OutputFormat,
) -> Result<Formatted<T>> {
	Ok(match format {
		OutputFormat::Raw => Formatted::Raw(text),
		OutputFormat::Json => Formatted::Json(parse_object(&text)?),
		OutputFormat::Typed => Formatted::Typed(typed_object(&text)?),
	})
}

/// Formats a list response body. The typed shape converts each element on
/// its own.
pub fn format_list<T: DeserializeOwned>(
	text: String,
	format: OutputFormat,
) -> Result<Formatted<Vec<T>>> {
	Ok(match format {
		OutputFormat::Raw => Formatted::Raw(text),
		OutputFormat::Json => Formatted::Json(Value::Array(parse_array(&text)?)),
		OutputFormat::Typed => Formatted::Typed(typed_list(&text)?),
	})
}
