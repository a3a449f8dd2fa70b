//! Ordered parameter bags sent as query strings or JSON bodies.

use std::{convert::TryFrom, fmt, iter::FromIterator};

use serde_json::{Map, Value};

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
	Str(String),
	Int(i64),
	Float(f64),
	Bool(bool),
}

impl ParamValue {
	pub fn to_json(&self) -> Value {
		match self {
			ParamValue::Str(s) => Value::String(s.clone()),
			ParamValue::Int(i) => Value::from(*i),
			ParamValue::Float(f) => Value::from(*f),
			ParamValue::Bool(b) => Value::Bool(*b),
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ParamValue::Str(s) => f.write_str(s),
			ParamValue::Int(i) => write!(f, "{}", i),
			ParamValue::Float(x) => write!(f, "{}", x),
			ParamValue::Bool(b) => write!(f, "{}", b),
		}
	}
}

impl From<&str> for ParamValue {
	fn from(s: &str) -> Self {
		ParamValue::Str(s.to_owned())
	}
}

impl From<String> for ParamValue {
	fn from(s: String) -> Self {
		ParamValue::Str(s)
	}
}

impl From<&String> for ParamValue {
	fn from(s: &String) -> Self {
		ParamValue::Str(s.clone())
	}
}

impl From<i64> for ParamValue {
	fn from(i: i64) -> Self {
		ParamValue::Int(i)
	}
}

impl From<i32> for ParamValue {
	fn from(i: i32) -> Self {
		ParamValue::Int(i64::from(i))
	}
}

impl From<u32> for ParamValue {
	fn from(i: u32) -> Self {
		ParamValue::Int(i64::from(i))
	}
}

impl From<u64> for ParamValue {
	fn from(i: u64) -> Self {
		match i64::try_from(i) {
			Ok(i) => ParamValue::Int(i),
			Err(_) => ParamValue::Str(i.to_string()),
		}
	}
}

impl From<f64> for ParamValue {
	fn from(f: f64) -> Self {
		ParamValue::Float(f)
	}
}

impl From<bool> for ParamValue {
	fn from(b: bool) -> Self {
		ParamValue::Bool(b)
	}
}

/// Ordered key-value collection with unique keys.
///
/// Insertion order is kept so the same bag always produces the same query
/// string. Re-inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
	entries: Vec<(String, ParamValue)>,
}

impl Params {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<ParamValue>,
	{
		self.insert(key, value);
		self
	}

	/// Sets `key`, returning the value it replaced.
	pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<ParamValue>
	where
		K: Into<String>,
		V: Into<ParamValue>,
	{
		let key = key.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => Some(std::mem::replace(existing, value)),
			None => {
				self.entries.push((key, value));
				None
			}
		}
	}

	/// Merges a mutation's own key into an optional caller bag. Every
	/// other key of the bag is left untouched; `key` always ends up with
	/// `value`.
	pub fn merged<K, V>(params: Option<Params>, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<ParamValue>,
	{
		params.unwrap_or_default().with(key, value)
	}

	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Serializes the bag as `?k=v&k2=v2`, or an empty string for an empty
	/// bag. Keys and values are percent-encoded.
	pub fn to_query(&self) -> String {
		if self.entries.is_empty() {
			return String::new();
		}
		let pairs = self
			.entries
			.iter()
			.map(|(k, v)| {
				format!(
					"{}={}",
					urlencoding::encode(k),
					urlencoding::encode(&v.to_string())
				)
			})
			.collect::<Vec<_>>();
		format!("?{}", pairs.join("&"))
	}

	/// Parses a query string, with or without its leading `?`. Every value
	/// comes back as a string.
	pub fn from_query(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		url::form_urlencoded::parse(query.as_bytes())
			.map(|(k, v)| (k.into_owned(), v.into_owned()))
			.collect()
	}

	/// The bag as a JSON object body.
	pub fn to_json(&self) -> Value {
		Value::Object(
			self.entries
				.iter()
				.map(|(k, v)| (k.clone(), v.to_json()))
				.collect::<Map<String, Value>>(),
		)
	}
}

impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Params::new();
		for (k, v) in iter {
			params.insert(k, v);
		}
		params
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_query_keeps_insertion_order() {
		let params = Params::new().with("per_page", "10").with("page", "2");
		assert_eq!(params.to_query(), "?per_page=10&page=2");

		let params = Params::new().with("page", 2).with("per_page", 10);
		assert_eq!(params.to_query(), "?page=2&per_page=10");
	}

	#[test]
	fn test_empty_bag_has_no_query() {
		assert_eq!(Params::new().to_query(), "");
	}

	#[test]
	fn test_query_round_trip() {
		let params = Params::new()
			.with("state", "open")
			.with("sort", "created")
			.with("labels", "bug,help wanted")
			.with("q", "a+b&c=d")
			.with("direction", "desc");
		let parsed = Params::from_query(&params.to_query());
		assert_eq!(parsed, params);
		assert_eq!(
			parsed.iter().map(|(k, _)| k).collect::<Vec<_>>(),
			vec!["state", "sort", "labels", "q", "direction"]
		);
	}

	#[test]
	fn test_insert_replaces_in_place() {
		let mut params = Params::new().with("a", 1).with("b", 2);
		assert_eq!(params.insert("a", 3), Some(ParamValue::Int(1)));
		assert_eq!(params.to_query(), "?a=3&b=2");
		assert_eq!(params.insert("c", true), None);
		assert_eq!(params.to_query(), "?a=3&b=2&c=true");
	}

	#[test]
	fn test_merged_overrides_only_its_key() {
		let caller = Params::new()
			.with("dismissed_reason", "tolerable_risk")
			.with("state", "open");
		let merged = Params::merged(Some(caller), "state", "dismissed");
		assert_eq!(
			merged.get("dismissed_reason"),
			Some(&ParamValue::from("tolerable_risk"))
		);
		assert_eq!(merged.get("state"), Some(&ParamValue::from("dismissed")));
		assert_eq!(merged.len(), 2);

		let merged = Params::merged(None, "tag_name", "v1.0.0");
		assert_eq!(merged.to_json(), json!({ "tag_name": "v1.0.0" }));
	}

	#[test]
	fn test_json_body_keeps_value_types() {
		let params = Params::new()
			.with("name", "v1")
			.with("draft", false)
			.with("per_page", 30u32)
			.with("ratio", 0.5);
		assert_eq!(
			params.to_json(),
			json!({ "name": "v1", "draft": false, "per_page": 30, "ratio": 0.5 })
		);
	}
}
