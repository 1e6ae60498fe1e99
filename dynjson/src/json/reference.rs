//! Borrowed handle into a JSON document, with navigation and typed accessors.

use super::{Json, number::number_to_int};
use crate::{JsonError, PathStep, Result};
use indexmap::IndexMap;
use num_traits::{FromPrimitive, PrimInt};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::{fmt::Display, sync::LazyLock};

static EMPTY_MAP: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// Returns the name of the JSON kind of `value`, as used in error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Array(_) => "array",
		Value::Bool(_) => "boolean",
		Value::Null => "null",
		Value::Number(_) => "number",
		Value::Object(_) => "object",
		Value::String(_) => "string",
	}
}

/// A read-only view of one value inside a [`Json`] document.
///
/// A `JsonRef` either points at a value owned by the document it was
/// obtained from, or it is *absent*: the result of a lookup that did not
/// resolve. An absent handle is never backed by document storage and is
/// distinct from a JSON `null`; use [`JsonRef::is_found`] to tell the two
/// apart.
///
/// Handles are `Copy`, so lookups can be chained freely:
///
/// ```
/// use dynjson::Json;
/// let json = Json::from_str(r#"{"user":{"tags":["a","b"]}}"#).unwrap();
/// assert_eq!(json.get("user").get("tags").index(1).string(), "b");
/// assert!(!json.get("user").get("missing").index(0).is_found());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JsonRef<'a> {
	data: Option<&'a Value>,
}

impl<'a> JsonRef<'a> {
	/// The not-found sentinel.
	#[must_use]
	pub const fn absent() -> Self {
		JsonRef { data: None }
	}

	/// The underlying value, or `None` if this handle is absent.
	pub fn value(self) -> Option<&'a Value> {
		self.data
	}

	/// `true` if the lookup that produced this handle resolved.
	pub fn is_found(self) -> bool {
		self.data.is_some()
	}

	/// `true` only for a resolved JSON `null`; an absent handle is not null.
	pub fn is_null(self) -> bool {
		matches!(self.data, Some(Value::Null))
	}

	/// Return the kind as a lowercase string (`"object"`, `"array"`, ..., or `"absent"`).
	pub fn kind(self) -> &'static str {
		self.data.map_or("absent", kind_of)
	}

	/// Copy the referenced value into a new, independent document.
	///
	/// An absent handle becomes a document holding `null`.
	pub fn to_json(self) -> Json {
		Json::from_value(self.data.cloned().unwrap_or(Value::Null))
	}

	// ------------------------------------------------------------------
	// navigation
	// ------------------------------------------------------------------

	fn get_key(self, key: &str) -> Option<&'a Value> {
		self.data?.as_object()?.get(key)
	}

	fn get_index(self, index: i64) -> Option<&'a Value> {
		let index = usize::try_from(index).ok()?;
		self.data?.as_array()?.get(index)
	}

	fn step(self, step: &PathStep) -> Option<&'a Value> {
		match step {
			PathStep::Key(key) => self.get_key(key),
			PathStep::Index(index) => self.get_index(*index),
		}
	}

	/// Look up `key` if this is an object.
	pub fn get(self, key: &str) -> JsonRef<'a> {
		JsonRef {
			data: self.get_key(key),
		}
	}

	/// Look up the zero-based `index` if this is an array. Negative indices never resolve.
	pub fn index(self, index: i64) -> JsonRef<'a> {
		JsonRef {
			data: self.get_index(index),
		}
	}

	/// Walk `path` from this value, returning `None` if any step fails.
	///
	/// Unlike [`JsonRef::get_path`], this distinguishes a resolved `null`
	/// (`Some` of a null handle) from a path that did not resolve (`None`).
	pub fn check_get_path(self, path: &[PathStep]) -> Option<JsonRef<'a>> {
		let mut current = self;
		for (position, step) in path.iter().enumerate() {
			match current.step(step) {
				Some(value) => current = JsonRef { data: Some(value) },
				None => {
					log::trace!(
						"path step {step} at position {position} did not resolve against {}",
						current.kind()
					);
					return None;
				}
			}
		}
		Some(current)
	}

	/// Walk `path` from this value. Always returns a usable handle; it is
	/// absent if any step fails.
	pub fn get_path(self, path: &[PathStep]) -> JsonRef<'a> {
		self.check_get_path(path).unwrap_or_default()
	}

	// ------------------------------------------------------------------
	// type-checked accessors
	// ------------------------------------------------------------------

	fn mismatch(self, expected: &'static str) -> JsonError {
		JsonError::type_mismatch(expected, self.kind())
	}

	/// The entries of an object.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] if this is not an object or is absent.
	pub fn check_map(self) -> Result<&'a Map<String, Value>> {
		match self.data {
			Some(Value::Object(map)) => Ok(map),
			_ => Err(self.mismatch("map")),
		}
	}

	/// The elements of an array.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] if this is not an array or is absent.
	pub fn check_array(self) -> Result<&'a [Value]> {
		match self.data {
			Some(Value::Array(array)) => Ok(array),
			_ => Err(self.mismatch("array")),
		}
	}

	/// Like [`JsonRef::check_map`], with every entry wrapped in its own handle.
	///
	/// Entries keep the document's key order.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] if this is not an object or is absent.
	pub fn check_json_map(self) -> Result<IndexMap<&'a str, JsonRef<'a>>> {
		let map = self.check_map().map_err(|_| self.mismatch("json map"))?;
		Ok(map
			.iter()
			.map(|(key, value)| (key.as_str(), JsonRef::from(value)))
			.collect())
	}

	/// Like [`JsonRef::check_array`], with every element wrapped in its own handle.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] if this is not an array or is absent.
	pub fn check_json_array(self) -> Result<Vec<JsonRef<'a>>> {
		let array = self.check_array().map_err(|_| self.mismatch("json array"))?;
		Ok(array.iter().map(JsonRef::from).collect())
	}

	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] unless this is a boolean.
	pub fn check_bool(self) -> Result<bool> {
		match self.data {
			Some(Value::Bool(b)) => Ok(*b),
			_ => Err(self.mismatch("bool")),
		}
	}

	/// The text of a string value, borrowed from the document.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] unless this is a string.
	pub fn check_str(self) -> Result<&'a str> {
		match self.data {
			Some(Value::String(text)) => Ok(text),
			_ => Err(self.mismatch("string")),
		}
	}

	/// Owned variant of [`JsonRef::check_str`].
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] unless this is a string.
	pub fn check_string(self) -> Result<String> {
		self.check_str().map(str::to_owned)
	}

	/// The UTF-8 bytes of a string value.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] unless this is a string.
	pub fn check_bytes(self) -> Result<&'a [u8]> {
		self.check_str().map(str::as_bytes).map_err(|_| self.mismatch("bytes"))
	}

	fn check_integer<I>(self, expected: &'static str) -> Result<I>
	where
		I: PrimInt + FromPrimitive,
	{
		match self.data {
			Some(Value::Number(number)) => number_to_int(number).ok_or_else(|| self.mismatch(expected)),
			_ => Err(self.mismatch(expected)),
		}
	}

	/// A number that is integral and fits into an `isize`.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] unless this is a number with no
	/// fractional part inside the `isize` range.
	pub fn check_int(self) -> Result<isize> {
		self.check_integer("int")
	}

	/// A number that is integral and fits into an `i64`.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] otherwise.
	pub fn check_i64(self) -> Result<i64> {
		self.check_integer("i64")
	}

	/// A number that is integral, non-negative and fits into a `u64`.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] otherwise.
	pub fn check_u64(self) -> Result<u64> {
		self.check_integer("u64")
	}

	/// Any number, widened to `f64`.
	///
	/// # Errors
	/// Returns [`JsonError::TypeMismatch`] unless this is a number.
	pub fn check_f64(self) -> Result<f64> {
		match self.data {
			Some(Value::Number(number)) => number.as_f64().ok_or_else(|| self.mismatch("f64")),
			_ => Err(self.mismatch("f64")),
		}
	}

	// ------------------------------------------------------------------
	// defaulted accessors
	// ------------------------------------------------------------------

	/// The string value, or `""`.
	///
	/// ```
	/// use dynjson::Json;
	/// let json = Json::from_str(r#"{"name":"x"}"#).unwrap();
	/// assert_eq!(json.get("name").string(), "x");
	/// assert_eq!(json.get("missing").string(), "");
	/// assert_eq!(json.get("missing").string_or("fallback"), "fallback");
	/// ```
	pub fn string(self) -> String {
		self.check_string().unwrap_or_default()
	}

	/// The string value, or `default`.
	pub fn string_or(self, default: &str) -> String {
		self.check_string().unwrap_or_else(|_| default.to_owned())
	}

	/// The value as an `isize`, or `0`.
	pub fn int(self) -> isize {
		self.check_int().unwrap_or_default()
	}

	/// The value as an `isize`, or `default`.
	pub fn int_or(self, default: isize) -> isize {
		self.check_int().unwrap_or(default)
	}

	/// The value as an `i64`, or `0`.
	pub fn i64(self) -> i64 {
		self.check_i64().unwrap_or_default()
	}

	/// The value as an `i64`, or `default`.
	pub fn i64_or(self, default: i64) -> i64 {
		self.check_i64().unwrap_or(default)
	}

	/// The value as a `u64`, or `0`.
	pub fn u64(self) -> u64 {
		self.check_u64().unwrap_or_default()
	}

	/// The value as a `u64`, or `default`.
	pub fn u64_or(self, default: u64) -> u64 {
		self.check_u64().unwrap_or(default)
	}

	/// The value as an `f64`, or `0.0`.
	pub fn f64(self) -> f64 {
		self.check_f64().unwrap_or_default()
	}

	/// The value as an `f64`, or `default`.
	pub fn f64_or(self, default: f64) -> f64 {
		self.check_f64().unwrap_or(default)
	}

	/// The boolean value, or `false`.
	pub fn bool(self) -> bool {
		self.check_bool().unwrap_or_default()
	}

	/// The boolean value, or `default`.
	pub fn bool_or(self, default: bool) -> bool {
		self.check_bool().unwrap_or(default)
	}

	/// The elements as handles, or an empty vector. Handy for iteration:
	///
	/// ```
	/// use dynjson::Json;
	/// let json = Json::from_str(r#"{"results":[{"id":1},{"id":2}]}"#).unwrap();
	/// let ids: Vec<i64> = json.get("results").json_array().into_iter().map(|r| r.get("id").i64()).collect();
	/// assert_eq!(ids, [1, 2]);
	/// ```
	pub fn json_array(self) -> Vec<JsonRef<'a>> {
		self.check_json_array().unwrap_or_default()
	}

	/// The elements as handles, or `default`.
	pub fn json_array_or(self, default: Vec<JsonRef<'a>>) -> Vec<JsonRef<'a>> {
		self.check_json_array().unwrap_or(default)
	}

	/// The entries as handles in document order, or an empty map.
	pub fn json_map(self) -> IndexMap<&'a str, JsonRef<'a>> {
		self.check_json_map().unwrap_or_default()
	}

	/// The entries as handles in document order, or `default`.
	pub fn json_map_or(self, default: IndexMap<&'a str, JsonRef<'a>>) -> IndexMap<&'a str, JsonRef<'a>> {
		self.check_json_map().unwrap_or(default)
	}

	/// The raw elements, or an empty slice.
	pub fn array(self) -> &'a [Value] {
		self.check_array().unwrap_or_default()
	}

	/// The raw elements, or `default`.
	pub fn array_or(self, default: &'a [Value]) -> &'a [Value] {
		self.check_array().unwrap_or(default)
	}

	/// The raw entries, or an empty map.
	pub fn map(self) -> &'a Map<String, Value> {
		self.check_map().unwrap_or(&*EMPTY_MAP)
	}

	/// The raw entries, or `default`.
	pub fn map_or(self, default: &'a Map<String, Value>) -> &'a Map<String, Value> {
		self.check_map().unwrap_or(default)
	}

	// ------------------------------------------------------------------
	// encoding
	// ------------------------------------------------------------------

	/// Serialize to compact JSON. An absent handle encodes as `null`.
	///
	/// # Errors
	/// Returns [`JsonError::Encode`] if the codec cannot represent the value.
	pub fn encode(self) -> Result<Vec<u8>> {
		serde_json::to_vec(&self.data).map_err(JsonError::Encode)
	}

	/// Serialize with two spaces of indentation per nesting level.
	///
	/// # Errors
	/// Returns [`JsonError::Encode`] if the codec cannot represent the value.
	pub fn encode_pretty(self) -> Result<Vec<u8>> {
		serde_json::to_vec_pretty(&self.data).map_err(JsonError::Encode)
	}
}

impl<'a> From<&'a Value> for JsonRef<'a> {
	fn from(value: &'a Value) -> Self {
		JsonRef { data: Some(value) }
	}
}

impl Serialize for JsonRef<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		self.data.serialize(serializer)
	}
}

impl Display for JsonRef<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.data {
			Some(value) => write!(f, "{value}"),
			None => f.write_str("null"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::path;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;

	fn sample() -> Value {
		json!({
			"a": {"b": [1, 2, {"c": "x"}]},
			"null": null,
			"text": "hello",
			"flag": true,
			"int": 3.0,
			"float": 3.5,
			"big": u64::MAX,
			"neg": -12,
		})
	}

	#[test]
	fn test_get_path_resolves_nested() {
		let value = sample();
		let root = JsonRef::from(&value);
		assert_eq!(root.get_path(&path!["a", "b", 2, "c"]).check_str().unwrap(), "x");
		assert_eq!(root.get_path(&path!["a", "b", 0]).i64(), 1);
	}

	#[rstest]
	#[case::index_out_of_bounds(&path!["a", "b", 5])]
	#[case::missing_key(&path!["a", "z"])]
	#[case::key_against_array(&path!["a", "b", "x"])]
	#[case::index_against_object(&path!["a", 0])]
	#[case::negative_index(&path!["a", "b", -1])]
	#[case::through_scalar(&path!["text", "len"])]
	fn test_get_path_not_found(#[case] steps: &[PathStep]) {
		let value = sample();
		let root = JsonRef::from(&value);
		assert_eq!(root.check_get_path(steps), None);
		let result = root.get_path(steps);
		assert!(!result.is_found());
		assert_eq!(result, JsonRef::absent());
		assert_eq!(result.kind(), "absent");
	}

	#[test]
	fn test_empty_path_returns_self() {
		let value = sample();
		let root = JsonRef::from(&value);
		assert_eq!(root.check_get_path(&[]), Some(root));
	}

	#[test]
	fn test_null_is_distinguished_from_absent() {
		let value = sample();
		let root = JsonRef::from(&value);

		let found = root.check_get_path(&path!["null"]).unwrap();
		assert!(found.is_found());
		assert!(found.is_null());

		let missing = root.get("nothing");
		assert!(!missing.is_found());
		assert!(!missing.is_null());
		assert_ne!(found, missing);
	}

	#[test]
	fn test_get_on_absent_stays_absent() {
		let absent = JsonRef::absent();
		assert!(!absent.get("a").index(0).get("b").is_found());
		assert_eq!(absent.value(), None);
	}

	#[test]
	fn test_get_aliases_document_storage() {
		let value = sample();
		let root = JsonRef::from(&value);
		let inner = root.get("a").value().unwrap();
		assert!(std::ptr::eq(inner, &value["a"]));
	}

	#[test]
	fn test_check_numbers() {
		let value = sample();
		let root = JsonRef::from(&value);

		assert_eq!(root.get("int").check_int().unwrap(), 3);
		assert_eq!(root.get("int").check_f64().unwrap(), 3.0);

		let err = root.get("float").check_int().unwrap_err();
		assert!(err.is_type_mismatch());
		assert_eq!(err.to_string(), "type assertion to int failed, found number");
		assert_eq!(root.get("float").check_f64().unwrap(), 3.5);

		assert_eq!(root.get("big").check_u64().unwrap(), u64::MAX);
		assert!(root.get("big").check_i64().is_err());
		assert!(root.get("big").check_int().is_err());

		assert_eq!(root.get("neg").check_i64().unwrap(), -12);
		assert!(root.get("neg").check_u64().is_err());

		assert!(root.get("text").check_f64().is_err());
	}

	#[test]
	#[cfg(target_pointer_width = "64")]
	fn test_int_beyond_i32() {
		let value = json!({"n": 3_000_000_000_i64, "m": -3_000_000_000_i64});
		let root = JsonRef::from(&value);
		assert_eq!(root.get("n").check_int().unwrap(), 3_000_000_000);
		assert_eq!(root.get("n").int(), 3_000_000_000);
		assert_eq!(root.get("m").int_or(0), -3_000_000_000);
	}

	#[test]
	#[cfg(feature = "preserve_order")]
	fn test_json_map_keeps_document_order() {
		let value: Value = serde_json::from_str(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();
		let root = JsonRef::from(&value);
		let keys: Vec<&str> = root.json_map().keys().copied().collect();
		assert_eq!(keys, ["zeta", "alpha", "mid"]);
		let keys: Vec<&str> = root.check_json_map().unwrap().into_keys().collect();
		assert_eq!(keys, ["zeta", "alpha", "mid"]);
	}

	#[test]
	fn test_check_scalars() {
		let value = sample();
		let root = JsonRef::from(&value);

		assert!(root.get("flag").check_bool().unwrap());
		assert_eq!(root.get("text").check_string().unwrap(), "hello");
		assert_eq!(root.get("text").check_bytes().unwrap(), b"hello");

		assert_eq!(
			root.get("flag").check_str().unwrap_err().to_string(),
			"type assertion to string failed, found boolean"
		);
		assert_eq!(
			root.get("int").check_bytes().unwrap_err().to_string(),
			"type assertion to bytes failed, found number"
		);
		assert_eq!(
			root.get("missing").check_bool().unwrap_err().to_string(),
			"type assertion to bool failed, found absent"
		);
	}

	#[test]
	fn test_check_containers() {
		let value = sample();
		let root = JsonRef::from(&value);

		assert_eq!(root.get("a").check_map().unwrap().len(), 1);
		assert_eq!(root.get_path(&path!["a", "b"]).check_array().unwrap().len(), 3);
		assert!(root.get("text").check_map().is_err());
		assert!(root.get("a").check_array().is_err());

		let items = root.get_path(&path!["a", "b"]).check_json_array().unwrap();
		assert_eq!(items.len(), 3);
		assert_eq!(items[2].get("c").string(), "x");

		let entries = root.get("a").check_json_map().unwrap();
		assert_eq!(entries.keys().copied().collect::<Vec<_>>(), ["b"]);
		assert_eq!(entries["b"].index(1).int(), 2);

		assert_eq!(
			root.get("text").check_json_map().unwrap_err().to_string(),
			"type assertion to json map failed, found string"
		);
		assert_eq!(
			root.get("text").check_json_array().unwrap_err().to_string(),
			"type assertion to json array failed, found string"
		);
	}

	#[test]
	fn test_defaults() {
		let value = sample();
		let root = JsonRef::from(&value);
		let missing = root.get("missing");

		assert_eq!(missing.string(), "");
		assert_eq!(missing.string_or("fallback"), "fallback");
		assert_eq!(root.get("text").string_or("fallback"), "hello");

		assert_eq!(missing.int(), 0);
		assert_eq!(root.get("float").int_or(7), 7);
		assert_eq!(root.get("int").int_or(7), 3);

		assert_eq!(missing.i64_or(-1), -1);
		assert_eq!(root.get("neg").u64_or(5), 5);
		assert_eq!(missing.u64(), 0);
		assert_eq!(missing.f64(), 0.0);
		assert_eq!(root.get("text").f64_or(1.5), 1.5);
		assert!(!missing.bool());
		assert!(missing.bool_or(true));
		assert!(root.get("flag").bool_or(false));
	}

	#[test]
	fn test_container_defaults() {
		let value = sample();
		let root = JsonRef::from(&value);
		let missing = root.get("missing");
		let fallback = json!([true]);
		let fallback_map = json!({"k": 1});

		assert!(missing.json_array().is_empty());
		assert_eq!(missing.json_array_or(vec![JsonRef::from(&fallback)]).len(), 1);
		assert!(missing.json_map().is_empty());
		assert!(missing.array().is_empty());
		assert_eq!(missing.array_or(fallback.as_array().unwrap()), [json!(true)]);
		assert!(missing.map().is_empty());
		assert_eq!(missing.map_or(fallback_map.as_object().unwrap())["k"], json!(1));
		assert_eq!(root.get("a").map().len(), 1);
		assert_eq!(root.get_path(&path!["a", "b"]).array().len(), 3);
	}

	#[test]
	fn test_encode_and_display() {
		let value = json!({"k": [1, null]});
		let root = JsonRef::from(&value);
		assert_eq!(root.encode().unwrap(), br#"{"k":[1,null]}"#);
		assert_eq!(root.get("k").to_string(), "[1,null]");
		assert_eq!(JsonRef::absent().encode().unwrap(), b"null");
		assert_eq!(JsonRef::absent().to_string(), "null");
		assert_eq!(
			String::from_utf8(root.encode_pretty().unwrap()).unwrap(),
			"{\n  \"k\": [\n    1,\n    null\n  ]\n}"
		);
	}

	#[test]
	fn test_to_json_detaches() {
		let value = sample();
		let root = JsonRef::from(&value);
		let copy = root.get("a").to_json();
		assert_eq!(copy.value(), &value["a"]);
		assert_eq!(JsonRef::absent().to_json().value(), &Value::Null);
	}

	#[rstest]
	#[case(json!({}), "object")]
	#[case(json!([]), "array")]
	#[case(json!("s"), "string")]
	#[case(json!(1), "number")]
	#[case(json!(false), "boolean")]
	#[case(json!(null), "null")]
	fn test_kind(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(JsonRef::from(&value).kind(), expected);
	}
}
