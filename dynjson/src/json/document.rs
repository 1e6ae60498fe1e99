//! The owned JSON document: construction, encoding and in-place mutation.

use super::{JsonMut, JsonRef};
use crate::{JsonError, PathStep, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt::Display, str::FromStr};

/// A JSON document of arbitrary shape.
///
/// `Json` owns its value. Lookups return [`JsonRef`] handles that borrow from
/// the document; every read accessor of `JsonRef` is also available directly
/// on `Json`, where it applies to the root value.
///
/// # Examples
///
/// ```
/// use dynjson::{Json, path};
///
/// let mut json = Json::from_bytes(br#"{"a":{"b":[1,2,{"c":"x"}]}}"#).unwrap();
/// assert_eq!(json.get_path(&path!["a", "b", 2, "c"]).string(), "x");
/// assert_eq!(json.get_path(&path!["a", "z"]).string_or("none"), "none");
///
/// json.set_path(&["x", "y"], 42);
/// assert_eq!(json.get("x").get("y").int(), 42);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json {
	data: Value,
}

/// Forwards read accessors to [`JsonRef`] on the root value.
macro_rules! delegate_to_root {
	($($(#[$meta:meta])* fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)+) => {
		$(
			$(#[$meta])*
			pub fn $name(&self $(, $arg: $ty)*) -> $ret {
				self.root().$name($($arg),*)
			}
		)+
	};
}

impl Json {
	/// Create a document holding an empty object.
	#[must_use]
	pub fn new() -> Json {
		Json {
			data: Value::Object(Map::new()),
		}
	}

	/// Decode a document from raw JSON bytes.
	///
	/// # Errors
	/// Returns [`JsonError::Decode`] if `raw` is not well-formed JSON.
	pub fn from_bytes(raw: &[u8]) -> Result<Json> {
		serde_json::from_slice(raw).map(Json::from_value).map_err(JsonError::Decode)
	}

	/// Decode a document from JSON text.
	///
	/// # Errors
	/// Returns [`JsonError::Decode`] if `text` is not well-formed JSON.
	pub fn from_str(text: &str) -> Result<Json> {
		Json::from_bytes(text.as_bytes())
	}

	/// Wrap an already decoded value.
	pub fn from_value(data: Value) -> Json {
		Json { data }
	}

	/// The wrapped value.
	pub fn value(&self) -> &Value {
		&self.data
	}

	/// Consume the document, returning the wrapped value.
	pub fn into_value(self) -> Value {
		self.data
	}

	/// A handle to the root value.
	pub fn root(&self) -> JsonRef<'_> {
		JsonRef::from(&self.data)
	}

	/// Serialize to compact JSON.
	///
	/// # Errors
	/// Returns [`JsonError::Encode`] if the codec cannot represent the value.
	pub fn encode(&self) -> Result<Vec<u8>> {
		serde_json::to_vec(&self.data).map_err(JsonError::Encode)
	}

	/// Serialize with two spaces of indentation per nesting level.
	///
	/// # Errors
	/// Returns [`JsonError::Encode`] if the codec cannot represent the value.
	pub fn encode_pretty(&self) -> Result<Vec<u8>> {
		serde_json::to_vec_pretty(&self.data).map_err(JsonError::Encode)
	}

	delegate_to_root! {
		fn get(&self, key: &str) -> JsonRef<'_>;
		fn index(&self, index: i64) -> JsonRef<'_>;
		/// Walk `path` from the root; the result is absent if any step fails.
		fn get_path(&self, path: &[PathStep]) -> JsonRef<'_>;
		/// Walk `path` from the root; `None` if any step fails.
		fn check_get_path(&self, path: &[PathStep]) -> Option<JsonRef<'_>>;
		fn kind(&self) -> &'static str;
		fn is_null(&self) -> bool;

		fn check_map(&self) -> Result<&Map<String, Value>>;
		fn check_array(&self) -> Result<&[Value]>;
		fn check_json_map(&self) -> Result<IndexMap<&str, JsonRef<'_>>>;
		fn check_json_array(&self) -> Result<Vec<JsonRef<'_>>>;
		fn check_bool(&self) -> Result<bool>;
		fn check_str(&self) -> Result<&str>;
		fn check_string(&self) -> Result<String>;
		fn check_bytes(&self) -> Result<&[u8]>;
		fn check_int(&self) -> Result<isize>;
		fn check_i64(&self) -> Result<i64>;
		fn check_u64(&self) -> Result<u64>;
		fn check_f64(&self) -> Result<f64>;

		fn string(&self) -> String;
		fn string_or(&self, default: &str) -> String;
		fn int(&self) -> isize;
		fn int_or(&self, default: isize) -> isize;
		fn i64(&self) -> i64;
		fn i64_or(&self, default: i64) -> i64;
		fn u64(&self) -> u64;
		fn u64_or(&self, default: u64) -> u64;
		fn f64(&self) -> f64;
		fn f64_or(&self, default: f64) -> f64;
		fn bool(&self) -> bool;
		fn bool_or(&self, default: bool) -> bool;
		fn json_array(&self) -> Vec<JsonRef<'_>>;
		fn json_map(&self) -> IndexMap<&str, JsonRef<'_>>;
		fn array(&self) -> &[Value];
		fn map(&self) -> &Map<String, Value>;
	}

	/// The root's elements as handles, or `default` if the root is not an array.
	pub fn json_array_or<'a>(&'a self, default: Vec<JsonRef<'a>>) -> Vec<JsonRef<'a>> {
		self.root().json_array_or(default)
	}

	/// The root's entries as handles, or `default` if the root is not an object.
	pub fn json_map_or<'a>(&'a self, default: IndexMap<&'a str, JsonRef<'a>>) -> IndexMap<&'a str, JsonRef<'a>> {
		self.root().json_map_or(default)
	}

	/// The root's raw elements, or `default` if the root is not an array.
	pub fn array_or<'a>(&'a self, default: &'a [Value]) -> &'a [Value] {
		self.root().array_or(default)
	}

	/// The root's raw entries, or `default` if the root is not an object.
	pub fn map_or<'a>(&'a self, default: &'a Map<String, Value>) -> &'a Map<String, Value> {
		self.root().map_or(default)
	}

	/// A writable handle to the root value.
	pub fn root_mut(&mut self) -> JsonMut<'_> {
		JsonMut::new(&mut self.data)
	}

	/// Look up `key` for writing if the root is an object.
	pub fn get_mut(&mut self, key: &str) -> Option<JsonMut<'_>> {
		self.root_mut().get_mut(key)
	}

	/// Look up the zero-based `index` for writing if the root is an array.
	pub fn index_mut(&mut self, index: i64) -> Option<JsonMut<'_>> {
		self.root_mut().index_mut(index)
	}

	/// Walk `path` from the root for writing; `None` if any step fails.
	pub fn get_path_mut(&mut self, path: &[PathStep]) -> Option<JsonMut<'_>> {
		self.root_mut().get_path_mut(path)
	}

	/// Insert or overwrite `key` if the root is an object.
	///
	/// Does nothing if the root is not an object.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.root_mut().set(key, value);
	}

	/// Write `value` at `path`, creating nested objects along the way.
	///
	/// Any missing node on the way becomes an empty object, and so does any
	/// node that is not an object, discarding its previous content. An empty
	/// path replaces the whole document.
	pub fn set_path(&mut self, path: &[&str], value: impl Into<Value>) {
		self.root_mut().set_path(path, value);
	}

	/// Remove `key` if the root is an object, returning its previous value.
	///
	/// Does nothing if the root is not an object or the key is missing.
	pub fn delete(&mut self, key: &str) -> Option<Value> {
		self.root_mut().delete(key)
	}
}

impl Default for Json {
	fn default() -> Self {
		Json::new()
	}
}

impl FromStr for Json {
	type Err = JsonError;

	fn from_str(text: &str) -> Result<Json> {
		Json::from_bytes(text.as_bytes())
	}
}

impl From<Value> for Json {
	fn from(data: Value) -> Self {
		Json { data }
	}
}

impl From<Json> for Value {
	fn from(json: Json) -> Self {
		json.data
	}
}

impl Display for Json {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.data)
	}
}
