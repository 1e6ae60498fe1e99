//! Mutable handle into a JSON document.

use super::{JsonRef, reference::kind_of};
use crate::PathStep;
use serde_json::{Map, Value};

/// A writable view of one value inside a [`Json`](super::Json) document.
///
/// Obtained from [`Json::get_mut`](super::Json::get_mut),
/// [`Json::get_path_mut`](super::Json::get_path_mut) and friends. Changes made
/// through a `JsonMut` are changes to the document it borrows from.
///
/// ```
/// use dynjson::{Json, path};
/// let mut json = Json::from_str(r#"{"user":{"name":"Ada","tmp":1}}"#).unwrap();
/// if let Some(mut user) = json.get_mut("user") {
/// 	user.set("admin", true);
/// 	user.delete("tmp");
/// }
/// assert_eq!(json.to_string(), r#"{"user":{"name":"Ada","admin":true}}"#);
/// ```
#[derive(Debug)]
pub struct JsonMut<'a> {
	data: &'a mut Value,
}

impl<'a> JsonMut<'a> {
	pub(crate) fn new(data: &'a mut Value) -> Self {
		JsonMut { data }
	}

	/// A read-only handle to the same value, for the `check_*` and defaulted accessors.
	pub fn as_ref(&self) -> JsonRef<'_> {
		JsonRef::from(&*self.data)
	}

	/// The underlying value.
	pub fn value_mut(&mut self) -> &mut Value {
		self.data
	}

	/// Consume the handle, returning the underlying value with the full borrow lifetime.
	pub fn into_value_mut(self) -> &'a mut Value {
		self.data
	}

	/// Replace the referenced value, returning the previous one.
	pub fn replace(&mut self, value: impl Into<Value>) -> Value {
		std::mem::replace(self.data, value.into())
	}

	fn step(self, step: &PathStep) -> Option<JsonMut<'a>> {
		match (self.data, step) {
			(Value::Object(map), PathStep::Key(key)) => map.get_mut(*key).map(JsonMut::new),
			(Value::Array(array), PathStep::Index(index)) => {
				let index = usize::try_from(*index).ok()?;
				array.get_mut(index).map(JsonMut::new)
			}
			_ => None,
		}
	}

	/// Look up `key` if this is an object.
	pub fn get_mut(self, key: &str) -> Option<JsonMut<'a>> {
		self.step(&PathStep::Key(key))
	}

	/// Look up the zero-based `index` if this is an array. Negative indices never resolve.
	pub fn index_mut(self, index: i64) -> Option<JsonMut<'a>> {
		self.step(&PathStep::Index(index))
	}

	/// Walk `path` from this value, returning `None` if any step fails.
	pub fn get_path_mut(self, path: &[PathStep]) -> Option<JsonMut<'a>> {
		let mut current = self;
		for step in path {
			current = current.step(step)?;
		}
		Some(current)
	}

	/// Insert or overwrite `key` if this is an object.
	///
	/// Does nothing if the value is not an object.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		let key: String = key.into();
		match &mut *self.data {
			Value::Object(map) => {
				map.insert(key, value.into());
			}
			other => log::debug!("ignoring set of {key:?} on a {}", kind_of(other)),
		}
	}

	/// Write `value` at `path`, creating nested objects along the way.
	///
	/// Any missing node on the way becomes an empty object, and so does any
	/// node that is not an object, discarding its previous content. This
	/// includes the value itself. An empty path replaces the value.
	pub fn set_path(&mut self, path: &[&str], value: impl Into<Value>) {
		let Some((last, branch)) = path.split_last() else {
			*self.data = value.into();
			return;
		};

		let Some(mut current) = ensure_object(self.data) else {
			return;
		};
		for key in branch {
			let child = current.entry(*key).or_insert_with(|| Value::Object(Map::new()));
			let Some(next) = ensure_object(child) else {
				return;
			};
			current = next;
		}
		current.insert((*last).to_owned(), value.into());
	}

	/// Remove `key` if this is an object, returning its previous value.
	///
	/// Does nothing if the value is not an object or the key is missing.
	pub fn delete(&mut self, key: &str) -> Option<Value> {
		match &mut *self.data {
			Value::Object(map) => map.shift_remove(key),
			other => {
				log::debug!("ignoring delete of {key:?} on a {}", kind_of(other));
				None
			}
		}
	}
}

/// Turn `value` into an empty object unless it already is one.
fn ensure_object(value: &mut Value) -> Option<&mut Map<String, Value>> {
	if !value.is_object() {
		log::debug!("replacing {} with an empty object", kind_of(value));
		*value = Value::Object(Map::new());
	}
	value.as_object_mut()
}
