//! Path steps used to walk into nested JSON documents.

use std::fmt::Display;

/// A single hop of a path: an object key or a zero-based array index.
///
/// Negative indices are representable so that callers can pass signed
/// integers through unchanged, but they never resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathStep<'a> {
	Key(&'a str),
	Index(i64),
}

impl Display for PathStep<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PathStep::Key(key) => write!(f, "{key:?}"),
			PathStep::Index(index) => write!(f, "[{index}]"),
		}
	}
}

impl<'a> From<&'a str> for PathStep<'a> {
	fn from(key: &'a str) -> Self {
		PathStep::Key(key)
	}
}

impl<'a> From<&'a String> for PathStep<'a> {
	fn from(key: &'a String) -> Self {
		PathStep::Key(key.as_str())
	}
}

macro_rules! impl_from_index {
	($($t:ty),+ $(,)?) => {
		$(
			impl From<$t> for PathStep<'_> {
				fn from(index: $t) -> Self {
					PathStep::Index(i64::from(index))
				}
			}
		)+
	};
}

impl_from_index!(u8, u16, u32, i8, i16, i32, i64);

// Indices past i64::MAX can never be in bounds anyway.
macro_rules! impl_from_wide_index {
	($($t:ty),+ $(,)?) => {
		$(
			impl From<$t> for PathStep<'_> {
				fn from(index: $t) -> Self {
					PathStep::Index(i64::try_from(index).unwrap_or(i64::MAX))
				}
			}
		)+
	};
}

impl_from_wide_index!(u64, usize, isize);

/// Builds a fixed-size array of [`PathStep`]s from keys and indices.
///
/// # Example
/// ```
/// use dynjson::{Json, path};
/// let json = Json::from_str(r#"{"a":{"b":[1,2,{"c":"x"}]}}"#).unwrap();
/// assert_eq!(json.get_path(&path!["a", "b", 2, "c"]).string(), "x");
/// ```
#[macro_export]
macro_rules! path {
	($($step:expr),* $(,)?) => {
		[$($crate::PathStep::from($step)),*]
	};
}
