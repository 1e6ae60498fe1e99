//! Dynamically-typed access to JSON documents of unknown shape.
//!
//! A [`Json`] wraps a decoded `serde_json::Value`. Lookups by key, index or
//! whole [path](PathStep) never panic: a lookup that does not resolve yields
//! an *absent* [`JsonRef`], on which every further lookup stays absent and
//! every defaulted accessor returns its default.
//!
//! ```
//! use dynjson::{Json, path};
//!
//! let json = Json::from_str(r#"{"results":[{"name":"a","score":3.0}]}"#).unwrap();
//! let first = json.get_path(&path!["results", 0]);
//! assert_eq!(first.get("name").string(), "a");
//! assert_eq!(first.get("score").int(), 3);
//! assert_eq!(first.get("rank").int_or(-1), -1);
//! assert!(json.get_path(&path!["results", 1]).check_map().is_err());
//! ```
//!
//! # Accessor families
//!
//! - `check_*` return a [`Result`] and fail with [`JsonError::TypeMismatch`]
//!   when the value has another kind.
//! - `string()`, `int()`, `bool()`, ... return the type's zero value on
//!   mismatch; `string_or(..)`, `int_or(..)`, ... return the given default.
//!
//! # Mutation
//!
//! `set`, `set_path` and `delete` act on the root. To change a nested value in
//! place, get a [`JsonMut`] with `get_mut`, `index_mut` or `get_path_mut`;
//! its writes land in the document it borrows from.
//!
//! # Threads
//!
//! [`Json`] and [`JsonRef`] are `Send + Sync`. Any number of threads may read
//! a shared `&Json` at the same time. Mutation needs `&mut Json`, so writers
//! must be serialized by the caller (for example with a `Mutex`).
//!
//! # Features
//!
//! - `preserve_order` (default): objects keep their insertion order when
//!   encoded. Without it, keys are encoded in sorted order.

mod error;
pub mod json;
mod path;

pub use error::{JsonError, Result};
pub use json::{Json, JsonMut, JsonRef};
pub use path::PathStep;

/// The version of this crate.
#[must_use]
pub fn version() -> &'static str {
	env!("CARGO_PKG_VERSION")
}
