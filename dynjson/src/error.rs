//! Error type shared by every fallible operation in this crate.

/// A type alias for `std::result::Result` that uses [`JsonError`] as the error type.
pub type Result<T> = std::result::Result<T, JsonError>;

/// Errors produced while decoding, encoding or inspecting a JSON document.
#[derive(Debug)]
pub enum JsonError {
	/// The input bytes were not well-formed JSON.
	Decode(serde_json::Error),
	/// The wrapped value could not be serialized.
	Encode(serde_json::Error),
	/// The wrapped value is not of the requested kind, or it cannot be
	/// represented losslessly as the requested numeric type.
	TypeMismatch {
		expected: &'static str,
		found: &'static str,
	},
}

impl JsonError {
	pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
		JsonError::TypeMismatch { expected, found }
	}

	/// Returns `true` if this is a [`JsonError::TypeMismatch`].
	pub fn is_type_mismatch(&self) -> bool {
		matches!(self, JsonError::TypeMismatch { .. })
	}
}

impl std::fmt::Display for JsonError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			JsonError::Decode(e) => write!(f, "while decoding JSON: {e}"),
			JsonError::Encode(e) => write!(f, "while encoding JSON: {e}"),
			JsonError::TypeMismatch { expected, found } => {
				write!(f, "type assertion to {expected} failed, found {found}")
			}
		}
	}
}

impl std::error::Error for JsonError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			JsonError::Decode(e) | JsonError::Encode(e) => Some(e),
			JsonError::TypeMismatch { .. } => None,
		}
	}
}
