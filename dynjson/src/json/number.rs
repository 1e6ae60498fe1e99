//! Lossless conversion of JSON numbers into Rust integer types.

use num_traits::{FromPrimitive, PrimInt};
use serde_json::Number;

/// Convert a JSON number into the integer type `I`.
///
/// Returns `None` if the number is not finite, has a fractional part, or
/// does not fit into `I`.
pub(crate) fn number_to_int<I>(number: &Number) -> Option<I>
where
	I: PrimInt + FromPrimitive,
{
	if let Some(value) = number.as_i64() {
		return I::from_i64(value);
	}
	if let Some(value) = number.as_u64() {
		return I::from_u64(value);
	}
	let value = number.as_f64()?;
	if !value.is_finite() || value.fract() != 0.0 {
		return None;
	}
	I::from_f64(value)
}
