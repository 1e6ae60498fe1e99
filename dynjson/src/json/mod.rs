//! The dynamic JSON document and the handles used to navigate it.

mod document;
mod mutable;
mod number;
mod reference;

pub use document::Json;
pub use mutable::JsonMut;
pub use reference::JsonRef;
