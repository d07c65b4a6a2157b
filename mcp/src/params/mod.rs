//! Parameter handling for tool calls
//!
//! Tool arguments arrive as a loosely structured blob. [`ParamInput`] is the boundary type,
//! resolved once into a [`ParamMap`] that operations read through typed accessors.

mod keys;
mod parser;
mod vector;

pub use keys::ParamKey;
pub use parser::{ParamInput, ParamMap};
pub use vector::VectorLayout;
