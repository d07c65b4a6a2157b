//! Multi-actor arrangements built from engine basic shapes
//!
//! Recipes are pure geometry: base location, scale and color in, an ordered list of
//! primitive parts out. The builder feeds each part to the regular mesh actor path.

mod builder;
mod recipe;

pub use builder::create_composite;
