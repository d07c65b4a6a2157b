//! Content browser queries
//!
//! The engine only lists asset paths, so type filtering happens here from naming
//! conventions (see [`asset_type::AssetType`]).

mod asset_type;
mod query;

pub use query::{list_available_assets, search_assets_recursively};
