//! In-memory grid model
//!
//! A [`GridDocument`] owns the terrain matrix, the format tag and the
//! key/door registry. Queries on it use [`Coord`] (`col`, `row`), while the
//! matrix itself is indexed `[row][col]`.

mod coord;
mod document;
mod registry;

pub use coord::Coord;
pub use document::{GridDocument, DEFAULT_MAP_TYPE, FREE_SYMBOL, TREE_SYMBOL, WALL_SYMBOL};
pub use registry::{DoorRegistry, RegistryConflict};
