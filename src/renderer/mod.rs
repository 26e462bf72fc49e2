//! Writers for grid documents
//!
//! `text` produces the grid-map format, `bitmap` paints one pixel per cell.

pub mod bitmap;
pub mod text;

pub use bitmap::render_image;
pub use text::{serialize, serialize_with_placeholders};
