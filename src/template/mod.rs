//! Template maps
//!
//! A template is grid-map text where some `key` lines carry the literal
//! placeholder `$key$` instead of a key coordinate. Instantiation replaces
//! each placeholder, first to last, with a free cell drawn at random.
//!
//! # Example
//!
//! ```text
//! type octile
//! height 2
//! width 3
//! key $key$ 2 1
//! map
//! ...
//! ..@
//! ```

mod instantiate;

pub use instantiate::{
    count_placeholders, draw_free_cells, instantiate, instantiate_with_options,
    InstantiateOptions, PlaceholderTemplate, TemplateError,
};
