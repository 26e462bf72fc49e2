//! Reader for the text grid-map format

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::{parse, parse_header_line, parse_with_options, ParseOptions, MAP_SEPARATOR};
