//! Header commands of the grid-map format

use crate::error::Span;
use crate::grid::Coord;

/// Node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A key and the doors it unlocks: `key <col> <row> [<col> <row>]*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDecl {
    pub key: Coord,
    pub doors: Vec<Coord>,
}

/// One line of the header block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderCommand {
    /// `height <int>`
    Height(usize),
    /// `width <int>`
    Width(usize),
    /// `type <token>`
    Type(String),
    /// `key <col> <row> <door col> <door row> ...`
    Key(KeyDecl),
    /// `key $key$ ...` in a template; not registered
    PlaceholderKey,
    /// Any other command word; ignored
    Unknown(String),
    /// Whitespace-only line
    Blank,
}
