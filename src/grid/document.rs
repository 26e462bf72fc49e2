//! The grid document and its key/door queries

use std::fmt;

use rand::Rng;

use crate::error::FormatError;
use crate::template::{draw_free_cells, TemplateError};

use super::{Coord, DoorRegistry};

/// Impassable terrain
pub const WALL_SYMBOL: char = '@';
/// Passable ground
pub const FREE_SYMBOL: char = '.';
/// Trees
pub const TREE_SYMBOL: char = 'T';

/// Type tag used when the header does not declare one
pub const DEFAULT_MAP_TYPE: &str = "unknown";

/// A parsed grid map
///
/// `matrix` is indexed `[row][col]`; every other API takes a [`Coord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDocument {
    pub matrix: Vec<Vec<char>>,
    pub height: usize,
    pub width: usize,
    /// Free-form format tag (`octile`, `unknown`, ...)
    pub map_type: String,
    pub doors: DoorRegistry,
}

impl GridDocument {
    /// Build a document from terrain rows, deriving the dimensions from them.
    pub fn from_rows(matrix: Vec<Vec<char>>) -> Result<Self, FormatError> {
        let width = match matrix.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(FormatError::EmptyMatrix { span: 0..0 }),
        };
        if let Some((row, cells)) = matrix.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(FormatError::RowLength {
                row,
                expected: width,
                found: cells.len(),
                span: 0..0,
            });
        }

        Ok(Self {
            height: matrix.len(),
            width,
            matrix,
            map_type: DEFAULT_MAP_TYPE.to_string(),
            doors: DoorRegistry::new(),
        })
    }

    /// A `width` x `height` grid where every cell is `symbol`
    pub fn filled(width: usize, height: usize, symbol: char) -> Self {
        Self {
            matrix: vec![vec![symbol; width]; height],
            height,
            width,
            map_type: DEFAULT_MAP_TYPE.to_string(),
            doors: DoorRegistry::new(),
        }
    }

    pub fn with_map_type(mut self, map_type: impl Into<String>) -> Self {
        self.map_type = map_type.into();
        self
    }

    /// Terrain symbol at `coord`, or `None` outside the grid
    pub fn symbol_at(&self, coord: Coord) -> Option<char> {
        self.matrix
            .get(coord.row)
            .and_then(|row| row.get(coord.col))
            .copied()
    }

    pub fn is_door(&self, coord: Coord) -> bool {
        self.doors.contains_door(coord)
    }

    pub fn is_key(&self, coord: Coord) -> bool {
        self.doors.contains_key(coord)
    }

    /// A cell is free when it is inside the grid, not a wall and not a door.
    /// Keys do not block movement.
    pub fn is_free(&self, coord: Coord) -> bool {
        match self.symbol_at(coord) {
            Some(symbol) => symbol != WALL_SYMBOL && !self.is_door(coord),
            None => false,
        }
    }

    /// The key that unlocks `door`, if any
    pub fn find_key(&self, door: Coord) -> Option<Coord> {
        self.doors.find_key(door)
    }

    /// Every free cell, columns in the outer loop and rows in the inner one.
    ///
    /// Seeded sampling depends on this order.
    pub fn all_free(&self) -> Vec<Coord> {
        (0..self.width)
            .flat_map(|col| (0..self.height).map(move |row| Coord::new(col, row)))
            .filter(|&coord| self.is_free(coord))
            .collect()
    }

    /// One uniformly chosen free cell
    pub fn random_free<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Coord, TemplateError> {
        let free = self.all_free();
        let drawn = draw_free_cells(&free, 1, false, rng)?;
        drawn.into_iter().next().ok_or(TemplateError::NoFreeCell)
    }
}

impl fmt::Display for GridDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Moving AI Map")?;
        writeln!(f, "\ttype = {}", self.map_type)?;
        writeln!(f, "\theight = {}", self.height)?;
        writeln!(f, "\twidth = {}", self.width)?;
        write!(f, "\tkey-doors = {{")?;
        for (index, (key, doors)) in self.doors.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            let doors: Vec<String> = doors.iter().map(|d| d.to_string()).collect();
            write!(f, "{}: [{}]", key, doors.join(", "))?;
        }
        write!(f, "}}")
    }
}
