//! Terrain palette: the color of each terrain symbol
//!
//! The palette is a closed three-entry table (wall, free ground, trees).
//! Anything it does not recognise is treated as a wall, in both directions.
//! Colors can be overridden from a TOML file; the symbols are fixed.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::grid::{FREE_SYMBOL, TREE_SYMBOL, WALL_SYMBOL};

/// An RGB triple
pub type Rgb = [u8; 3];

/// Red channel value that marks a pixel as a door
pub const DOOR_SENTINEL_RED: u8 = 42;

/// Errors that can occur when loading or parsing palettes
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read palette file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse palette TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid color for '{name}': {value} (expected #rgb or #rrggbb)")]
    InvalidColor { name: String, value: String },
}

/// Colors for the three terrain symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainPalette {
    /// Optional name for the palette
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub wall: Rgb,
    pub free: Rgb,
    pub tree: Rgb,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: TomlColors,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize, Default)]
struct TomlColors {
    wall: Option<String>,
    free: Option<String>,
    tree: Option<String>,
}

/// Default palette - black walls, white ground, green trees
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "default"
description = "Black walls, white ground, green trees"

[colors]
wall = "#000000"
free = "#ffffff"
tree = "#00ff00"
"##;

impl TerrainPalette {
    /// Load palette from TOML file
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load palette from TOML string. Missing colors keep their defaults.
    pub fn from_str(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;
        let colors = parsed.colors;

        Ok(TerrainPalette {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            wall: resolve_color("wall", colors.wall.as_deref(), [0, 0, 0])?,
            free: resolve_color("free", colors.free.as_deref(), [255, 255, 255])?,
            tree: resolve_color("tree", colors.tree.as_deref(), [0, 255, 0])?,
        })
    }

    /// Terrain symbol for a pixel color; unknown colors are walls
    pub fn color_to_symbol(&self, color: Rgb) -> char {
        if color == self.wall {
            WALL_SYMBOL
        } else if color == self.free {
            FREE_SYMBOL
        } else if color == self.tree {
            TREE_SYMBOL
        } else {
            WALL_SYMBOL
        }
    }

    /// Pixel color for a terrain symbol; unknown symbols get the wall color
    pub fn symbol_to_color(&self, symbol: char) -> Rgb {
        match symbol {
            FREE_SYMBOL => self.free,
            TREE_SYMBOL => self.tree,
            _ => self.wall,
        }
    }

    /// Door pixels are recognised by their red channel alone
    pub fn is_door_pixel(color: Rgb) -> bool {
        color[0] == DOOR_SENTINEL_RED
    }
}

impl Default for TerrainPalette {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

fn resolve_color(name: &str, value: Option<&str>, default: Rgb) -> Result<Rgb, PaletteError> {
    match value {
        Some(hex) => parse_hex(hex).ok_or_else(|| PaletteError::InvalidColor {
            name: name.to_string(),
            value: hex.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parse `#rgb` or `#rrggbb`
fn parse_hex(value: &str) -> Option<Rgb> {
    let digits = value.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (channel, c) in rgb.iter_mut().zip(digits.chars()) {
                let v = c.to_digit(16)? as u8;
                *channel = v * 17;
            }
            Some(rgb)
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, channel) in rgb.iter_mut().enumerate() {
                *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(rgb)
        }
        _ => None,
    }
}
