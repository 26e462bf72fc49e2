//! img2map - convert terrain images to MovingAI grid maps and back
//!
//! This library provides a reader and writer for the text grid-map format,
//! a key/door registry over grid coordinates, template instantiation for
//! maps whose keys are still placeholders, and the image conversions built
//! on top of them.
//!
//! # Example
//!
//! ```rust
//! use img2map::{parse, serialize, Coord};
//!
//! let doc = parse("type octile\nkey 0 0 2 0\nmap\n.@.\n").unwrap();
//! assert!(doc.is_door(Coord::new(2, 0)));
//! assert!(!doc.is_free(Coord::new(1, 0)));
//! assert_eq!(parse(&serialize(&doc)).unwrap(), doc);
//! ```

pub mod error;
pub mod grid;
pub mod palette;
pub mod parser;
pub mod raster;
pub mod renderer;
pub mod template;

pub use error::FormatError;
pub use grid::{Coord, DoorRegistry, GridDocument, FREE_SYMBOL, TREE_SYMBOL, WALL_SYMBOL};
pub use palette::{PaletteError, Rgb, TerrainPalette};
pub use parser::{parse, parse_with_options, ParseOptions};
pub use raster::{image_to_template, MapTemplate, PixelSink, PixelSource, RasterError};
pub use renderer::{render_image, serialize, serialize_with_placeholders};
pub use template::{instantiate, InstantiateOptions, PlaceholderTemplate, TemplateError};

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Errors that can occur in the file conversion pipeline
#[derive(Debug, Error)]
pub enum MapError {
    /// Malformed grid-map text
    #[error("{origin}: {error}")]
    Format {
        origin: String,
        text: String,
        error: FormatError,
    },

    /// Template could not be filled
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Grid could not be painted
    #[error("render error: {0}")]
    Raster(#[from] RasterError),

    /// Palette could not be loaded
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// Image could not be decoded or encoded
    #[error("image error on '{}': {error}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        error: image::ImageError,
    },

    /// File could not be read or written
    #[error("failed to access '{}': {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

impl MapError {
    fn format(origin: impl Into<String>, text: &str, error: FormatError) -> Self {
        MapError::Format {
            origin: origin.into(),
            text: text.to_string(),
            error,
        }
    }

    /// Human-readable report; format errors include the offending source line
    pub fn report(&self) -> String {
        match self {
            MapError::Format {
                origin,
                text,
                error,
            } => error.format(text, origin),
            other => other.to_string(),
        }
    }
}

/// Configuration for the conversion pipeline
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Terrain colors
    pub palette: TerrainPalette,
    /// Seed for key placement; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Reader settings
    pub parse: ParseOptions,
    /// Instantiation settings
    pub instantiate: InstantiateOptions,
}

impl ConvertConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the terrain palette
    pub fn with_palette(mut self, palette: TerrainPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Fix the random seed used for key placement
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Reject maps with shared doors or keys placed on doors
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.parse = self.parse.with_strict(strict);
        self
    }

    /// Never place two keys on the same cell
    pub fn with_distinct_keys(mut self, distinct: bool) -> Self {
        self.instantiate = self.instantiate.with_distinct_keys(distinct);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// `input` with `.extension` appended (`level.png` -> `level.png.map`)
pub fn default_output(input: &Path, extension: &str) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Convert an in-memory image to grid-map text.
///
/// Door pixels produce placeholder key lines, see [`raster`].
pub fn image_to_map_text(image: &RgbImage, config: &ConvertConfig) -> Result<String, MapError> {
    let template = image_to_template(image, &config.palette)
        .map_err(|e| MapError::format("<image>", "", e))?;
    Ok(template.to_text())
}

/// Fill the placeholders of template text with random free cells
pub fn instantiate_text(
    origin: &str,
    source: &str,
    config: &ConvertConfig,
) -> Result<String, MapError> {
    let template = PlaceholderTemplate::new(source);
    let doc = template
        .document(config.parse)
        .map_err(|e| MapError::format(origin, source, e))?;
    let mut rng = config.rng();
    Ok(template.instantiate(&doc, &mut rng, config.instantiate)?)
}

/// Read an image and write it as grid-map text. Returns the path written.
pub fn convert_image_file(
    input: &Path,
    output: Option<&Path>,
    config: &ConvertConfig,
) -> Result<PathBuf, MapError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, "map"));

    info!("Reading image {}", input.display());
    let image = raster::load_image(input).map_err(|error| MapError::Image {
        path: input.to_path_buf(),
        error,
    })?;
    let text = image_to_map_text(&image, config)?;

    info!("Writing map {}", output.display());
    write_text(&output, &text)?;
    Ok(output)
}

/// Read grid-map text and paint it as an image. Returns the path written.
pub fn convert_map_file(
    input: &Path,
    output: Option<&Path>,
    config: &ConvertConfig,
) -> Result<PathBuf, MapError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, "png"));

    info!("Reading map {}", input.display());
    let text = read_text(input)?;
    let doc = parse_with_options(&text, config.parse)
        .map_err(|e| MapError::format(input.display().to_string(), &text, e))?;

    let image: RgbImage = render_image(&doc, &config.palette)?;
    info!("Writing image {}", output.display());
    PixelSink::save(&image, &output).map_err(|error| MapError::Image {
        path: output.clone(),
        error,
    })?;
    Ok(output)
}

/// Instantiate a template map file. The result is written to `output` when
/// given, and returned either way.
pub fn instantiate_file(
    input: &Path,
    output: Option<&Path>,
    config: &ConvertConfig,
) -> Result<String, MapError> {
    info!("Reading template {}", input.display());
    let source = read_text(input)?;
    let text = instantiate_text(&input.display().to_string(), &source, config)?;

    if let Some(output) = output {
        info!("Writing map {}", output.display());
        write_text(output, &text)?;
    }
    Ok(text)
}

fn read_text(path: &Path) -> Result<String, MapError> {
    std::fs::read_to_string(path).map_err(|error| MapError::Io {
        path: path.to_path_buf(),
        error,
    })
}

fn write_text(path: &Path, text: &str) -> Result<(), MapError> {
    std::fs::write(path, text).map_err(|error| MapError::Io {
        path: path.to_path_buf(),
        error,
    })
}
