//! Image boundary: pixel access traits and image → map conversion
//!
//! One pixel is one cell. Door pixels (red channel 42) become free ground in
//! the grid and are grouped by their green/blue channels; each group turns
//! into a `key $key$ <doors...>` template line whose key is chosen later by
//! instantiation.

use std::path::Path;

use image::{ImageResult, RgbImage};
use log::debug;
use thiserror::Error;

use crate::error::FormatError;
use crate::grid::{Coord, GridDocument, FREE_SYMBOL};
use crate::palette::{Rgb, TerrainPalette};
use crate::renderer::serialize_with_placeholders;

/// Type tag written for maps converted from images
pub const IMAGE_MAP_TYPE: &str = "octile";

/// Errors that can occur when painting a grid into an image
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Image dimensions are `u32`; larger grids cannot be painted
    #[error("a {width}x{height} grid does not fit in an image")]
    TooLarge { width: usize, height: usize },
}

/// Read access to a decoded image
pub trait PixelSource {
    /// `(width, height)` in pixels
    fn dimensions(&self) -> (u32, u32);
    fn get_pixel(&self, col: u32, row: u32) -> Rgb;
}

/// Write access to an image being built
pub trait PixelSink: Sized {
    fn new_image(width: u32, height: u32, fill: Rgb) -> Self;
    fn set_pixel(&mut self, col: u32, row: u32, color: Rgb);
    fn save(&self, path: &Path) -> ImageResult<()>;
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn get_pixel(&self, col: u32, row: u32) -> Rgb {
        RgbImage::get_pixel(self, col, row).0
    }
}

impl PixelSink for RgbImage {
    fn new_image(width: u32, height: u32, fill: Rgb) -> Self {
        RgbImage::from_pixel(width, height, image::Rgb(fill))
    }

    fn set_pixel(&mut self, col: u32, row: u32, color: Rgb) {
        self.put_pixel(col, row, image::Rgb(color));
    }

    fn save(&self, path: &Path) -> ImageResult<()> {
        RgbImage::save(self, path)
    }
}

/// Decode an image file into RGB pixels
pub fn load_image(path: &Path) -> ImageResult<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// A grid converted from an image, with its door groups still keyless
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTemplate {
    pub document: GridDocument,
    /// Door cells grouped by door id, in first-seen order
    pub door_groups: Vec<Vec<Coord>>,
}

impl MapTemplate {
    /// Grid-map text with one placeholder key line per door group
    pub fn to_text(&self) -> String {
        serialize_with_placeholders(&self.document, &self.door_groups)
    }

    pub fn has_doors(&self) -> bool {
        !self.door_groups.is_empty()
    }
}

/// Convert an image into a grid, collecting door pixels into groups.
///
/// Pixels are scanned row by row; door ids are the `(green, blue)` channels.
pub fn image_to_template<P: PixelSource>(
    pixels: &P,
    palette: &TerrainPalette,
) -> Result<MapTemplate, FormatError> {
    let (width, height) = pixels.dimensions();
    let mut groups: Vec<((u8, u8), Vec<Coord>)> = Vec::new();
    let mut matrix = Vec::with_capacity(height as usize);

    for row in 0..height {
        let mut cells = Vec::with_capacity(width as usize);
        for col in 0..width {
            let color = pixels.get_pixel(col, row);
            if TerrainPalette::is_door_pixel(color) {
                let id = (color[1], color[2]);
                let door = Coord::new(col as usize, row as usize);
                match groups.iter_mut().find(|(gid, _)| *gid == id) {
                    Some((_, doors)) => doors.push(door),
                    None => groups.push((id, vec![door])),
                }
                cells.push(FREE_SYMBOL);
            } else {
                cells.push(palette.color_to_symbol(color));
            }
        }
        matrix.push(cells);
    }

    let document = GridDocument::from_rows(matrix)?.with_map_type(IMAGE_MAP_TYPE);
    debug!(
        "converted {}x{} image, {} door groups",
        width,
        height,
        groups.len()
    );

    Ok(MapTemplate {
        document,
        door_groups: groups.into_iter().map(|(_, doors)| doors).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(rows: &[&[Rgb]]) -> RgbImage {
        let mut img = RgbImage::new(rows[0].len() as u32, rows.len() as u32);
        for (row, pixels) in rows.iter().enumerate() {
            for (col, color) in pixels.iter().enumerate() {
                img.put_pixel(col as u32, row as u32, image::Rgb(*color));
            }
        }
        img
    }

    const W: Rgb = [0, 0, 0];
    const F: Rgb = [255, 255, 255];
    const T: Rgb = [0, 255, 0];

    #[test]
    fn test_plain_image() {
        let img = image(&[&[W, F, T], &[F, F, [9, 9, 9]]]);
        let template = image_to_template(&img, &TerrainPalette::default()).unwrap();

        assert!(!template.has_doors());
        assert_eq!(template.document.map_type, "octile");
        assert_eq!(template.document.width, 3);
        assert_eq!(template.document.height, 2);
        assert_eq!(
            template.to_text(),
            "type octile\nheight 2\nwidth 3\nmap\n@.T\n..@\n"
        );
    }

    #[test]
    fn test_door_pixels_grouped_by_id() {
        let d1: Rgb = [42, 1, 0];
        let d2: Rgb = [42, 2, 0];
        let img = image(&[&[F, d2, F], &[d1, F, d2]]);
        let template = image_to_template(&img, &TerrainPalette::default()).unwrap();

        assert_eq!(
            template.door_groups,
            vec![
                vec![Coord::new(1, 0), Coord::new(2, 1)],
                vec![Coord::new(0, 1)],
            ]
        );
        assert_eq!(template.document.symbol_at(Coord::new(1, 0)), Some('.'));
        assert_eq!(
            template.to_text(),
            "type octile\nheight 2\nwidth 3\nkey $key$ 1 0 2 1\nkey $key$ 0 1\nmap\n...\n...\n"
        );
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = RgbImage::new(0, 0);
        assert!(image_to_template(&img, &TerrainPalette::default()).is_err());
    }

    #[test]
    fn test_pixel_sink_fill_and_set() {
        let mut img = <RgbImage as PixelSink>::new_image(2, 2, [1, 2, 3]);
        img.set_pixel(1, 0, [9, 9, 9]);
        assert_eq!(PixelSource::get_pixel(&img, 0, 0), [1, 2, 3]);
        assert_eq!(PixelSource::get_pixel(&img, 1, 0), [9, 9, 9]);
        assert_eq!(PixelSource::dimensions(&img), (2, 2));
    }
}
