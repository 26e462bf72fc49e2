//! Map → image rendering

use crate::grid::{Coord, GridDocument};
use crate::palette::TerrainPalette;
use crate::raster::{PixelSink, RasterError};

/// Paint `doc` into a new image, one pixel per cell.
///
/// The image starts filled with the wall color. Doors have no glyph of their
/// own and are painted like the terrain under them. Grids wider or taller
/// than `u32::MAX` cells are rejected.
pub fn render_image<S: PixelSink>(
    doc: &GridDocument,
    palette: &TerrainPalette,
) -> Result<S, RasterError> {
    let too_large = || RasterError::TooLarge {
        width: doc.width,
        height: doc.height,
    };
    let width = u32::try_from(doc.width).map_err(|_| too_large())?;
    let height = u32::try_from(doc.height).map_err(|_| too_large())?;

    let mut sink = S::new_image(width, height, palette.wall);
    for col in 0..width {
        for row in 0..height {
            if let Some(symbol) = doc.symbol_at(Coord::new(col as usize, row as usize)) {
                sink.set_pixel(col, row, palette.symbol_to_color(symbol));
            }
        }
    }
    Ok(sink)
}
