//! The burn pass: scored cells to pixels.

use crate::error::RasterError;
use crate::surface::RasterSurface;
use gridscore_core::Extent;
use gridscore_grid::CellArena;
use ndarray::Array2;

/// Burn a scored grid into a raster aligned to `extent` and
/// `pixel_size`.
///
/// A pixel holds the score of whichever cell covers its centre; pixels
/// covered by no cell hold `nodata`. Cells are burned in id order, so
/// where two cells overlap (possible at part seams of a multi-part
/// boundary) the later id wins — both cells carry scores from the same
/// layer, so the choice is immaterial.
pub fn burn(
    arena: &CellArena,
    extent: &Extent,
    pixel_size: f64,
    nodata: u16,
) -> Result<RasterSurface, RasterError> {
    if !(pixel_size > 0.0 && pixel_size.is_finite()) {
        return Err(RasterError::InvalidPixelSize { pixel_size });
    }
    if extent.is_degenerate() {
        return Err(RasterError::EmptyExtent);
    }

    let cols = (extent.width() / pixel_size).ceil() as usize;
    let rows = (extent.height() / pixel_size).ceil() as usize;
    let mut data = Array2::from_elem((rows, cols), nodata);

    for cell in arena.cells() {
        let score = cell
            .score
            .ok_or(RasterError::MissingScore { cell: cell.id })?;
        let value = u16::from(score.0);

        // Clamped pixel window around the cell, then a centre-in-cell
        // test per pixel. Half-open on the max edge so a pixel centre
        // on a shared cell edge burns once.
        let col_lo = (((cell.rect.min().x - extent.min_x) / pixel_size).floor()).max(0.0) as usize;
        let col_hi =
            ((((cell.rect.max().x - extent.min_x) / pixel_size).ceil()) as usize).min(cols);
        let row_lo = (((extent.max_y - cell.rect.max().y) / pixel_size).floor()).max(0.0) as usize;
        let row_hi =
            ((((extent.max_y - cell.rect.min().y) / pixel_size).ceil()) as usize).min(rows);

        for row in row_lo..row_hi {
            let cy = extent.max_y - (row as f64 + 0.5) * pixel_size;
            for col in col_lo..col_hi {
                let cx = extent.min_x + (col as f64 + 0.5) * pixel_size;
                let covered = cx >= cell.rect.min().x
                    && cx < cell.rect.max().x
                    && cy >= cell.rect.min().y
                    && cy < cell.rect.max().y;
                if covered {
                    data[(row, col)] = value;
                }
            }
        }
    }

    Ok(RasterSurface::new(
        *extent,
        pixel_size,
        arena.crs().clone(),
        nodata,
        data,
    ))
}
