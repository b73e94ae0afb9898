//! The raster surface: a pixel-aligned 2-D array of score values.

use gridscore_core::Extent;
use gridscore_geom::Crs;
use ndarray::Array2;

/// A single-band raster of score values.
///
/// Row 0 is the northernmost pixel row, matching the usual raster
/// convention. Immutable once created by the burn pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterSurface {
    extent: Extent,
    pixel_size: f64,
    crs: Crs,
    nodata: u16,
    data: Array2<u16>,
}

impl RasterSurface {
    pub(crate) fn new(
        extent: Extent,
        pixel_size: f64,
        crs: Crs,
        nodata: u16,
        data: Array2<u16>,
    ) -> Self {
        Self {
            extent,
            pixel_size,
            crs,
            nodata,
            data,
        }
    }

    /// Bounding extent in CRS units.
    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Pixel edge length in CRS units (pixels are square).
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// The surface's CRS.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Sentinel for pixels outside every cell.
    pub fn nodata(&self) -> u16 {
        self.nodata
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// The underlying array, row-major with row 0 at the north edge.
    pub fn data(&self) -> &Array2<u16> {
        &self.data
    }

    /// Pixel value at a world coordinate, or `None` outside the extent.
    ///
    /// A returned value may still be the NoData sentinel; `None` only
    /// means the coordinate misses the raster entirely.
    pub fn value_at(&self, x: f64, y: f64) -> Option<u16> {
        if x < self.extent.min_x || y > self.extent.max_y {
            return None;
        }
        let col = ((x - self.extent.min_x) / self.pixel_size).floor() as usize;
        let row = ((self.extent.max_y - y) / self.pixel_size).floor() as usize;
        self.data.get((row, col)).copied()
    }
}

/// Snap an extent outward so it spans a whole number of pixels.
///
/// The minimum corner is kept fixed and the maximum corner grows; the
/// burned grid and the raster then stay aligned for any pixel size.
pub fn align_extent(extent: &Extent, pixel_size: f64) -> Extent {
    let cols = (extent.width() / pixel_size).ceil().max(1.0);
    let rows = (extent.height() / pixel_size).ceil().max(1.0);
    Extent {
        min_x: extent.min_x,
        min_y: extent.min_y,
        max_x: extent.min_x + cols * pixel_size,
        max_y: extent.min_y + rows * pixel_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_rounds_up_to_whole_pixels() {
        let e = Extent::new(0.0, 0.0, 9.5, 7.2);
        let a = align_extent(&e, 2.0);
        assert_eq!(a.max_x, 10.0);
        assert_eq!(a.max_y, 8.0);
        assert_eq!(a.min_x, 0.0);
    }

    #[test]
    fn already_aligned_extent_unchanged() {
        let e = Extent::new(0.0, 0.0, 10.0, 8.0);
        assert_eq!(align_extent(&e, 2.0), e);
    }

    #[test]
    fn degenerate_extent_gets_one_pixel() {
        let e = Extent::new(5.0, 5.0, 5.0, 5.0);
        let a = align_extent(&e, 2.0);
        assert_eq!(a.width(), 2.0);
        assert_eq!(a.height(), 2.0);
    }
}
