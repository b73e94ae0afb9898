//! TIFF output with world-file georeferencing.

use crate::error::RasterError;
use crate::surface::RasterSurface;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tiff::encoder::{colortype, TiffEncoder};

/// Write a surface as a single-band 16-bit TIFF plus a `.tfw` world
/// file carrying the affine geotransform.
///
/// If the encoder reports a failure mid-write the partial file is
/// removed before the error propagates — a truncated raster must never
/// be mistaken for output.
pub fn write_tiff(surface: &RasterSurface, path: &Path) -> Result<(), RasterError> {
    let io_err = |reason: String| RasterError::Io {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::create(path).map_err(|e| io_err(format!("create failed: {e}")))?;
    let pixels: Vec<u16> = surface.data().iter().copied().collect();

    let result = TiffEncoder::new(file).and_then(|mut encoder| {
        encoder.write_image::<colortype::Gray16>(
            surface.width() as u32,
            surface.height() as u32,
            &pixels,
        )
    });
    if let Err(e) = result {
        let _ = fs::remove_file(path);
        return Err(RasterError::Backend {
            reason: e.to_string(),
        });
    }

    write_world_file(surface, &world_file_path(path))
}

/// The `.tfw` sidecar path for a raster path.
pub fn world_file_path(raster_path: &Path) -> PathBuf {
    raster_path.with_extension("tfw")
}

/// Six-line ESRI world file: pixel sizes, rotation terms, and the
/// centre of the top-left pixel.
fn write_world_file(surface: &RasterSurface, path: &Path) -> Result<(), RasterError> {
    let px = surface.pixel_size();
    let extent = surface.extent();
    let origin_x = extent.min_x + px / 2.0;
    let origin_y = extent.max_y - px / 2.0;
    let contents = format!("{px}\n0.0\n0.0\n-{px}\n{origin_x}\n{origin_y}\n");
    fs::write(path, contents).map_err(|e| RasterError::Io {
        path: path.to_path_buf(),
        reason: format!("world file write failed: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burn::burn;
    use geo::{coord, Rect};
    use gridscore_core::{Extent, Score};
    use gridscore_geom::Crs;
    use gridscore_grid::CellArena;
    use tiff::decoder::{Decoder, DecodingResult};

    fn one_cell_surface() -> RasterSurface {
        let mut arena = CellArena::new(2.0, 2.0, Crs::Epsg(3857));
        arena.push_cell(Rect::new(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 2.0, y: 2.0 },
        ));
        arena.apply_statistics(&[1.0]).unwrap();
        arena.apply_scores(|_| Score(4));
        burn(&arena, &Extent::new(0.0, 0.0, 2.0, 2.0), 1.0, 9).unwrap()
    }

    #[test]
    fn tiff_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.tif");
        let surface = one_cell_surface();
        write_tiff(&surface, &path).unwrap();

        let mut decoder = Decoder::new(File::open(&path).unwrap()).unwrap();
        let (w, h) = decoder.dimensions().unwrap();
        assert_eq!((w, h), (2, 2));
        match decoder.read_image().unwrap() {
            DecodingResult::U16(values) => {
                assert_eq!(values, vec![4, 4, 4, 4]);
            }
            other => panic!("unexpected decoding result: {other:?}"),
        }
    }

    #[test]
    fn world_file_written_alongside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.tif");
        write_tiff(&one_cell_surface(), &path).unwrap();

        let tfw = world_file_path(&path);
        let text = std::fs::read_to_string(tfw).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "1");
        assert_eq!(lines[3], "-1");
        // Centre of the top-left pixel.
        assert_eq!(lines[4], "0.5");
        assert_eq!(lines[5], "1.5");
    }
}
