//! Per-face rendering
//!
//! A face render only reads the source, so any number of faces can be
//! rendered concurrently against the same buffer.

use crate::convert::validate_source;
use crate::error::Result;
use crate::face::Face;
use crate::geometry::{direction_to_spherical, pixel_to_direction, spherical_to_source};
use crate::image::Image;
use crate::sample::Sample;
use crate::sampler::bilinear_sample;

/// Number of progress notifications per face (at most).
const PROGRESS_STEPS: usize = 10;

/// Receives coarse progress notifications from face renders.
///
/// Passed explicitly into each render; implementations must not affect
/// the rendered result.
pub trait Progress: Sync {
    fn face_progress(&self, face: Face, rows_done: usize, rows_total: usize);
}

/// Discards all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn face_progress(&self, _face: Face, _rows_done: usize, _rows_total: usize) {}
}

/// Reports progress through `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn face_progress(&self, face: Face, rows_done: usize, rows_total: usize) {
        let percent = rows_done * 100 / rows_total.max(1);
        tracing::debug!("face {face}: {percent}% ({rows_done}/{rows_total} rows)");
    }
}

/// Render one cube face from an equirectangular source.
///
/// The face is `W/4` pixels square. Output pixel `(x = col, y = row)` looks
/// through the center of that pixel on the cube face.
pub fn render_face<T: Sample>(
    source: &Image<T>,
    face: Face,
    progress: &dyn Progress,
) -> Result<Image<T>> {
    let face_size = validate_source(source.width(), source.height())?;
    render_face_unchecked(source, face, face_size, progress)
}

/// Render without re-validating the source; `face_size` must be `W/4`.
pub(crate) fn render_face_unchecked<T: Sample>(
    source: &Image<T>,
    face: Face,
    face_size: usize,
    progress: &dyn Progress,
) -> Result<Image<T>> {
    let channels = source.channels();
    let source_width = source.width();
    let report_every = face_size.div_ceil(PROGRESS_STEPS).max(1);

    let mut data = vec![T::default(); face_size * face_size * channels];
    let mut pixel = vec![0.0f64; channels];

    for (row, row_data) in data.chunks_exact_mut(face_size * channels).enumerate() {
        for (col, out) in row_data.chunks_exact_mut(channels).enumerate() {
            let dir = pixel_to_direction(row, col, face, face_size);
            let (u, v) = spherical_to_source(direction_to_spherical(dir), source_width);
            bilinear_sample(source, u, v, &mut pixel);

            for (dst, &value) in out.iter_mut().zip(&pixel) {
                *dst = T::from_f64(value);
            }
        }

        let rows_done = row + 1;
        if rows_done % report_every == 0 || rows_done == face_size {
            progress.face_progress(face, rows_done, face_size);
        }
    }

    Image::new(face_size, face_size, channels, data)
}
