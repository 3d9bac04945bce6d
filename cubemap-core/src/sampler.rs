//! Bilinear sampling of an equirectangular source
//!
//! Longitude is periodic, so columns wrap around the seam. Latitude is not,
//! so rows clamp at the poles. With both policies every real `(u, v)` is
//! defined and sampling never fails.

use crate::image::Image;
use crate::sample::Sample;

/// Interpolate all channels at fractional source position `(u, v)` into `out`.
///
/// `out` must hold exactly `source.channels()` values. Results stay in f64;
/// rounding to the stored sample type is the caller's job. An empty source
/// yields zeros.
pub fn bilinear_sample<T: Sample>(source: &Image<T>, u: f64, v: f64, out: &mut [f64]) {
    debug_assert_eq!(out.len(), source.channels());

    if source.width() == 0 || source.height() == 0 {
        out.fill(0.0);
        return;
    }

    let width = source.width() as i64;
    let max_row = source.height() as i64 - 1;

    let uf = u.floor();
    let vf = v.floor();
    let mu = u - uf;
    let nu = v - vf;

    let ui = uf as i64;
    let vi = vf as i64;

    let col0 = ui.rem_euclid(width) as usize;
    let col1 = (ui + 1).rem_euclid(width) as usize;
    let row0 = vi.clamp(0, max_row) as usize;
    let row1 = (vi + 1).clamp(0, max_row) as usize;

    let a = source.pixel(col0, row0);
    let b = source.pixel(col1, row0);
    let c = source.pixel(col0, row1);
    let d = source.pixel(col1, row1);

    let wa = (1.0 - mu) * (1.0 - nu);
    let wb = mu * (1.0 - nu);
    let wc = (1.0 - mu) * nu;
    let wd = mu * nu;

    for (ch, value) in out.iter_mut().enumerate() {
        *value = a[ch].to_f64() * wa
            + b[ch].to_f64() * wb
            + c[ch].to_f64() * wc
            + d[ch].to_f64() * wd;
    }
}

/// Convenience wrapper returning a fresh pixel
pub fn sample_pixel<T: Sample>(source: &Image<T>, u: f64, v: f64) -> Vec<f64> {
    let mut out = vec![0.0; source.channels()];
    bilinear_sample(source, u, v, &mut out);
    out
}
