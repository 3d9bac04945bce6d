//! Inverse mapping from cube-face pixels to equirectangular coordinates
//!
//! Output pixel → point on the unit cube → (theta, phi) → fractional source
//! pixel. Every step is pure; adjacent faces agree along shared edges only if
//! each face's axis rule is applied exactly as written here.

use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::face::Face;

/// Longitude/latitude of a direction, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Longitude in [-π, π]
    pub theta: f64,
    /// Latitude in [-π/2, π/2]
    pub phi: f64,
}

impl Face {
    /// Point on the unit cube for normalized face offsets `a` (left→right)
    /// and `b` (top→bottom), both in (-1, 1).
    #[inline]
    pub fn direction(self, a: f64, b: f64) -> DVec3 {
        match self {
            Self::Back => DVec3::new(-1.0, -a, -b),
            Self::Left => DVec3::new(a, -1.0, -b),
            Self::Front => DVec3::new(1.0, a, -b),
            Self::Right => DVec3::new(-a, 1.0, -b),
            Self::Top => DVec3::new(b, a, 1.0),
            Self::Bottom => DVec3::new(-b, a, -1.0),
        }
    }
}

/// Direction through the center of pixel (`row`, `col`) of `face`.
#[inline]
pub fn pixel_to_direction(row: usize, col: usize, face: Face, face_size: usize) -> DVec3 {
    let size = face_size as f64;
    let a = 2.0 * (col as f64 + 0.5) / size - 1.0;
    let b = 2.0 * (row as f64 + 0.5) / size - 1.0;
    face.direction(a, b)
}

/// Longitude/latitude of a direction. The poles (x = y = 0) map to phi = ±π/2.
#[inline]
pub fn direction_to_spherical(dir: DVec3) -> Spherical {
    let theta = dir.y.atan2(dir.x);
    let r = dir.x.hypot(dir.y);
    let phi = dir.z.atan2(r);
    Spherical { theta, phi }
}

/// Fractional source pixel `(u, v)` for a spherical coordinate.
///
/// Both axes scale by the source width: with H = W/2 the vertical range
/// still spans exactly [0, H].
#[inline]
pub fn spherical_to_source(coord: Spherical, source_width: usize) -> (f64, f64) {
    let w = source_width as f64;
    let u = 0.5 * w * (coord.theta + PI) / PI;
    let v = 0.5 * w * (FRAC_PI_2 - coord.phi) / PI;
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::RENDER_ORDER;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_face_centers_point_along_axes() {
        // Odd face size puts a pixel center exactly at a = b = 0
        let expected = [
            (Face::Back, DVec3::NEG_X),
            (Face::Left, DVec3::NEG_Y),
            (Face::Front, DVec3::X),
            (Face::Right, DVec3::Y),
            (Face::Top, DVec3::Z),
            (Face::Bottom, DVec3::NEG_Z),
        ];
        for (face, axis) in expected {
            let dir = pixel_to_direction(1, 1, face, 3);
            assert!(dir.abs_diff_eq(axis, EPS), "{face}: {dir}");
        }
    }

    #[test]
    fn test_directions_lie_on_cube_surface() {
        for face in RENDER_ORDER {
            for row in 0..4 {
                for col in 0..4 {
                    let dir = pixel_to_direction(row, col, face, 4);
                    assert!((dir.abs().max_element() - 1.0).abs() < EPS);
                    assert!(dir.abs().min_element() < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_front_top_left_pixel() {
        // a = b = -0.75 for pixel (0, 0) of a 4×4 face
        let dir = pixel_to_direction(0, 0, Face::Front, 4);
        assert!(dir.abs_diff_eq(DVec3::new(1.0, -0.75, 0.75), EPS));
    }

    #[test]
    fn test_adjacent_faces_share_edges() {
        // Front's right edge (a → 1) meets right's left edge (a → -1)
        let front = Face::Front.direction(1.0, 0.3);
        let right = Face::Right.direction(-1.0, 0.3);
        assert!(front.abs_diff_eq(right, EPS));

        // Front's top edge (b → -1) meets top's bottom edge (b → 1)
        let front = Face::Front.direction(0.2, -1.0);
        let top = Face::Top.direction(0.2, 1.0);
        assert!(front.abs_diff_eq(top, EPS));
    }

    #[test]
    fn test_spherical_ranges() {
        let s = direction_to_spherical(DVec3::X);
        assert!(s.theta.abs() < EPS && s.phi.abs() < EPS);

        let s = direction_to_spherical(DVec3::Y);
        assert!((s.theta - FRAC_PI_2).abs() < EPS);

        let s = direction_to_spherical(DVec3::new(-1.0, 0.0, 0.0));
        assert!((s.theta.abs() - PI).abs() < EPS);
    }

    #[test]
    fn test_poles() {
        let up = direction_to_spherical(DVec3::Z);
        assert!((up.phi - FRAC_PI_2).abs() < EPS);

        let down = direction_to_spherical(DVec3::NEG_Z);
        assert!((down.phi + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_spherical_to_source() {
        let w = 16;
        let (u, v) = spherical_to_source(Spherical { theta: 0.0, phi: 0.0 }, w);
        assert!((u - 8.0).abs() < EPS);
        assert!((v - 4.0).abs() < EPS);

        let (u, v) = spherical_to_source(
            Spherical {
                theta: -PI,
                phi: FRAC_PI_2,
            },
            w,
        );
        assert!(u.abs() < EPS);
        assert!(v.abs() < EPS);

        // South pole lands on the bottom edge, v = H
        let (_, v) = spherical_to_source(
            Spherical {
                theta: 0.0,
                phi: -FRAC_PI_2,
            },
            w,
        );
        assert!((v - 8.0).abs() < EPS);
    }
}
