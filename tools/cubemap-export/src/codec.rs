//! Panorama decoding
//!
//! Maps decoded `image` buffers onto typed cubemap-core images without
//! touching the sample values: 8-bit stays u8, 16-bit stays u16 and float
//! stays f32. Layouts the core has no type for are widened to RGBA f32.

use anyhow::{Context, Result};
use cubemap_core::{DynImage, Image};
use image::DynamicImage;
use std::path::Path;

/// Decode a panorama from disk.
pub fn load_panorama(path: &Path) -> Result<DynImage> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to load panorama: {}", path.display()))?;
    from_dynamic(decoded).with_context(|| format!("Unusable pixel data in {}", path.display()))
}

/// Wrap an `image` buffer as a [`DynImage`], keeping channel count and depth.
pub fn from_dynamic(decoded: DynamicImage) -> Result<DynImage> {
    let width = decoded.width() as usize;
    let height = decoded.height() as usize;

    let image = match decoded {
        DynamicImage::ImageLuma8(buf) => Image::new(width, height, 1, buf.into_raw())?.into(),
        DynamicImage::ImageLumaA8(buf) => Image::new(width, height, 2, buf.into_raw())?.into(),
        DynamicImage::ImageRgb8(buf) => Image::new(width, height, 3, buf.into_raw())?.into(),
        DynamicImage::ImageRgba8(buf) => Image::new(width, height, 4, buf.into_raw())?.into(),
        DynamicImage::ImageLuma16(buf) => Image::new(width, height, 1, buf.into_raw())?.into(),
        DynamicImage::ImageLumaA16(buf) => Image::new(width, height, 2, buf.into_raw())?.into(),
        DynamicImage::ImageRgb16(buf) => Image::new(width, height, 3, buf.into_raw())?.into(),
        DynamicImage::ImageRgba16(buf) => Image::new(width, height, 4, buf.into_raw())?.into(),
        DynamicImage::ImageRgb32F(buf) => Image::new(width, height, 3, buf.into_raw())?.into(),
        DynamicImage::ImageRgba32F(buf) => Image::new(width, height, 4, buf.into_raw())?.into(),
        other => {
            tracing::debug!("Widening {:?} input to RGBA f32", other.color());
            Image::new(width, height, 4, other.to_rgba32f().into_raw())?.into()
        }
    };

    Ok(image)
}
