//! Face and packed cubemap writers
//!
//! File layout next to the output base `<dir>/<name>`:
//! ```text
//! <name>_<face>.<ext>    one file per face (back, left, front, right, top, bottom)
//! <name>_cube.<ext>      packed cubemap, faces stacked top to bottom
//! <name>_cube.json       packed layout summary
//! ```
//! `<ext>` is `raw` for verbatim sample bytes, `png` for integer samples and
//! `exr` for float samples.

use anyhow::{Context, Result};
use cubemap_core::{Conversion, CubemapOutput, DynImage, PackedSummary, SampleType};
use image::ExtendedColorType;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Suffix of the packed cubemap files.
pub const PACKED_SUFFIX: &str = "cube";

/// Sidecar describing a packed cubemap file.
#[derive(Debug, Serialize)]
pub struct PackedDescriptor<'a> {
    /// File name of the packed buffer
    pub file: String,
    /// "raw", "png" or "exr"
    pub encoding: &'static str,
    pub width: usize,
    pub height: usize,
    /// Bytes per sample of the raw buffer
    pub sample_bytes: usize,
    #[serde(flatten)]
    pub summary: &'a PackedSummary,
}

/// File extension for a buffer of `sample_type`.
pub fn extension(sample_type: SampleType, raw: bool) -> &'static str {
    if raw {
        "raw"
    } else if sample_type.is_float() {
        "exr"
    } else {
        "png"
    }
}

/// `<dir>/<name>_<suffix>.<ext>` for output base `<dir>/<name>`
pub fn output_path(base: &Path, suffix: &str, ext: &str) -> PathBuf {
    let name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cubemap".to_string());
    base.with_file_name(format!("{name}_{suffix}.{ext}"))
}

/// Write every buffer of a conversion; returns the files written.
pub fn write_conversion(conversion: &Conversion, base: &Path, raw: bool) -> Result<Vec<PathBuf>> {
    if let Some(parent) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let mut written = Vec::new();
    match &conversion.output {
        CubemapOutput::Faces(faces) => {
            for face in faces {
                let ext = extension(face.image.sample_type(), raw);
                let path = output_path(base, face.face.name(), ext);
                write_image(&face.image, &path, raw)?;
                tracing::debug!("Wrote {} face to {}", face.face, path.display());
                written.push(path);
            }
        }
        CubemapOutput::Packed(packed) => {
            let encoding = extension(packed.image.sample_type(), raw);
            let path = output_path(base, PACKED_SUFFIX, encoding);
            write_image(&packed.image, &path, raw)?;
            written.push(path.clone());

            let descriptor = PackedDescriptor {
                file: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                encoding,
                width: packed.image.width(),
                height: packed.image.height(),
                sample_bytes: packed.image.sample_type().bytes(),
                summary: &packed.summary,
            };
            let json_path = output_path(base, PACKED_SUFFIX, "json");
            write_descriptor(&descriptor, &json_path)?;
            written.push(json_path);
        }
    }

    Ok(written)
}

/// Write one buffer, raw or encoded.
pub fn write_image(image: &DynImage, path: &Path, raw: bool) -> Result<()> {
    if raw {
        std::fs::write(path, image.as_bytes())
            .with_context(|| format!("Failed to write raw buffer: {}", path.display()))
    } else {
        encode_image(image, path)
    }
}

/// Encode to PNG (integer samples) or OpenEXR (float samples).
///
/// Half-float faces are widened to f32 for the container; use raw output
/// to keep the f16 bytes.
pub fn encode_image(image: &DynImage, path: &Path) -> Result<()> {
    let width = u32::try_from(image.width()).context("Face width exceeds u32")?;
    let height = u32::try_from(image.height()).context("Face height exceeds u32")?;
    let channels = image.channels();

    let result = match image {
        DynImage::U8(img) => {
            let color = match channels {
                1 => ExtendedColorType::L8,
                2 => ExtendedColorType::La8,
                3 => ExtendedColorType::Rgb8,
                4 => ExtendedColorType::Rgba8,
                n => anyhow::bail!("Cannot encode {n}-channel 8-bit image (use --raw)"),
            };
            image::save_buffer(path, img.as_bytes(), width, height, color)
        }
        DynImage::U16(img) => {
            let color = match channels {
                1 => ExtendedColorType::L16,
                2 => ExtendedColorType::La16,
                3 => ExtendedColorType::Rgb16,
                4 => ExtendedColorType::Rgba16,
                n => anyhow::bail!("Cannot encode {n}-channel 16-bit image (use --raw)"),
            };
            image::save_buffer(path, img.as_bytes(), width, height, color)
        }
        DynImage::F16(_) | DynImage::F32(_) => {
            let color = match channels {
                3 => ExtendedColorType::Rgb32F,
                4 => ExtendedColorType::Rgba32F,
                n => anyhow::bail!("OpenEXR output needs 3 or 4 channels, got {n} (use --raw)"),
            };
            let widened = image.to_f32();
            image::save_buffer(path, widened.as_bytes(), width, height, color)
        }
    };

    result.with_context(|| format!("Failed to encode image: {}", path.display()))
}

fn write_descriptor(descriptor: &PackedDescriptor<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(descriptor).context("Failed to serialize summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))
}
