//! Equirectangular → cubemap conversion driver
//!
//! Validation and format resolution happen up front; only then are the six
//! faces rendered on a bounded rayon pool. Faces are collected by identity,
//! never by completion order, so the packed layout is always the static
//! [`PACKED_ORDER`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{CubemapError, Result};
use crate::face::{CUBEMAP_FACE_COUNT, Face, PACKED_ORDER, RENDER_ORDER};
use crate::format::{OutputFormat, WorkingFormat, apply_working_format};
use crate::image::{DynImage, Image};
use crate::render::{Progress, render_face_unchecked};
use crate::sample::{Sample, SampleType};

/// Upper bound on render workers; there is never more than one per face.
pub const MAX_CONCURRENCY: usize = CUBEMAP_FACE_COUNT;

/// Conversion options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Target sample precision
    pub output_format: OutputFormat,
    /// Write uninterpreted sample bytes instead of an encoded image.
    /// Not used by the core; carried for the output writer.
    pub raw_output: bool,
    /// Emit one buffer in packed order instead of six faces
    pub packed: bool,
    /// Render workers (1-6)
    pub threads: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Unspecified,
            raw_output: false,
            packed: false,
            threads: MAX_CONCURRENCY,
        }
    }
}

/// One rendered face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceOutput {
    pub face: Face,
    pub image: DynImage,
}

/// Layout of a packed cubemap, for downstream import tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedSummary {
    pub face_size: usize,
    pub face_count: usize,
    pub channels: usize,
    pub sample_type: SampleType,
    /// Face names, in buffer order
    pub order: Vec<String>,
}

impl std::fmt::Display for PackedSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} faces of {}x{}, {} channel(s), {} [{}]",
            self.face_count,
            self.face_size,
            self.face_size,
            self.channels,
            self.sample_type,
            self.order.join(", ")
        )
    }
}

/// All six faces stacked along a leading axis: `face_size × (6 * face_size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedCubemap {
    pub image: DynImage,
    pub summary: PackedSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CubemapOutput {
    /// Six faces in render order
    Faces(Vec<FaceOutput>),
    Packed(PackedCubemap),
}

/// Result of a conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub output: CubemapOutput,
    pub working: WorkingFormat,
}

/// Check equirectangular dimensions and return the face size (`W/4`).
pub fn validate_source(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(CubemapError::EmptySource);
    }
    if width != 2 * height {
        return Err(CubemapError::AspectRatio { width, height });
    }
    if width % 4 != 0 {
        return Err(CubemapError::FaceSizeNotDivisible { width });
    }
    Ok(width / 4)
}

fn validate_threads(threads: usize) -> Result<usize> {
    if threads == 0 {
        return Err(CubemapError::InvalidConcurrency);
    }
    Ok(threads.min(MAX_CONCURRENCY))
}

/// Convert an equirectangular panorama into six cube faces.
///
/// Every error is raised before rendering starts.
pub fn convert(
    source: DynImage,
    options: &ConvertOptions,
    progress: &dyn Progress,
) -> Result<Conversion> {
    let face_size = validate_source(source.width(), source.height())?;
    let threads = validate_threads(options.threads)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("cubemap-face-{i}"))
        .build()?;

    tracing::info!(
        "Converting {}x{} {} panorama ({} channel(s)) into {face_size}x{face_size} faces",
        source.width(),
        source.height(),
        source.sample_type(),
        source.channels()
    );

    let (source, working) = apply_working_format(source, options.output_format);

    let output = pool.install(|| match &source {
        DynImage::U8(image) => assemble(image, face_size, options.packed, progress),
        DynImage::U16(image) => assemble(image, face_size, options.packed, progress),
        DynImage::F16(image) => assemble(image, face_size, options.packed, progress),
        DynImage::F32(image) => assemble(image, face_size, options.packed, progress),
    })?;

    tracing::info!("Cubemap complete ({})", working.sample_type);

    Ok(Conversion { output, working })
}

/// Render all faces of a typed source and lay them out.
fn assemble<T: Sample>(
    source: &Image<T>,
    face_size: usize,
    packed: bool,
    progress: &dyn Progress,
) -> Result<CubemapOutput>
where
    Image<T>: Into<DynImage>,
{
    let faces = render_all(source, face_size, progress)?;

    if packed {
        let packed = pack_faces(&faces)?;
        let summary = PackedSummary {
            face_size,
            face_count: CUBEMAP_FACE_COUNT,
            channels: source.channels(),
            sample_type: T::TYPE,
            order: PACKED_ORDER
                .iter()
                .map(|face| face.packed_name().to_string())
                .collect(),
        };
        tracing::info!("Packed cubemap: {summary}");
        return Ok(CubemapOutput::Packed(PackedCubemap {
            image: packed.into(),
            summary,
        }));
    }

    Ok(CubemapOutput::Faces(
        RENDER_ORDER
            .into_iter()
            .zip(faces)
            .map(|(face, image)| FaceOutput {
                face,
                image: image.into(),
            })
            .collect(),
    ))
}

/// Render the six faces in parallel, returned in render order.
fn render_all<T: Sample>(
    source: &Image<T>,
    face_size: usize,
    progress: &dyn Progress,
) -> Result<[Image<T>; CUBEMAP_FACE_COUNT]> {
    let mut rendered: Vec<(Face, Image<T>)> = RENDER_ORDER
        .par_iter()
        .map(|&face| {
            let image = render_face_unchecked(source, face, face_size, progress)?;
            tracing::debug!("Rendered face {face}");
            Ok((face, image))
        })
        .collect::<Result<_>>()?;

    rendered.sort_by_key(|(face, _)| face.index());
    let faces: Vec<Image<T>> = rendered.into_iter().map(|(_, image)| image).collect();
    faces
        .try_into()
        .map_err(|faces: Vec<Image<T>>| CubemapError::IncompleteCubemap {
            rendered: faces.len(),
        })
}

/// Stack faces given in render order into packed order.
pub fn pack_faces<T: Sample>(faces: &[Image<T>; CUBEMAP_FACE_COUNT]) -> Result<Image<T>> {
    let ordered: Vec<&Image<T>> = PACKED_ORDER
        .iter()
        .map(|face| &faces[face.index()])
        .collect();
    Image::stack(&ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NoProgress;

    #[test]
    fn test_validate_source() {
        assert_eq!(validate_source(8, 4), Ok(2));
        assert_eq!(validate_source(4096, 2048), Ok(1024));
        assert_eq!(
            validate_source(8, 5),
            Err(CubemapError::AspectRatio {
                width: 8,
                height: 5
            })
        );
        assert_eq!(
            validate_source(10, 5),
            Err(CubemapError::FaceSizeNotDivisible { width: 10 })
        );
        assert_eq!(validate_source(0, 0), Err(CubemapError::EmptySource));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let source: DynImage = Image::<u8>::filled(8, 4, &[0]).unwrap().into();
        let options = ConvertOptions {
            threads: 0,
            ..Default::default()
        };
        assert_eq!(
            convert(source, &options, &NoProgress).unwrap_err(),
            CubemapError::InvalidConcurrency
        );
    }

    #[test]
    fn test_threads_capped_at_face_count() {
        assert_eq!(validate_threads(64), Ok(MAX_CONCURRENCY));
        assert_eq!(validate_threads(2), Ok(2));
    }

    #[test]
    fn test_pack_faces_uses_packed_order() {
        let faces: [Image<u8>; CUBEMAP_FACE_COUNT] =
            std::array::from_fn(|i| Image::filled(2, 2, &[i as u8]).unwrap());
        let packed = pack_faces(&faces).unwrap();

        assert_eq!(packed.width(), 2);
        assert_eq!(packed.height(), 12);
        for (slot, face) in PACKED_ORDER.iter().enumerate() {
            assert_eq!(packed.pixel(0, slot * 2)[0], face.index() as u8);
            assert_eq!(packed.pixel(1, slot * 2 + 1)[0], face.index() as u8);
        }
    }

    #[test]
    fn test_options_from_partial_config() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"output_format": "half", "packed": true}"#).unwrap();
        assert_eq!(options.output_format, OutputFormat::Half);
        assert!(options.packed);
        assert!(!options.raw_output);
        assert_eq!(options.threads, MAX_CONCURRENCY);
    }

    #[test]
    fn test_summary_display() {
        let summary = PackedSummary {
            face_size: 512,
            face_count: 6,
            channels: 3,
            sample_type: SampleType::F16,
            order: vec!["right".into(), "left".into()],
        };
        assert_eq!(
            summary.to_string(),
            "6 faces of 512x512, 3 channel(s), f16 [right, left]"
        );
    }
}
