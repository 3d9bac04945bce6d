//! Equirectangular panorama → cubemap projection
//!
//! Resamples a 2:1 spherical panorama into the six faces of a cube seen from
//! its center, either as six square buffers or one packed buffer.
//!
//! Used by `cubemap-export` (CLI and batch manifests). Image containers are
//! not handled here; callers hand in a decoded [`DynImage`] and get typed
//! buffers back.

pub mod convert;
pub mod error;
pub mod face;
pub mod format;
pub mod geometry;
pub mod image;
pub mod render;
pub mod sample;
pub mod sampler;

pub use convert::{
    Conversion, ConvertOptions, CubemapOutput, FaceOutput, MAX_CONCURRENCY, PackedCubemap,
    PackedSummary, convert, pack_faces, validate_source,
};
pub use error::CubemapError;
pub use face::{CUBEMAP_FACE_COUNT, Face, PACKED_ORDER, RENDER_ORDER};
pub use format::{OutputFormat, PrecisionAdvisory, WorkingFormat, resolve_working_format};
pub use image::{DynImage, Image};
pub use render::{LogProgress, NoProgress, Progress, render_face};
pub use sample::{Sample, SampleType};

// Re-export so callers can build half-float images without a direct dependency
pub use half::f16;
