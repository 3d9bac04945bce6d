//! Error type for cubemap conversion.
//!
//! Every variant is raised before any face is rendered, so a failed
//! conversion never leaves a partial face set behind.

/// Errors raised while validating a conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CubemapError {
    /// Requested output format name is not recognized
    #[error("unsupported output format '{0}' (expected unspecified, half, or single)")]
    UnsupportedFormat(String),

    /// Source width cannot be split into four whole faces
    #[error("source width {width} is not divisible by 4 (face size would be fractional)")]
    FaceSizeNotDivisible { width: usize },

    /// Source is not a 2:1 equirectangular panorama
    #[error("source is {width}x{height}, equirectangular input must be exactly 2:1")]
    AspectRatio { width: usize, height: usize },

    /// Source has no pixels
    #[error("source image is empty")]
    EmptySource,

    /// Buffer length disagrees with the declared dimensions
    #[error(
        "buffer holds {actual} samples, expected {expected} for {width}x{height} with {channels} channel(s)"
    )]
    BufferSize {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// Images need at least one channel
    #[error("channel count must be at least 1")]
    ZeroChannels,

    /// Fewer than six faces came back from the render pool
    #[error("rendered {rendered} of 6 cube faces")]
    IncompleteCubemap { rendered: usize },

    /// Worker pool needs at least one thread
    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    /// Rayon refused to build the worker pool
    #[error("failed to build render pool: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for CubemapError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CubemapError>;
