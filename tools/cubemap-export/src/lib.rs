//! cubemap-export library
//!
//! Decodes panoramas, runs the cubemap-core conversion and writes the faces.
//! Shared by the `cubemap-export` binary and its batch manifests.

pub mod codec;
pub mod manifest;
pub mod writer;

use anyhow::Result;
use cubemap_core::{ConvertOptions, Progress};
use std::path::{Path, PathBuf};

pub use manifest::CubemapManifest;

/// Decode `input`, convert it and write the results next to `output_base`.
///
/// Returns the files written. Nothing is written if validation fails.
pub fn convert_file(
    input: &Path,
    output_base: &Path,
    options: &ConvertOptions,
    progress: &dyn Progress,
) -> Result<Vec<PathBuf>> {
    let source = codec::load_panorama(input)?;
    let conversion = cubemap_core::convert(source, options, progress)?;
    writer::write_conversion(&conversion, output_base, options.raw_output)
}
