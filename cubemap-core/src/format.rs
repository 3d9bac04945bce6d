//! Working sample format resolution
//!
//! The working format is chosen once per conversion, before any face is
//! rendered, and applies to every face and to the packed output.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CubemapError;
use crate::image::DynImage;
use crate::sample::SampleType;

/// Requested output precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    /// Keep the source's own sample type
    #[default]
    Unspecified,
    /// IEEE 754 half-float
    Half,
    /// IEEE 754 single-float
    Single,
}

impl OutputFormat {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Half => "half",
            Self::Single => "single",
        }
    }

    /// Sample type this format forces, if any
    pub const fn sample_type(self) -> Option<SampleType> {
        match self {
            Self::Unspecified => None,
            Self::Half => Some(SampleType::F16),
            Self::Single => Some(SampleType::F32),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CubemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unspecified" | "native" => Ok(Self::Unspecified),
            "half" | "f16" | "float16" => Ok(Self::Half),
            "single" | "float" | "f32" | "float32" => Ok(Self::Single),
            _ => Err(CubemapError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = CubemapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.name().to_string()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversion that widens storage without recovering lost precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionAdvisory {
    pub from: SampleType,
    pub to: SampleType,
}

impl std::fmt::Display for PrecisionAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "converting {} to {} adds no precision: the source only carries {} significant bits",
            self.from,
            self.to,
            self.from.precision_bits()
        )
    }
}

/// Sample type used for rendering and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingFormat {
    pub sample_type: SampleType,
    pub advisory: Option<PrecisionAdvisory>,
}

/// Pick the working sample type for a source and a requested format.
///
/// Narrowing is always allowed. Widening is allowed too, but reports a
/// [`PrecisionAdvisory`] since the source data has already lost the bits.
pub fn resolve_working_format(source: SampleType, requested: OutputFormat) -> WorkingFormat {
    let Some(target) = requested.sample_type() else {
        return WorkingFormat {
            sample_type: source,
            advisory: None,
        };
    };

    let advisory = (target.precision_bits() > source.precision_bits()).then_some(
        PrecisionAdvisory {
            from: source,
            to: target,
        },
    );

    WorkingFormat {
        sample_type: target,
        advisory,
    }
}

/// Convert `source` to the working format, warning on precision-free widening.
pub fn apply_working_format(source: DynImage, requested: OutputFormat) -> (DynImage, WorkingFormat) {
    let working = resolve_working_format(source.sample_type(), requested);
    if let Some(advisory) = &working.advisory {
        tracing::warn!("{advisory}");
    }
    (source.into_sample_type(working.sample_type), working)
}
