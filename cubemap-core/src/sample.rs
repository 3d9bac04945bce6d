//! Per-channel sample types
//!
//! Provides the numeric types a pixel channel can be stored in and the
//! conversions between them:
//! - u8 / u16 → raw integer values, no normalization
//! - f16 (IEEE 754 half-float) / f32 (single-float)
//!
//! Interpolation always happens in f64; values are only rounded when they
//! are stored back into a sample.

use half::f16;
use serde::{Deserialize, Serialize};

/// Numeric type of one channel of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleType {
    U8,
    U16,
    F16,
    F32,
}

impl SampleType {
    /// Size of one sample in bytes
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 | Self::F16 => 2,
            Self::F32 => 4,
        }
    }

    /// Significand bits the type can represent exactly.
    ///
    /// Used to decide whether a conversion adds precision or only width.
    #[inline]
    pub const fn precision_bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::F16 => 11,
            Self::F32 => 24,
        }
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Name used in logs and in packed summaries
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::F16 => "f16",
            Self::F32 => "f32",
        }
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A channel value that can be stored in an [`Image`](crate::Image).
pub trait Sample: bytemuck::Pod + Default + Send + Sync + 'static {
    const TYPE: SampleType;

    fn to_f64(self) -> f64;

    /// Store an interpolated value, rounding and saturating for integers
    fn from_f64(value: f64) -> Self;
}

impl Sample for u8 {
    const TYPE: SampleType = SampleType::U8;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        // `as` saturates and maps NaN to 0
        value.round() as u8
    }
}

impl Sample for u16 {
    const TYPE: SampleType = SampleType::U16;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value.round() as u16
    }
}

impl Sample for f16 {
    const TYPE: SampleType = SampleType::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        f16::from_f64(value)
    }
}

impl Sample for f32 {
    const TYPE: SampleType = SampleType::F32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_type_sizes() {
        assert_eq!(SampleType::U8.bytes(), 1);
        assert_eq!(SampleType::U16.bytes(), 2);
        assert_eq!(SampleType::F16.bytes(), 2);
        assert_eq!(SampleType::F32.bytes(), 4);
    }

    #[test]
    fn test_integer_store_rounds_and_saturates() {
        assert_eq!(u8::from_f64(127.5), 128);
        assert_eq!(u8::from_f64(127.49), 127);
        assert_eq!(u8::from_f64(300.0), 255);
        assert_eq!(u8::from_f64(-4.0), 0);
        assert_eq!(u16::from_f64(70000.0), u16::MAX);
    }

    #[test]
    fn test_integer_to_float_keeps_raw_value() {
        assert_eq!(f32::from_f64(200u8.to_f64()), 200.0);
        assert_eq!(f16::from_f64(128u8.to_f64()).to_f32(), 128.0);
    }

    #[test]
    fn test_half_loses_precision() {
        // 2049 is not representable with an 11-bit significand
        let stored = <f16 as Sample>::from_f64(2049.0);
        assert_eq!(Sample::to_f64(stored), 2048.0);
    }

    #[test]
    fn test_display_matches_serialized_name() {
        for ty in [SampleType::U8, SampleType::U16, SampleType::F16, SampleType::F32] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{ty}\""));
        }
    }

    #[test]
    fn test_precision_ordering() {
        assert!(SampleType::F32.precision_bits() > SampleType::F16.precision_bits());
        assert!(SampleType::F16.precision_bits() > SampleType::U8.precision_bits());
    }
}
