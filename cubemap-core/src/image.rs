//! Interleaved pixel buffers
//!
//! [`Image`] is a row-major, channel-interleaved buffer of one sample type.
//! [`DynImage`] erases the sample type so decoders and writers can hand
//! buffers across without knowing it at compile time.

use half::f16;

use crate::error::{CubemapError, Result};
use crate::sample::{Sample, SampleType};

/// Row-major interleaved image with `channels` samples per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<T>,
}

impl<T: Sample> Image<T> {
    /// Wrap an existing buffer, checking its length against the dimensions
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<T>) -> Result<Self> {
        if channels == 0 {
            return Err(CubemapError::ZeroChannels);
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(CubemapError::BufferSize {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Image where every pixel equals `pixel`
    pub fn filled(width: usize, height: usize, pixel: &[T]) -> Result<Self> {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * pixel.len())
            .collect();
        Self::new(width, height, pixel.len(), data)
    }

    /// Image built from a per-pixel function of `(x, y)`
    pub fn from_fn(
        width: usize,
        height: usize,
        channels: usize,
        mut f: impl FnMut(usize, usize) -> Vec<T>,
    ) -> Result<Self> {
        let mut data = Vec::with_capacity(width * height * channels);
        for y in 0..height {
            for x in 0..width {
                let pixel = f(x, y);
                if pixel.len() != channels {
                    return Err(CubemapError::BufferSize {
                        width,
                        height,
                        channels,
                        expected: channels,
                        actual: pixel.len(),
                    });
                }
                data.extend_from_slice(&pixel);
            }
        }
        Self::new(width, height, channels, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn sample_type(&self) -> SampleType {
        T::TYPE
    }

    /// Channels of the pixel at column `x`, row `y`
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[T] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    pub fn samples(&self) -> &[T] {
        &self.data
    }

    /// Raw sample bytes in native byte order
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Convert every sample to another type
    pub fn cast<U: Sample>(&self) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|&s| U::from_f64(s.to_f64())).collect(),
        }
    }

    /// Stack images of identical shape on top of each other.
    ///
    /// The result is `width × (height * n)`; sample data is the plain
    /// concatenation of the inputs.
    pub fn stack(images: &[&Image<T>]) -> Result<Self> {
        let Some(first) = images.first() else {
            return Err(CubemapError::EmptySource);
        };
        let mut data = Vec::with_capacity(first.data.len() * images.len());
        for image in images {
            if image.width != first.width
                || image.height != first.height
                || image.channels != first.channels
            {
                return Err(CubemapError::BufferSize {
                    width: first.width,
                    height: first.height,
                    channels: first.channels,
                    expected: first.data.len(),
                    actual: image.data.len(),
                });
            }
            data.extend_from_slice(&image.data);
        }
        Self::new(
            first.width,
            first.height * images.len(),
            first.channels,
            data,
        )
    }
}

/// Image whose sample type is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum DynImage {
    U8(Image<u8>),
    U16(Image<u16>),
    F16(Image<f16>),
    F32(Image<f32>),
}

macro_rules! dyn_image_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<Image<$ty>> for DynImage {
                fn from(image: Image<$ty>) -> Self {
                    Self::$variant(image)
                }
            }
        )*
    };
}

dyn_image_from!(U8 => u8, U16 => u16, F16 => f16, F32 => f32);

macro_rules! dispatch {
    ($self:expr, $image:ident => $body:expr) => {
        match $self {
            DynImage::U8($image) => $body,
            DynImage::U16($image) => $body,
            DynImage::F16($image) => $body,
            DynImage::F32($image) => $body,
        }
    };
}

impl DynImage {
    pub fn width(&self) -> usize {
        dispatch!(self, image => image.width())
    }

    pub fn height(&self) -> usize {
        dispatch!(self, image => image.height())
    }

    pub fn channels(&self) -> usize {
        dispatch!(self, image => image.channels())
    }

    pub fn sample_type(&self) -> SampleType {
        dispatch!(self, image => image.sample_type())
    }

    pub fn as_bytes(&self) -> &[u8] {
        dispatch!(self, image => image.as_bytes())
    }

    /// Convert to `target`, returning `self` untouched when it already matches
    pub fn into_sample_type(self, target: SampleType) -> DynImage {
        if self.sample_type() == target {
            return self;
        }
        dispatch!(&self, image => match target {
            SampleType::U8 => DynImage::U8(image.cast()),
            SampleType::U16 => DynImage::U16(image.cast()),
            SampleType::F16 => DynImage::F16(image.cast()),
            SampleType::F32 => DynImage::F32(image.cast()),
        })
    }

    /// Widen to single-float, e.g. for containers without half support
    pub fn to_f32(&self) -> Image<f32> {
        dispatch!(self, image => image.cast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        let err = Image::<u8>::new(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            CubemapError::BufferSize {
                expected: 12,
                actual: 11,
                ..
            }
        ));
        assert_eq!(
            Image::<u8>::new(2, 2, 0, vec![]).unwrap_err(),
            CubemapError::ZeroChannels
        );
    }

    #[test]
    fn test_pixel_addressing() {
        let image = Image::<u8>::from_fn(3, 2, 2, |x, y| vec![x as u8, y as u8]).unwrap();
        assert_eq!(image.pixel(0, 0), &[0, 0]);
        assert_eq!(image.pixel(2, 1), &[2, 1]);
        assert_eq!(image.samples().len(), 12);
    }

    #[test]
    fn test_stack_concatenates_rows() {
        let a = Image::<u16>::filled(2, 2, &[1]).unwrap();
        let b = Image::<u16>::filled(2, 2, &[2]).unwrap();
        let stacked = Image::stack(&[&a, &b]).unwrap();

        assert_eq!(stacked.width(), 2);
        assert_eq!(stacked.height(), 4);
        assert_eq!(stacked.pixel(1, 1), &[1]);
        assert_eq!(stacked.pixel(0, 2), &[2]);
    }

    #[test]
    fn test_stack_rejects_mismatched_shapes() {
        let a = Image::<u8>::filled(2, 2, &[1]).unwrap();
        let b = Image::<u8>::filled(4, 2, &[1]).unwrap();
        assert!(Image::stack(&[&a, &b]).is_err());
    }

    #[test]
    fn test_into_sample_type() {
        let image: DynImage = Image::<f32>::filled(2, 1, &[0.5, 1000.25]).unwrap().into();
        let half = image.into_sample_type(SampleType::F16);

        assert_eq!(half.sample_type(), SampleType::F16);
        assert_eq!(half.as_bytes().len(), 2 * 2 * 2);
        let DynImage::F16(half) = half else {
            panic!("expected half image");
        };
        assert_eq!(half.pixel(1, 0)[0].to_f32(), 0.5);
        assert_eq!(half.pixel(1, 0)[1].to_f32(), 1000.0);
    }

    #[test]
    #[cfg(target_endian = "little")]
    fn test_as_bytes_is_little_endian() {
        let image = Image::<u16>::new(1, 1, 1, vec![0x0102]).unwrap();
        assert_eq!(image.as_bytes(), &[0x02, 0x01]);
    }
}
