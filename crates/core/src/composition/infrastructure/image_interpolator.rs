use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::composition::domain::interpolator::Interpolator;
use crate::shared::error::BarcodeError;
use crate::shared::frame::Frame;

/// Resizes through `image::imageops` with a fixed convolution filter.
pub struct ImageInterpolator {
    filter: FilterType,
}

impl ImageInterpolator {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Interpolator for ImageInterpolator {
    fn resize(&self, frame: &Frame, width: u32, height: u32) -> Result<Frame, BarcodeError> {
        if width == 0 || height == 0 {
            return Err(BarcodeError::InvalidDimensions { width, height });
        }
        if frame.channels() != 3 {
            return Err(BarcodeError::InvalidImage(format!(
                "expected 3 channels, got {}",
                frame.channels()
            )));
        }
        if (width, height) == (frame.width(), frame.height()) {
            return Ok(frame.clone());
        }

        let img = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or_else(|| {
                BarcodeError::InvalidImage("frame data does not match its dimensions".into())
            })?;
        let resized = imageops::resize(&img, width, height, self.filter);

        Ok(Frame::new(
            resized.into_raw(),
            width,
            height,
            3,
            frame.index(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FilterType::Lanczos3)]
    #[case(FilterType::CatmullRom)]
    #[case(FilterType::Triangle)]
    #[case(FilterType::Nearest)]
    fn test_output_has_requested_dimensions(#[case] filter: FilterType) {
        let frame = Frame::filled(40, 30, [90, 60, 30], 3);
        let out = ImageInterpolator::new(filter).resize(&frame, 1, 30).unwrap();
        assert_eq!((out.width(), out.height()), (1, 30));
        assert_eq!(out.index(), 3);
    }

    #[test]
    fn test_uniform_frame_stays_close_to_color() {
        let frame = Frame::filled(40, 30, [90, 60, 30], 0);
        let out = ImageInterpolator::new(FilterType::Lanczos3)
            .resize(&frame, 16, 9)
            .unwrap();
        for pixel in out.data().chunks(3) {
            assert!((pixel[0] as i32 - 90).abs() <= 1);
            assert!((pixel[1] as i32 - 60).abs() <= 1);
            assert!((pixel[2] as i32 - 30).abs() <= 1);
        }
    }

    #[test]
    fn test_non_rgb_rejected() {
        let frame = Frame::new(vec![0; 4], 2, 2, 1, 0);
        let err = ImageInterpolator::new(FilterType::Nearest)
            .resize(&frame, 1, 1)
            .unwrap_err();
        assert!(matches!(err, BarcodeError::InvalidImage(_)));
    }
}
