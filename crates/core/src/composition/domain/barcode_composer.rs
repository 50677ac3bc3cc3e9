use std::sync::Arc;

use ndarray::{concatenate, Axis};

use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::composition::domain::barcode_images::BarcodeImages;
use crate::composition::domain::interpolator::Interpolator;
use crate::shared::error::BarcodeError;
use crate::shared::frame::Frame;

/// Turns an ordered sequence of columns into the three barcode images.
pub struct BarcodeComposer {
    interpolator: Arc<dyn Interpolator>,
    blurrer: Box<dyn FrameBlurrer>,
}

impl BarcodeComposer {
    pub fn new(interpolator: Arc<dyn Interpolator>, blurrer: Box<dyn FrameBlurrer>) -> Self {
        Self {
            interpolator,
            blurrer,
        }
    }

    /// Builds the base image and derives the blurred and solid color variants.
    ///
    /// The base image is always exactly `width` x `height`, however many
    /// columns were sampled.
    pub fn compose(
        &self,
        columns: &[Frame],
        width: u32,
        height: u32,
    ) -> Result<BarcodeImages, BarcodeError> {
        if width == 0 || height == 0 {
            return Err(BarcodeError::InvalidDimensions { width, height });
        }

        let strip = self.concatenate(columns)?;
        let base = self.interpolator.resize(&strip, width, height)?;

        let mut blurred = base.clone();
        self.blurrer
            .blur(&mut blurred)
            .map_err(|e| BarcodeError::InvalidImage(format!("blur failed: {e}")))?;

        let row = self.interpolator.resize_height(&base, 1)?;
        let solid = self.interpolator.resize_height(&row, height)?;

        Ok(BarcodeImages::new(base, blurred, solid))
    }

    /// Joins the columns left to right into one image as wide as the
    /// sequence is long.
    fn concatenate(&self, columns: &[Frame]) -> Result<Frame, BarcodeError> {
        let first = columns.first().ok_or(BarcodeError::EmptySample)?;
        let height = first.height();

        // A stream that changes resolution mid-way yields columns of
        // different heights; bring them to the first column's height.
        let resized: Vec<Frame> = columns
            .iter()
            .filter(|c| c.height() != height)
            .map(|c| self.interpolator.resize(c, c.width(), height))
            .collect::<Result<_, _>>()?;
        let mut resized = resized.iter();

        let views: Vec<_> = columns
            .iter()
            .map(|c| {
                if c.height() == height {
                    Some(c.as_ndarray())
                } else {
                    resized.next().map(Frame::as_ndarray)
                }
            })
            .collect::<Option<_>>()
            .ok_or_else(|| BarcodeError::InvalidImage("column height mismatch".into()))?;

        let strip = concatenate(Axis(1), &views)
            .map_err(|e| BarcodeError::InvalidImage(format!("cannot join columns: {e}")))?;
        Ok(Frame::from_ndarray(strip, first.index()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blurring::infrastructure::vertical_box_blurrer::VerticalBoxBlurrer;
    use crate::composition::domain::barcode_images::BarcodeKind;
    use crate::composition::infrastructure::area_interpolator::AreaInterpolator;
    use crate::composition::infrastructure::image_interpolator::ImageInterpolator;
    use image::imageops::FilterType;
    use rstest::rstest;

    fn composer() -> BarcodeComposer {
        BarcodeComposer::new(
            Arc::new(AreaInterpolator::new()),
            Box::new(VerticalBoxBlurrer::default()),
        )
    }

    /// A column whose top half is `top` and bottom half is `bottom`.
    fn two_tone_column(height: u32, top: [u8; 3], bottom: [u8; 3], index: usize) -> Frame {
        let data = (0..height)
            .flat_map(|y| if y < height / 2 { top } else { bottom })
            .collect();
        Frame::new(data, 1, height, 3, index)
    }

    fn solid_column(height: u32, rgb: [u8; 3], index: usize) -> Frame {
        Frame::filled(1, height, rgb, index)
    }

    #[test]
    fn test_empty_sequence_is_empty_sample() {
        let err = composer().compose(&[], 100, 50).unwrap_err();
        assert!(matches!(err, BarcodeError::EmptySample));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let columns = vec![solid_column(10, [1, 2, 3], 0)];
        let err = composer().compose(&columns, 0, 50).unwrap_err();
        assert!(matches!(err, BarcodeError::InvalidDimensions { .. }));
    }

    #[rstest]
    #[case(10, 1920, 1080)]
    #[case(3, 7, 5)]
    #[case(50, 10, 1)]
    #[case(1, 1, 1)]
    fn test_all_outputs_have_requested_size(
        #[case] count: usize,
        #[case] width: u32,
        #[case] height: u32,
    ) {
        let columns: Vec<_> = (0..count)
            .map(|i| two_tone_column(24, [i as u8, 0, 0], [0, 0, 200], i))
            .collect();
        let images = composer().compose(&columns, width, height).unwrap();
        for (kind, frame) in images.iter() {
            assert_eq!((frame.width(), frame.height()), (width, height), "{kind}");
        }
    }

    #[test]
    fn test_base_keeps_column_order() {
        let columns = vec![
            solid_column(8, [255, 0, 0], 0),
            solid_column(8, [0, 255, 0], 1),
            solid_column(8, [0, 0, 255], 2),
        ];
        let images = composer().compose(&columns, 6, 4).unwrap();
        let base = images.get(BarcodeKind::Columns);
        assert_eq!(base.pixel(0, 0), &[255, 0, 0]);
        assert_eq!(base.pixel(1, 3), &[255, 0, 0]);
        assert_eq!(base.pixel(2, 0), &[0, 255, 0]);
        assert_eq!(base.pixel(5, 2), &[0, 0, 255]);
    }

    #[test]
    fn test_solid_color_has_no_vertical_variation() {
        let columns: Vec<_> = (0..12)
            .map(|i| two_tone_column(30, [i * 20, 10, 250], [0, i * 5, 40], i as usize))
            .collect();
        let images = composer().compose(&columns, 24, 16).unwrap();
        let solid = images.get(BarcodeKind::SolidColor);
        for x in 0..solid.width() {
            let top = solid.pixel(x, 0).to_vec();
            for y in 1..solid.height() {
                assert_eq!(solid.pixel(x, y), &top[..], "column {x} row {y}");
            }
        }
    }

    #[test]
    fn test_solid_color_is_column_mean() {
        let columns = vec![two_tone_column(10, [200, 0, 100], [0, 100, 100], 0)];
        let images = composer().compose(&columns, 1, 10).unwrap();
        let solid = images.get(BarcodeKind::SolidColor);
        assert_eq!(solid.pixel(0, 0), &[100, 50, 100]);
    }

    #[rstest]
    #[case(1920, 1080)]
    #[case(33, 17)]
    #[case(1, 400)]
    fn test_single_color_video_gives_single_color_strip(
        #[case] width: u32,
        #[case] height: u32,
    ) {
        let columns: Vec<_> = (0..9).map(|i| solid_column(72, [17, 99, 203], i)).collect();
        let images = composer().compose(&columns, width, height).unwrap();
        for (kind, frame) in images.iter() {
            assert!(
                frame.data().chunks(3).all(|p| p == [17, 99, 203]),
                "{kind} is not uniform"
            );
        }
    }

    #[test]
    fn test_single_color_video_with_lanczos_within_tolerance() {
        let composer = BarcodeComposer::new(
            Arc::new(ImageInterpolator::new(FilterType::Lanczos3)),
            Box::new(VerticalBoxBlurrer::default()),
        );
        let columns: Vec<_> = (0..9).map(|i| solid_column(72, [17, 99, 203], i)).collect();
        let images = composer.compose(&columns, 40, 30).unwrap();
        let solid = images.get(BarcodeKind::SolidColor);
        for p in solid.data().chunks(3) {
            assert!((p[0] as i32 - 17).abs() <= 1);
            assert!((p[1] as i32 - 99).abs() <= 1);
            assert!((p[2] as i32 - 203).abs() <= 1);
        }
    }

    #[test]
    fn test_blur_of_uniform_columns_equals_base() {
        let columns: Vec<_> = (0..20)
            .map(|i| solid_column(50, [i * 12, 255 - i * 12, 7], i as usize))
            .collect();
        let images = composer().compose(&columns, 40, 600).unwrap();
        assert_eq!(
            images.get(BarcodeKind::ColumnsBlurred),
            images.get(BarcodeKind::Columns)
        );
    }

    #[test]
    fn test_blur_smooths_vertical_edges_only() {
        let columns = vec![
            two_tone_column(100, [0, 0, 0], [255, 255, 255], 0),
            solid_column(100, [90, 90, 90], 1),
        ];
        let images = composer().compose(&columns, 2, 400).unwrap();
        let blurred = images.get(BarcodeKind::ColumnsBlurred);
        // Left column gets a gray ramp around the edge at row 200.
        let edge = blurred.pixel(0, 200)[0];
        assert!(edge > 0 && edge < 255);
        // Right column is untouched.
        assert!((0..400).all(|y| blurred.pixel(1, y) == [90, 90, 90]));
    }

    #[test]
    fn test_columns_of_differing_heights_are_joined() {
        let columns = vec![
            solid_column(40, [10, 10, 10], 0),
            solid_column(20, [20, 20, 20], 1),
            solid_column(40, [30, 30, 30], 2),
        ];
        let images = composer().compose(&columns, 3, 10).unwrap();
        let base = images.get(BarcodeKind::Columns);
        assert_eq!(base.pixel(0, 5), &[10, 10, 10]);
        assert_eq!(base.pixel(1, 5), &[20, 20, 20]);
        assert_eq!(base.pixel(2, 5), &[30, 30, 30]);
    }
}
