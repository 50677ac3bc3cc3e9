use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::composition::domain::barcode_images::BarcodeKind;
use crate::composition::domain::interpolator::Interpolation;
use crate::shared::constants::{
    BLUR_HEIGHT, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, OUTPUT_SUFFIX,
    PROGRESS_UPDATE_INTERVAL,
};
use crate::shared::error::BarcodeError;

/// Sampling and composition settings for a run.
#[derive(Clone, Debug, PartialEq)]
pub struct BarcodeConfig {
    /// Output width; also the number of columns the sampler aims for.
    pub width: u32,
    pub height: u32,
    pub interpolation: Interpolation,
    pub blur_height: usize,
    pub update_interval: Duration,
}

impl BarcodeConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_blur_height(mut self, blur_height: usize) -> Self {
        self.blur_height = blur_height;
        self
    }

    pub fn with_update_interval(mut self, update_interval: Duration) -> Self {
        self.update_interval = update_interval;
        self
    }

    pub fn validate(&self) -> Result<(), BarcodeError> {
        if self.width == 0 || self.height == 0 {
            return Err(BarcodeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.blur_height == 0 {
            return Err(BarcodeError::InvalidBlurHeight(self.blur_height));
        }
        Ok(())
    }
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
            interpolation: Interpolation::default(),
            blur_height: BLUR_HEIGHT,
            update_interval: PROGRESS_UPDATE_INTERVAL,
        }
    }
}

/// Naming of the files the barcode images are saved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    pub suffix: &'static str,
}

impl OutputOptions {
    /// `<stem> <postfix>.<suffix>`, e.g. `Movie (Solid Color).png`.
    pub fn file_name(&self, stem: &str, kind: BarcodeKind) -> String {
        format!("{stem} {}.{}", kind.postfix(), self.suffix)
    }

    /// Output paths for every kind, in `BarcodeKind::ALL` order.
    pub fn output_paths(&self, output_dir: &Path, input: &Path) -> Vec<(BarcodeKind, PathBuf)> {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        BarcodeKind::ALL
            .into_iter()
            .map(|kind| (kind, output_dir.join(self.file_name(&stem, kind))))
            .collect()
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            suffix: OUTPUT_SUFFIX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = BarcodeConfig::default();
        assert_eq!((config.width, config.height), (1920, 1080));
        assert_eq!(config.blur_height, 300);
        assert_eq!(config.interpolation, Interpolation::Area);
        assert_eq!(config.update_interval, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(0, 1080)]
    #[case(1920, 0)]
    #[case(0, 0)]
    fn test_zero_dimension_rejected(#[case] width: u32, #[case] height: u32) {
        let err = BarcodeConfig::new(width, height).validate().unwrap_err();
        assert!(matches!(err, BarcodeError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_zero_blur_height_rejected() {
        let err = BarcodeConfig::new(10, 10)
            .with_blur_height(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, BarcodeError::InvalidBlurHeight(0)));
    }

    #[test]
    fn test_output_paths_use_stem_and_postfix() {
        let options = OutputOptions::default();
        let paths = options.output_paths(Path::new("out"), Path::new("/videos/My Movie.mkv"));
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].0, BarcodeKind::Columns);
        assert_eq!(paths[0].1, Path::new("out/My Movie (Columns).png"));
        assert_eq!(paths[1].1, Path::new("out/My Movie (Blurred Columns).png"));
        assert_eq!(paths[2].1, Path::new("out/My Movie (Solid Color).png"));
    }
}
