use std::sync::Arc;

use image::imageops::FilterType;

use crate::composition::domain::interpolator::{Interpolation, Interpolator};

use super::area_interpolator::AreaInterpolator;
use super::image_interpolator::ImageInterpolator;

/// Creates the interpolator used for every resize in a run.
pub fn create_interpolator(method: Interpolation) -> Arc<dyn Interpolator> {
    log::debug!("Using {method} interpolation");
    match method {
        Interpolation::Area => Arc::new(AreaInterpolator::new()),
        Interpolation::Lanczos3 => Arc::new(ImageInterpolator::new(FilterType::Lanczos3)),
        Interpolation::CatmullRom => Arc::new(ImageInterpolator::new(FilterType::CatmullRom)),
        Interpolation::Triangle => Arc::new(ImageInterpolator::new(FilterType::Triangle)),
        Interpolation::Nearest => Arc::new(ImageInterpolator::new(FilterType::Nearest)),
    }
}
