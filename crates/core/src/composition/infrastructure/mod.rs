pub mod area_interpolator;
pub mod image_interpolator;
pub mod interpolator_factory;
