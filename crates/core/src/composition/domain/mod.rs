pub mod barcode_composer;
pub mod barcode_images;
pub mod interpolator;
