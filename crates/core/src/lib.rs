//! Movie barcode generation: samples a video into one-pixel columns and
//! composes them into a columns image, a vertically blurred variant and a
//! solid color strip.

pub mod blurring;
pub mod composition;
pub mod pipeline;
pub mod sampling;
pub mod shared;
pub mod video;

#[cfg(test)]
mod test_support;
