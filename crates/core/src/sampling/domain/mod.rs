pub mod column_sampler;
pub mod sample_stride;
