use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::blurring::infrastructure::vertical_box_blurrer::VerticalBoxBlurrer;
use crate::composition::domain::barcode_composer::BarcodeComposer;
use crate::composition::domain::barcode_images::BarcodeImages;
use crate::composition::infrastructure::interpolator_factory::create_interpolator;
use crate::sampling::domain::column_sampler::ColumnSampler;
use crate::sampling::domain::sample_stride::SampleStride;
use crate::shared::config::BarcodeConfig;
use crate::shared::error::BarcodeError;
use crate::shared::time_format::humanize_duration;
use crate::video::domain::video_reader::VideoReader;

use super::progress_reporter::ProgressReporter;

/// Result of a successful run.
#[derive(Debug)]
pub struct BarcodeOutcome {
    pub images: BarcodeImages,
    pub stride: SampleStride,
    pub columns_sampled: usize,
    pub frames_read: usize,
    /// Time spent decoding and sampling.
    pub sampling_time: Duration,
}

/// Creates the barcode images for one video: open → sample → compose.
///
/// Holds no per-video state, so one instance can process several videos
/// one after another. Nothing is written to disk; persisting the images
/// is up to the caller.
pub struct CreateBarcodeUseCase {
    reader: Box<dyn VideoReader>,
    sampler: ColumnSampler,
    composer: BarcodeComposer,
    reporter: Box<dyn ProgressReporter>,
    config: BarcodeConfig,
}

impl CreateBarcodeUseCase {
    /// Fails with `InvalidDimensions` or `InvalidBlurHeight` before any
    /// video is touched.
    pub fn new(
        reader: Box<dyn VideoReader>,
        reporter: Box<dyn ProgressReporter>,
        config: BarcodeConfig,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Result<Self, BarcodeError> {
        config.validate()?;

        let blurrer = VerticalBoxBlurrer::new(config.blur_height)
            .map_err(|_| BarcodeError::InvalidBlurHeight(config.blur_height))?;
        let interpolator = create_interpolator(config.interpolation);

        let mut sampler =
            ColumnSampler::new(interpolator.clone()).with_update_interval(config.update_interval);
        if let Some(flag) = cancelled {
            sampler = sampler.with_cancellation(flag);
        }

        Ok(Self {
            reader,
            sampler,
            composer: BarcodeComposer::new(interpolator, Box::new(blurrer)),
            reporter,
            config,
        })
    }

    pub fn execute(&mut self, input_path: &Path) -> Result<BarcodeOutcome, BarcodeError> {
        let metadata =
            self.reader
                .open(input_path)
                .map_err(|e| BarcodeError::SourceUnavailable {
                    path: input_path.to_path_buf(),
                    reason: e.to_string(),
                })?;

        if !metadata.has_frame_count() {
            self.reporter
                .info("The frame count is unknown, every frame becomes a column.");
        }

        let sampled = self.sampler.sample(
            self.reader.as_mut(),
            metadata.total_frames,
            self.config.width as usize,
            self.reporter.as_mut(),
        );
        self.reader.close();
        let sampled = sampled?;

        self.reporter.info(&format!(
            "Finished! Processing the video took {}.",
            humanize_duration(sampled.elapsed)
        ));
        log::debug!(
            "Sampled {} of {} frames",
            sampled.columns.len(),
            sampled.frames_read
        );

        self.reporter.info("Generating the output images...");
        let images =
            self.composer
                .compose(&sampled.columns, self.config.width, self.config.height)?;

        Ok(BarcodeOutcome {
            images,
            stride: sampled.stride,
            columns_sampled: sampled.columns.len(),
            frames_read: sampled.frames_read,
            sampling_time: sampled.elapsed,
        })
    }
}
