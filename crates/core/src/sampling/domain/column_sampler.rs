use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::composition::domain::interpolator::Interpolator;
use crate::pipeline::progress_reporter::{ProgressReport, ProgressReporter};
use crate::shared::constants::PROGRESS_UPDATE_INTERVAL;
use crate::shared::error::BarcodeError;
use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;

use super::sample_stride::SampleStride;

/// Columns collected from one pass over a video.
#[derive(Debug)]
pub struct SampledColumns {
    /// One-pixel-wide frames in temporal order.
    pub columns: Vec<Frame>,
    pub stride: SampleStride,
    /// Frames grabbed from the reader, sampled or not.
    pub frames_read: usize,
    pub elapsed: Duration,
}

/// Per-pass bookkeeping, created fresh for every video.
struct SamplingState {
    frames_read: usize,
    started: Instant,
    last_report: Option<Instant>,
}

impl SamplingState {
    fn new() -> Self {
        Self {
            frames_read: 0,
            started: Instant::now(),
            last_report: None,
        }
    }

    /// True when no report was emitted within the last `interval`.
    fn report_due(&self, now: Instant, interval: Duration) -> bool {
        self.last_report
            .map_or(true, |last| now.duration_since(last) >= interval)
    }
}

/// Reads a video sequentially and reduces every `n`-th frame to a column.
pub struct ColumnSampler {
    interpolator: Arc<dyn Interpolator>,
    update_interval: Duration,
    cancelled: Arc<AtomicBool>,
}

impl ColumnSampler {
    pub fn new(interpolator: Arc<dyn Interpolator>) -> Self {
        Self {
            interpolator,
            update_interval: PROGRESS_UPDATE_INTERVAL,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_update_interval(mut self, update_interval: Duration) -> Self {
        self.update_interval = update_interval;
        self
    }

    pub fn with_cancellation(mut self, cancelled: Arc<AtomicBool>) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Samples an already opened reader.
    ///
    /// `total_frames` is the container's frame count (0 when unknown).
    /// End of stream and decode failures both end the pass normally; a
    /// decode failure keeps the columns gathered so far. The only error is
    /// `Cancelled`.
    pub fn sample(
        &self,
        reader: &mut dyn VideoReader,
        total_frames: usize,
        target_columns: usize,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<SampledColumns, BarcodeError> {
        let stride = SampleStride::for_target(total_frames, target_columns);
        log::debug!(
            "Sampling {total_frames} frames for {target_columns} columns with {stride:?}"
        );

        let mut state = SamplingState::new();
        let mut columns = Vec::with_capacity(stride.expected_columns(total_frames));

        let mut frames = reader.frames();
        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                return Err(BarcodeError::Cancelled);
            }

            let frame = match frames.next() {
                None => break,
                Some(Ok(frame)) => frame,
                Some(Err(e)) => {
                    log::warn!(
                        "Failed to decode frame {}, stopping early: {e}",
                        state.frames_read + 1
                    );
                    break;
                }
            };
            state.frames_read += 1;

            let now = Instant::now();
            if state.report_due(now, self.update_interval) {
                reporter.progress(&ProgressReport::new(
                    state.frames_read,
                    total_frames,
                    now.duration_since(state.started),
                ));
                state.last_report = Some(now);
            }

            if !stride.is_sampled(state.frames_read) {
                continue;
            }

            columns.push(self.interpolator.resize_width(&frame, 1)?);
        }

        Ok(SampledColumns {
            columns,
            stride,
            frames_read: state.frames_read,
            elapsed: state.started.elapsed(),
        })
    }
}
