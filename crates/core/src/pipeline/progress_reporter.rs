use std::time::Duration;

use crate::shared::time_format::humanize_duration;

/// A point-in-time view of sampling progress.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressReport {
    /// Frames grabbed so far, sampled or not.
    pub frames_read: usize,
    /// Frame count reported by the container, 0 when unknown.
    pub total_frames: usize,
    /// Completed share in `0.0..=1.0`, absent when the total is unknown.
    pub fraction: Option<f64>,
    pub elapsed: Duration,
    /// Extrapolated time left, absent when the total is unknown.
    pub remaining: Option<Duration>,
}

impl ProgressReport {
    pub fn new(frames_read: usize, total_frames: usize, elapsed: Duration) -> Self {
        let fraction = (total_frames > 0)
            .then(|| (frames_read as f64 / total_frames as f64).min(1.0))
            .filter(|&f| f > 0.0);
        let remaining = fraction.map(|f| {
            let elapsed_secs = elapsed.as_secs_f64();
            Duration::from_secs_f64((elapsed_secs / f - elapsed_secs).max(0.0))
        });
        Self {
            frames_read,
            total_frames,
            fraction,
            elapsed,
            remaining,
        }
    }

    /// Renders the report as a single status line.
    pub fn to_line(&self) -> String {
        let separator = "  |  ";
        match (self.fraction, self.remaining) {
            (Some(fraction), Some(remaining)) => format!(
                "{:5.1}%{separator}{} passed{separator}{} left",
                fraction * 100.0,
                humanize_duration(self.elapsed),
                humanize_duration(remaining),
            ),
            _ => format!(
                "frame {}{separator}{} passed",
                self.frames_read,
                humanize_duration(self.elapsed),
            ),
        }
    }
}

/// Sink for progress and status events of a barcode run.
///
/// Decouples the sampler from specific output mechanisms so each caller can
/// observe a run without changing the pipeline code.
pub trait ProgressReporter: Send {
    /// Report sampling progress. Called at a bounded rate.
    fn progress(&mut self, report: &ProgressReport);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);
}

/// Silent reporter that discards all events.
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn progress(&mut self, _report: &ProgressReport) {}
    fn info(&mut self, _message: &str) {}
}

/// Reporter that writes every event through the `log` crate.
pub struct LogProgressReporter {
    indent: String,
}

impl LogProgressReporter {
    pub fn new(indent: usize) -> Self {
        Self {
            indent: " ".repeat(indent),
        }
    }
}

impl Default for LogProgressReporter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl ProgressReporter for LogProgressReporter {
    fn progress(&mut self, report: &ProgressReport) {
        log::info!("{}{}", self.indent, report.to_line());
    }

    fn info(&mut self, message: &str) {
        log::info!("{}{message}", self.indent);
    }
}
