/// Fixed frame interval between sampled frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleStride {
    /// The video has fewer frames than requested columns (or an unknown
    /// count): every frame becomes a column.
    EveryFrame,
    /// Sample frames whose 1-based index is a multiple of `n` (`n >= 1`).
    Every(usize),
}

impl SampleStride {
    /// `total_frames / target_columns` with integer division, where a
    /// quotient of 0 means every frame is sampled.
    pub fn for_target(total_frames: usize, target_columns: usize) -> Self {
        match total_frames.checked_div(target_columns) {
            Some(0) | None => SampleStride::EveryFrame,
            Some(n) => SampleStride::Every(n),
        }
    }

    /// Whether the frame at `frame_number` (1 for the first frame) is sampled.
    pub fn is_sampled(self, frame_number: usize) -> bool {
        match self {
            SampleStride::EveryFrame => true,
            SampleStride::Every(n) => frame_number % n == 0,
        }
    }

    /// Number of columns a video with exactly `total_frames` frames yields.
    pub fn expected_columns(self, total_frames: usize) -> usize {
        match self {
            SampleStride::EveryFrame => total_frames,
            SampleStride::Every(n) => total_frames / n,
        }
    }
}
