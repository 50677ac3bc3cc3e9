use crate::shared::frame::Frame;

/// Domain interface for smoothing a whole frame.
///
/// Implementations modify the frame in-place (`&mut Frame`) and must keep
/// its dimensions.
pub trait FrameBlurrer: Send {
    fn blur(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>>;
}
