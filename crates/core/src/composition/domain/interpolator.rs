use std::fmt;
use std::str::FromStr;

use crate::shared::error::BarcodeError;
use crate::shared::frame::Frame;

/// Resampling method shared by every resize in a run.
///
/// Reducing frames to columns and fitting the composite to the output size
/// must use the same method, so it is chosen once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Coverage-weighted averaging. Shrinking an axis to 1 yields the
    /// arithmetic mean of that row or column.
    #[default]
    Area,
    Lanczos3,
    CatmullRom,
    Triangle,
    Nearest,
}

impl Interpolation {
    pub const ALL: [Interpolation; 5] = [
        Interpolation::Area,
        Interpolation::Lanczos3,
        Interpolation::CatmullRom,
        Interpolation::Triangle,
        Interpolation::Nearest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Area => "area",
            Interpolation::Lanczos3 => "lanczos3",
            Interpolation::CatmullRom => "catmull-rom",
            Interpolation::Triangle => "triangle",
            Interpolation::Nearest => "nearest",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|method| method.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|m| m.name()).collect();
                format!(
                    "unknown interpolation '{s}', expected one of: {}",
                    names.join(", ")
                )
            })
    }
}

/// Resizes a frame to exact target dimensions.
///
/// Implementations must return a frame of exactly `width` x `height`
/// with the source frame's index.
pub trait Interpolator: Send + Sync {
    fn resize(&self, frame: &Frame, width: u32, height: u32) -> Result<Frame, BarcodeError>;

    /// Resizes only the horizontal axis.
    fn resize_width(&self, frame: &Frame, width: u32) -> Result<Frame, BarcodeError> {
        self.resize(frame, width, frame.height())
    }

    /// Resizes only the vertical axis.
    fn resize_height(&self, frame: &Frame, height: u32) -> Result<Frame, BarcodeError> {
        self.resize(frame, frame.width(), height)
    }
}
