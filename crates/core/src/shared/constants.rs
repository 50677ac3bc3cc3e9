use std::time::Duration;

pub const DEFAULT_OUTPUT_WIDTH: u32 = 1920;
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 1080;

/// Height of the vertical box kernel used for the blurred barcode.
pub const BLUR_HEIGHT: usize = 300;

/// Minimum wall-clock time between two progress reports.
pub const PROGRESS_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

pub const OUTPUT_SUFFIX: &str = "png";

/// Inputs with this extension are read as newline-separated lists of video paths.
pub const INPUT_LIST_EXTENSION: &str = "txt";
