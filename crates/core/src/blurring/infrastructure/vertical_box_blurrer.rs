use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::shared::constants::BLUR_HEIGHT;
use crate::shared::frame::Frame;

/// Normalized box blur along the vertical axis only (kernel 1 x `kernel_height`).
///
/// The kernel is anchored at `kernel_height / 2`, so for an even height the
/// window reaches one row further up than down. Rows outside the frame are
/// mirrored without repeating the edge row (`dcb|abcd|cba`). Each column is
/// processed independently, so horizontal positions are never mixed.
pub struct VerticalBoxBlurrer {
    kernel_height: usize,
}

impl VerticalBoxBlurrer {
    pub fn new(kernel_height: usize) -> Result<Self, &'static str> {
        if kernel_height < 1 {
            return Err("kernel_height must be >= 1");
        }
        Ok(Self { kernel_height })
    }

    pub fn kernel_height(&self) -> usize {
        self.kernel_height
    }
}

impl Default for VerticalBoxBlurrer {
    fn default() -> Self {
        Self {
            kernel_height: BLUR_HEIGHT,
        }
    }
}

impl FrameBlurrer for VerticalBoxBlurrer {
    fn blur(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        let k = self.kernel_height;
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let channels = frame.channels() as usize;
        if k <= 1 || width == 0 || height == 0 || channels == 0 {
            return Ok(());
        }

        let stride = width * channels;
        let anchor = (k / 2) as isize;
        let half = (k / 2) as u64;
        let data = frame.data_mut();
        let at = |y: isize| reflect_101(y, height) * channels;

        // Unblurred copy of the column being processed; rows already written
        // in `data` are still needed when they leave the window.
        let mut column = vec![0u8; height * channels];
        let mut sums = vec![0u64; channels];

        for x in 0..width {
            let base = x * channels;
            for (y, px) in column.chunks_exact_mut(channels).enumerate() {
                let src = y * stride + base;
                px.copy_from_slice(&data[src..src + channels]);
            }

            sums.fill(0);
            for offset in 0..k as isize {
                let row = at(offset - anchor);
                for (sum, &v) in sums.iter_mut().zip(&column[row..row + channels]) {
                    *sum += v as u64;
                }
            }

            for y in 0..height {
                let out = y * stride + base;
                for (o, &sum) in data[out..out + channels].iter_mut().zip(&sums) {
                    *o = ((sum + half) / k as u64) as u8;
                }

                // Slide the window one row down.
                let leaving = at(y as isize - anchor);
                let entering = at(y as isize - anchor + k as isize);
                for (ch, sum) in sums.iter_mut().enumerate() {
                    *sum = *sum + column[entering + ch] as u64 - column[leaving + ch] as u64;
                }
            }
        }

        Ok(())
    }
}

/// Maps any row index into `0..len` by mirroring around the edges without
/// duplicating them.
fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * len as isize - 2;
    let i = index.rem_euclid(period) as usize;
    if i >= len {
        period as usize - i
    } else {
        i
    }
}
