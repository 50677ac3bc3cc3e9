use crate::composition::domain::interpolator::Interpolator;
use crate::shared::error::BarcodeError;
use crate::shared::frame::Frame;

/// Area-coverage resampler.
///
/// Every destination pixel covers a footprint of `src_len / dst_len` source
/// pixels and takes the coverage-weighted mean of the pixels it overlaps.
/// Shrinking an axis to 1 therefore gives the exact mean of that axis, and
/// enlarging repeats source pixels with blending only at footprint seams.
/// Axes are resampled separately and an unchanged axis is left untouched.
pub struct AreaInterpolator;

impl AreaInterpolator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AreaInterpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpolator for AreaInterpolator {
    fn resize(&self, frame: &Frame, width: u32, height: u32) -> Result<Frame, BarcodeError> {
        if width == 0 || height == 0 {
            return Err(BarcodeError::InvalidDimensions { width, height });
        }
        if frame.width() == 0 || frame.height() == 0 {
            return Err(BarcodeError::InvalidImage(format!(
                "cannot resize an empty {}x{} frame",
                frame.width(),
                frame.height()
            )));
        }
        if (width, height) == (frame.width(), frame.height()) {
            return Ok(frame.clone());
        }

        let channels = frame.channels() as usize;
        let (src_w, src_h) = (frame.width() as usize, frame.height() as usize);
        let (dst_w, dst_h) = (width as usize, height as usize);

        // The first pass reads the u8 pixels directly so a width-only
        // reduction never holds more than the destination in f32.
        let buf = if dst_w == src_w {
            resize_columns(frame.data(), src_w, src_h, channels, dst_h)
        } else {
            let rows = resize_rows(frame.data(), src_w, src_h, channels, dst_w);
            if dst_h == src_h {
                rows
            } else {
                resize_columns(&rows[..], dst_w, src_h, channels, dst_h)
            }
        };

        let data = buf
            .into_iter()
            .map(|v| v.round().clamp(0.0, 255.0) as u8)
            .collect();
        Ok(Frame::new(
            data,
            width,
            height,
            frame.channels(),
            frame.index(),
        ))
    }
}

/// Source taps and weights for each destination index along one axis.
fn area_weights(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);
            let mut taps: Vec<(usize, f64)> = (first..last)
                .map(|j| {
                    let overlap = end.min((j + 1) as f64) - start.max(j as f64);
                    (j, overlap)
                })
                .filter(|&(_, overlap)| overlap > 0.0)
                .collect();
            let total: f64 = taps.iter().map(|&(_, w)| w).sum();
            for tap in &mut taps {
                tap.1 /= total;
            }
            taps.into_iter().map(|(j, w)| (j, w as f32)).collect()
        })
        .collect()
}

fn resize_rows<T: Copy + Into<f32>>(
    src: &[T],
    w: usize,
    h: usize,
    c: usize,
    dst_w: usize,
) -> Vec<f32> {
    let weights = area_weights(w, dst_w);
    let mut out = vec![0.0f32; dst_w * h * c];
    for y in 0..h {
        let row = &src[y * w * c..(y + 1) * w * c];
        for (x, taps) in weights.iter().enumerate() {
            let dst = (y * dst_w + x) * c;
            for &(sx, weight) in taps {
                for ch in 0..c {
                    out[dst + ch] += row[sx * c + ch].into() * weight;
                }
            }
        }
    }
    out
}

fn resize_columns<T: Copy + Into<f32>>(
    src: &[T],
    w: usize,
    h: usize,
    c: usize,
    dst_h: usize,
) -> Vec<f32> {
    let weights = area_weights(h, dst_h);
    let stride = w * c;
    let mut out = vec![0.0f32; dst_h * stride];
    for (y, taps) in weights.iter().enumerate() {
        let dst_row = &mut out[y * stride..(y + 1) * stride];
        for &(sy, weight) in taps {
            let src_row = &src[sy * stride..(sy + 1) * stride];
            for (d, &s) in dst_row.iter_mut().zip(src_row) {
                *d += s.into() * weight;
            }
        }
    }
    out
}
