use ndarray::{Array3, ArrayView3};

/// A single video frame or derived image: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; sampling and
/// composition work on this type directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Builds an RGB frame where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3], index: usize) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::new(data, width, height, 3, index)
    }

    /// Takes ownership of an (height, width, channels) array.
    pub fn from_ndarray(array: Array3<u8>, index: usize) -> Self {
        let (height, width, channels) = array.dim();
        let data = array.iter().copied().collect();
        Self::new(data, width as u32, height as u32, channels as u8, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Position of the source frame in decode order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the pixel at (`x`, `y`) as a channel slice.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let channels = self.channels as usize;
        let offset = (y as usize * self.width as usize + x as usize) * channels;
        &self.data[offset..offset + channels]
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_filled_repeats_color() {
        let frame = Frame::filled(3, 2, [10, 20, 30], 7);
        assert_eq!(frame.data().len(), 18);
        assert_eq!(frame.pixel(2, 1), &[10, 20, 30]);
        assert_eq!(frame.index(), 7);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        // 2x2 RGB: set pixel (row=1, col=0) to red
        let mut data = vec![0u8; 12];
        data[6] = 255;
        let frame = Frame::new(data, 2, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 2, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[test]
    fn test_from_ndarray_keeps_row_major_order() {
        let mut array = Array3::<u8>::zeros((2, 3, 3));
        array[[1, 2, 0]] = 99;
        let frame = Frame::from_ndarray(array, 4);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.pixel(2, 1)[0], 99);
        assert_eq!(frame.index(), 4);
    }

    #[test]
    fn test_from_ndarray_accepts_non_standard_layout() {
        let array = Array3::from_shape_fn((2, 2, 3), |(y, x, c)| (y * 100 + x * 10 + c) as u8);
        let transposed = array.permuted_axes([1, 0, 2]).to_owned();
        let frame = Frame::from_ndarray(transposed, 0);
        // After swapping axes the pixel at (x=1, y=0) came from (y=1, x=0).
        assert_eq!(frame.pixel(1, 0), &[100, 101, 102]);
    }
}
