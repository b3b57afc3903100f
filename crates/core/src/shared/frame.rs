use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use ndarray::{ArrayView3, ArrayViewMut3};

/// A single video/image frame: contiguous RGB (or grayscale) bytes in
/// row-major order.
///
/// Format conversion happens at I/O boundaries only; the domain layer
/// treats pixel data as opaque.
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

    pub fn data(&self) -> &[u8] {
        &self.data
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

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Single-channel intensity using the BT.601 luma weights in 14-bit
    /// fixed point. Grayscale frames are returned unchanged.
    pub fn to_grayscale(&self) -> Frame {
        if self.channels == 1 {
            return self.clone();
        }
        let step = self.channels as usize;
        let gray = self
            .data
            .chunks_exact(step)
            .map(|px| {
                let luma = px[0] as u32 * 4899 + px[1] as u32 * 9617 + px[2] as u32 * 1868;
                ((luma + (1 << 13)) >> 14) as u8
            })
            .collect();
        Frame::new(gray, self.width, self.height, 1, self.index)
    }

    /// Returns a copy scaled to exactly `width` x `height`, keeping the
    /// frame index and channel count.
    pub fn resized(&self, width: u32, height: u32) -> Frame {
        if self.is_empty() || (self.width == width && self.height == height) {
            return self.clone();
        }
        let data = match self.channels {
            1 => GrayImage::from_raw(self.width, self.height, self.data.clone())
                .map(|img| imageops::resize(&img, width, height, FilterType::Triangle).into_raw()),
            _ => RgbImage::from_raw(self.width, self.height, self.data.clone())
                .map(|img| imageops::resize(&img, width, height, FilterType::Triangle).into_raw()),
        };
        match data {
            Some(data) => Frame::new(data, width, height, self.channels, self.index),
            None => self.clone(),
        }
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
