use std::path::Path;

use image::DynamicImage;

use crate::shared::frame::Frame;
use crate::video::domain::image_reader::ImageReader;

/// Decodes still images with the `image` crate.
///
/// Grayscale sources stay single-channel; everything else is converted
/// to RGB.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::open(path)?;
        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(format!("Image has no pixels: {}", path.display()).into());
        }

        let frame = match img {
            DynamicImage::ImageLuma8(gray) => Frame::new(gray.into_raw(), width, height, 1, 0),
            other if !other.color().has_color() => {
                Frame::new(other.to_luma8().into_raw(), width, height, 1, 0)
            }
            other => Frame::new(other.to_rgb8().into_raw(), width, height, 3, 0),
        };
        Ok(frame)
    }
}
