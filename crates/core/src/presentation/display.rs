use crate::shared::constants::THUMBNAIL_SIZE;
use crate::shared::frame::Frame;

/// Pixels ready for an output surface: tightly packed RGBA8.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DisplayImage {
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            width: frame.width(),
            height: frame.height(),
            rgba: to_rgba(frame),
        }
    }
}

/// Expands an RGB or grayscale frame to opaque RGBA.
pub fn to_rgba(frame: &Frame) -> Vec<u8> {
    let pixels = frame.width() as usize * frame.height() as usize;
    let mut rgba = Vec::with_capacity(pixels * 4);
    match frame.channels() {
        1 => {
            for &v in frame.data() {
                rgba.extend_from_slice(&[v, v, v, 255]);
            }
        }
        n => {
            for px in frame.data().chunks_exact(n as usize) {
                rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
    }
    rgba
}

/// Largest size with the source aspect ratio that fits inside
/// `max_width` x `max_height`. Never returns a zero dimension.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_width.max(1));
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_height.max(1));
    (w, h)
}

/// Scales a plate crop to the thumbnail box, keeping its aspect ratio.
pub fn thumbnail(region: &Frame) -> DisplayImage {
    let (w, h) = fit_within(
        region.width(),
        region.height(),
        THUMBNAIL_SIZE.0,
        THUMBNAIL_SIZE.1,
    );
    DisplayImage::from_frame(&region.resized(w, h))
}
