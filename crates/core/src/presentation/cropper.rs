use ndarray::s;

use crate::shared::frame::Frame;
use crate::shared::rectangle::Rectangle;

/// Cuts one sub-frame per rectangle, in input order. Rectangles are
/// clipped to the frame and skipped when nothing of them is visible.
pub fn extract_plate_regions(frame: &Frame, rects: &[Rectangle]) -> Vec<Frame> {
    if frame.is_empty() {
        return Vec::new();
    }
    let arr = frame.as_ndarray();
    Rectangle::clamp_all(rects, frame.width(), frame.height())
        .into_iter()
        .map(|r| {
            let (x, y) = (r.x as usize, r.y as usize);
            let (w, h) = (r.width as usize, r.height as usize);
            let data: Vec<u8> = arr.slice(s![y..y + h, x..x + w, ..]).iter().copied().collect();
            Frame::new(data, w as u32, h as u32, frame.channels(), frame.index())
        })
        .collect()
}
