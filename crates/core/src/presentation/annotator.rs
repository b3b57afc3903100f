use ndarray::{s, ArrayViewMut3, Axis};

use crate::shared::constants::{BOX_COLOR, BOX_THICKNESS};
use crate::shared::frame::Frame;
use crate::shared::rectangle::Rectangle;

/// Returns a copy of `frame` with a box outline drawn inside each
/// rectangle. Rectangles are clipped to the frame; the source is left
/// untouched.
pub fn draw_rectangles(frame: &Frame, rects: &[Rectangle]) -> Frame {
    let mut annotated = frame.clone();
    if annotated.is_empty() {
        return annotated;
    }

    let color: &[u8] = if frame.channels() == 1 {
        &[255]
    } else {
        &BOX_COLOR
    };
    let (width, height) = (frame.width(), frame.height());
    let mut arr = annotated.as_ndarray_mut();

    for rect in Rectangle::clamp_all(rects, width, height) {
        let x0 = rect.x as usize;
        let y0 = rect.y as usize;
        let x1 = rect.right() as usize;
        let y1 = rect.bottom() as usize;
        let t = (BOX_THICKNESS as usize).min(x1 - x0).min(y1 - y0);

        fill(&mut arr, y0..y0 + t, x0..x1, color);
        fill(&mut arr, y1 - t..y1, x0..x1, color);
        fill(&mut arr, y0..y1, x0..x0 + t, color);
        fill(&mut arr, y0..y1, x1 - t..x1, color);
    }

    annotated
}

fn fill(
    arr: &mut ArrayViewMut3<'_, u8>,
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
    color: &[u8],
) {
    let mut patch = arr.slice_mut(s![rows, cols, ..]);
    for mut pixel in patch.lanes_mut(Axis(2)) {
        for (channel, &value) in pixel.iter_mut().zip(color) {
            *channel = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black(width: u32, height: u32, channels: u8) -> Frame {
        Frame::new(
            vec![0; (width * height * channels as u32) as usize],
            width,
            height,
            channels,
            0,
        )
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> Vec<u8> {
        let arr = frame.as_ndarray();
        (0..frame.channels() as usize)
            .map(|c| arr[[y, x, c]])
            .collect()
    }

    #[test]
    fn test_outline_is_green_and_interior_untouched() {
        let frame = black(20, 20, 3);
        let out = draw_rectangles(&frame, &[Rectangle::new(5, 5, 10, 8)]);

        assert_eq!(pixel(&out, 5, 5), vec![0, 255, 0]); // top-left corner
        assert_eq!(pixel(&out, 14, 12), vec![0, 255, 0]); // bottom-right corner
        assert_eq!(pixel(&out, 6, 10), vec![0, 255, 0]); // second column of left edge
        assert_eq!(pixel(&out, 10, 9), vec![0, 0, 0]); // interior
        assert_eq!(pixel(&out, 4, 5), vec![0, 0, 0]); // just outside
        assert_eq!(pixel(&out, 15, 12), vec![0, 0, 0]);
    }

    #[test]
    fn test_source_frame_is_not_modified() {
        let frame = black(10, 10, 3);
        let _ = draw_rectangles(&frame, &[Rectangle::new(0, 0, 10, 10)]);
        assert!(frame.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_grayscale_outline_is_white() {
        let frame = black(10, 10, 1);
        let out = draw_rectangles(&frame, &[Rectangle::new(2, 2, 4, 4)]);
        assert_eq!(pixel(&out, 2, 2), vec![255]);
        assert_eq!(pixel(&out, 4, 4), vec![0]);
    }

    #[test]
    fn test_rectangle_past_edge_is_clipped() {
        let frame = black(20, 20, 3);
        let out = draw_rectangles(&frame, &[Rectangle::new(10, 10, 30, 30)]);
        assert_eq!(pixel(&out, 19, 19), vec![0, 255, 0]);
        assert_eq!(pixel(&out, 19, 14), vec![0, 255, 0]);
        assert_eq!(pixel(&out, 14, 14), vec![0, 0, 0]);
    }

    #[test]
    fn test_thin_rectangle_fills_completely() {
        let frame = black(10, 10, 3);
        let out = draw_rectangles(&frame, &[Rectangle::new(1, 1, 1, 5)]);
        for y in 1..6 {
            assert_eq!(pixel(&out, 1, y), vec![0, 255, 0]);
        }
    }

    #[test]
    fn test_no_rectangles_returns_identical_copy() {
        let frame = Frame::new((0..48).collect(), 4, 4, 3, 2);
        assert_eq!(draw_rectangles(&frame, &[]), frame);
    }
}
