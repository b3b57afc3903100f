/// An axis-aligned detection box in image-pixel coordinates, origin
/// top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// True when the rectangle is non-empty and lies fully inside a
    /// `frame_width` x `frame_height` frame.
    #[cfg(test)]
    pub(crate) fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        !self.is_empty()
            && self.x >= 0
            && self.y >= 0
            && self.right() as i64 <= frame_width as i64
            && self.bottom() as i64 <= frame_height as i64
    }

    /// Intersects the rectangle with the frame. Returns `None` when
    /// nothing visible remains.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Option<Rectangle> {
        let fw = i32::try_from(frame_width).unwrap_or(i32::MAX);
        let fh = i32::try_from(frame_height).unwrap_or(i32::MAX);
        let x1 = self.x.clamp(0, fw);
        let y1 = self.y.clamp(0, fh);
        let x2 = self.right().clamp(0, fw);
        let y2 = self.bottom().clamp(0, fh);
        let clamped = Rectangle::new(x1, y1, x2 - x1, y2 - y1);
        if clamped.is_empty() {
            None
        } else {
            Some(clamped)
        }
    }

    /// Clamps every rectangle to the frame, dropping the ones that fall
    /// entirely outside it.
    pub fn clamp_all(rects: &[Rectangle], frame_width: u32, frame_height: u32) -> Vec<Rectangle> {
        rects
            .iter()
            .filter_map(|r| r.clamp_to(frame_width, frame_height))
            .collect()
    }
}
