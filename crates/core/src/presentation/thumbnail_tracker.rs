use crate::presentation::display::{thumbnail, DisplayImage};
use crate::shared::frame::Frame;

/// Ordered list of plate thumbnails currently shown for one tab.
#[derive(Default)]
pub struct ThumbnailTracker {
    items: Vec<DisplayImage>,
}

impl ThumbnailTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list, as done after each still-image pass.
    pub fn replace_all(&mut self, regions: &[Frame]) {
        self.items = regions.iter().map(thumbnail).collect();
    }

    /// Converts only the regions past the number already displayed and
    /// appends them. Returns how many thumbnails were added.
    pub fn append_new(&mut self, regions: &[Frame]) -> usize {
        let shown = self.items.len();
        if regions.len() <= shown {
            return 0;
        }
        self.items.extend(regions[shown..].iter().map(thumbnail));
        regions.len() - shown
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[DisplayImage] {
        &self.items
    }
}
