pub mod annotator;
pub mod cropper;
pub mod display;
pub mod thumbnail_tracker;
