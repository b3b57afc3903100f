use std::time::Duration;

/// Trained plate cascade, resolved relative to the working directory.
pub const DEFAULT_CASCADE_PATH: &str = "pak.xml";

/// Video opened by Play when nothing has been loaded yet.
pub const DEFAULT_VIDEO_PATH: &str = "outVideo.avi";

/// Video polling period (~33 frames per second).
pub const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Video frames are scaled to this size before detection.
pub const VIDEO_PROCESSING_SIZE: (u32, u32) = (640, 480);

/// Smallest object the cascade search will report, in pixels.
pub const MIN_PLATE_SIZE: (i32, i32) = (30, 30);

/// Bounding box into which thumbnails are fitted.
pub const THUMBNAIL_SIZE: (u32, u32) = (100, 60);

pub const BOX_COLOR: [u8; 3] = [0, 255, 0];
pub const BOX_THICKNESS: u32 = 2;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv"];
pub const SAVE_EXTENSIONS: &[&str] = &["png", "jpg"];
