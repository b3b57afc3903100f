use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Pull-based access to decoded video frames.
///
/// Implementations handle I/O details (codec, container format, etc.)
/// while the playback layer works with the abstract `Frame` and
/// `VideoMetadata` types. Frames are pulled one at a time so the caller
/// controls pacing.
pub trait VideoReader: Send {
    /// Opens a video file and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Decodes the next frame, or `None` once the stream is exhausted.
    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Seeks back to the first frame; the next read yields index 0.
    fn rewind(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    fn is_open(&self) -> bool;

    /// Releases the decode handle. Safe to call repeatedly.
    fn close(&mut self);
}
