use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;
use crate::video::domain::image_reader::ImageReader;
use crate::video::domain::video_reader::VideoReader;

/// A single still image, produced on demand. Never loops.
#[derive(Default)]
pub struct StillImageSource {
    frame: Option<Frame>,
    path: Option<PathBuf>,
}

impl StillImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `path` and makes it the current frame. On failure the
    /// previously loaded image is kept.
    pub fn load(
        &mut self,
        reader: &dyn ImageReader,
        path: &Path,
    ) -> Result<&Frame, Box<dyn std::error::Error>> {
        let frame = reader.read(path)?;
        self.path = Some(path.to_path_buf());
        Ok(self.frame.insert(frame))
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Stopped,
}

/// Outcome of one timer tick.
#[derive(Debug)]
pub enum Poll {
    Frame(Frame),
    /// The stream ran out and was sought back to the first frame. No frame
    /// is produced for this tick.
    Rewound,
    /// Not playing; nothing was read.
    Inactive,
}

/// Looping video source driven by an external timer.
///
/// The decode handle is opened by [`play`](Self::play) and released by
/// [`stop`](Self::stop), [`load`](Self::load) and
/// [`shutdown`](Self::shutdown).
pub struct VideoFrameSource {
    reader: Box<dyn VideoReader>,
    path: PathBuf,
    state: PlaybackState,
}

impl VideoFrameSource {
    pub fn new(reader: Box<dyn VideoReader>, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            state: PlaybackState::Idle,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Selects a new file. Any open handle is released and the source
    /// returns to `Idle`.
    pub fn load(&mut self, path: impl Into<PathBuf>) {
        self.release();
        self.path = path.into();
        self.state = PlaybackState::Idle;
    }

    /// Opens the file if needed and starts playing. On failure the state
    /// is left unchanged.
    pub fn play(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.reader.is_open() {
            let metadata = self.reader.open(&self.path)?;
            log::info!(
                "Opened {} ({}x{}, {:.1} fps, {})",
                self.path.display(),
                metadata.width,
                metadata.height,
                metadata.fps,
                metadata.codec
            );
        }
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Stops playback and releases the decode handle; the next `play`
    /// starts again from the first frame.
    pub fn stop(&mut self) {
        self.release();
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
        }
    }

    /// Pulls one frame. At end of stream the reader is rewound and the
    /// tick yields [`Poll::Rewound`] instead of a frame.
    pub fn poll(&mut self) -> Result<Poll, Box<dyn std::error::Error>> {
        if self.state != PlaybackState::Playing {
            return Ok(Poll::Inactive);
        }
        match self.reader.read_frame()? {
            Some(frame) => Ok(Poll::Frame(frame)),
            None => {
                log::debug!("End of {}, rewinding", self.path.display());
                self.reader.rewind()?;
                Ok(Poll::Rewound)
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.stop();
    }

    fn release(&mut self) {
        if self.reader.is_open() {
            log::info!("Releasing {}", self.path.display());
        }
        self.reader.close();
    }
}

impl Drop for VideoFrameSource {
    fn drop(&mut self) {
        self.reader.close();
    }
}
