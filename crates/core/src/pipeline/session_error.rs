use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the user by the image and video tabs. None of
/// them is fatal to the process.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please load an image first")]
    NoImageLoaded,
    #[error("No image to save")]
    NothingToSave,
    #[error("Plate detection is unavailable because the cascade could not be loaded")]
    DetectionUnavailable,
    #[error("Failed to open video file: {}", path.display())]
    VideoOpenFailed { path: PathBuf, reason: String },
    #[error("Error loading image: {name}")]
    ImageLoadFailed { name: String, reason: String },
    #[error("Failed to save {name}: {reason}")]
    SaveFailed { name: String, reason: String },
    #[error("Detection failed: {0}")]
    DetectionFailed(String),
    #[error("Video decoding failed: {0}")]
    DecodeFailed(String),
}

impl SessionError {
    /// Warnings describe a user action that cannot apply yet; the rest
    /// are errors.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            SessionError::NoImageLoaded
                | SessionError::NothingToSave
                | SessionError::VideoOpenFailed { .. }
        )
    }
}

/// Final path component for status lines.
pub(crate) fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
