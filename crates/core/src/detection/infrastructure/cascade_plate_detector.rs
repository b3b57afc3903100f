use std::path::{Path, PathBuf};

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use thiserror::Error;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::plate_detector::PlateDetector;
use crate::shared::constants::MIN_PLATE_SIZE;
use crate::shared::frame::Frame;
use crate::shared::rectangle::Rectangle;

#[derive(Debug, Error)]
pub enum CascadeLoadError {
    #[error("cascade file not found: {0}")]
    NotFound(PathBuf),
    #[error("cascade path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
    #[error("failed to load cascade from {path}: {source}")]
    OpenCv {
        path: PathBuf,
        #[source]
        source: opencv::Error,
    },
    #[error("cascade file {0} does not contain a classifier")]
    Empty(PathBuf),
}

/// Plate detector backed by OpenCV's Haar/LBP cascade classifier.
///
/// Frames are reduced to a single intensity channel before the
/// multi-scale search; the minimum object size is fixed at
/// [`MIN_PLATE_SIZE`].
pub struct CascadePlateDetector {
    classifier: CascadeClassifier,
    min_size: Size,
}

impl CascadePlateDetector {
    /// Loads a trained cascade. Missing, unreadable or empty cascade files
    /// are rejected here so that detection never runs on a blank
    /// classifier.
    pub fn load(path: &Path) -> Result<Self, CascadeLoadError> {
        if !path.is_file() {
            return Err(CascadeLoadError::NotFound(path.to_path_buf()));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| CascadeLoadError::InvalidPath(path.to_path_buf()))?;

        let classifier =
            CascadeClassifier::new(path_str).map_err(|source| CascadeLoadError::OpenCv {
                path: path.to_path_buf(),
                source,
            })?;
        let empty = classifier.empty().map_err(|source| CascadeLoadError::OpenCv {
            path: path.to_path_buf(),
            source,
        })?;
        if empty {
            return Err(CascadeLoadError::Empty(path.to_path_buf()));
        }

        log::info!("Loaded plate cascade from {}", path.display());
        Ok(Self {
            classifier,
            min_size: Size::new(MIN_PLATE_SIZE.0, MIN_PLATE_SIZE.1),
        })
    }
}

impl PlateDetector for CascadePlateDetector {
    fn detect(
        &mut self,
        frame: &Frame,
        params: &DetectionParams,
    ) -> Result<Vec<Rectangle>, Box<dyn std::error::Error>> {
        if frame.is_empty() {
            return Ok(Vec::new());
        }

        let gray = frame.to_grayscale();
        let mat =
            Mat::new_rows_cols_with_data(gray.height() as i32, gray.width() as i32, gray.data())?
                .try_clone()?;

        let mut objects = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &mat,
            &mut objects,
            params.scale_factor(),
            params.min_neighbors() as i32,
            0,
            self.min_size,
            Size::default(),
        )?;

        let found: Vec<Rectangle> = objects
            .iter()
            .map(|r| Rectangle::new(r.x, r.y, r.width, r.height))
            .collect();
        Ok(Rectangle::clamp_all(&found, frame.width(), frame.height()))
    }
}
