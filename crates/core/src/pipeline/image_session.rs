use std::path::Path;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::plate_detector::PlateDetector;
use crate::pipeline::session_error::{display_name, SessionError};
use crate::playback::frame_source::StillImageSource;
use crate::presentation::annotator::draw_rectangles;
use crate::presentation::cropper::extract_plate_regions;
use crate::presentation::display::DisplayImage;
use crate::presentation::thumbnail_tracker::ThumbnailTracker;
use crate::shared::frame::Frame;
use crate::video::domain::image_reader::ImageReader;
use crate::video::domain::image_writer::ImageWriter;

/// Still-image workflow: load → detect → show boxes and crops → save.
///
/// Detection always runs on the unannotated loaded image, so repeated
/// passes with different parameters never stack boxes.
pub struct ImageSession {
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    source: StillImageSource,
    displayed: Option<Frame>,
    display: Option<DisplayImage>,
    thumbnails: ThumbnailTracker,
    status: String,
}

impl ImageSession {
    pub fn new(reader: Box<dyn ImageReader>, writer: Box<dyn ImageWriter>) -> Self {
        Self {
            reader,
            writer,
            source: StillImageSource::new(),
            displayed: None,
            display: None,
            thumbnails: ThumbnailTracker::new(),
            status: String::new(),
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<(), SessionError> {
        let name = display_name(path);
        if let Err(e) = self.source.load(self.reader.as_ref(), path) {
            log::warn!("Failed to load image {}: {e}", path.display());
            self.status = format!("Error loading image: {name}");
            return Err(SessionError::ImageLoadFailed {
                name,
                reason: e.to_string(),
            });
        }

        log::info!("Loaded image {}", path.display());
        self.clear();
        self.status = format!("Loaded image: {name}");
        Ok(())
    }

    /// Runs the detector on the loaded image and shows the result.
    /// Returns the number of plates found.
    pub fn detect(
        &mut self,
        detector: Option<&mut dyn PlateDetector>,
        params: &DetectionParams,
    ) -> Result<usize, SessionError> {
        let frame = self.source.frame().ok_or(SessionError::NoImageLoaded)?;
        let detector = detector.ok_or(SessionError::DetectionUnavailable)?;

        let plates = detector
            .detect(frame, params)
            .map_err(|e| SessionError::DetectionFailed(e.to_string()))?;
        let regions = extract_plate_regions(frame, &plates);
        let annotated = draw_rectangles(frame, &plates);
        log::info!("Detected {} plates ({params})", plates.len());

        self.thumbnails.replace_all(&regions);
        self.show(annotated);
        self.status = format!("Detected {} license plates", plates.len());
        Ok(plates.len())
    }

    /// Drops thumbnails and boxes and shows the loaded image again.
    pub fn clear(&mut self) {
        self.thumbnails.clear();
        match self.source.frame().cloned() {
            Some(frame) => self.show(frame),
            None => {
                self.displayed = None;
                self.display = None;
            }
        }
    }

    /// Writes the frame currently on screen.
    pub fn save(&mut self, path: &Path) -> Result<(), SessionError> {
        let frame = self.displayed.as_ref().ok_or(SessionError::NothingToSave)?;
        let name = display_name(path);
        self.writer
            .write(path, frame)
            .map_err(|e| SessionError::SaveFailed {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        log::info!("Saved result to {}", path.display());
        self.status = format!("Image saved as: {name}");
        Ok(())
    }

    pub fn params_changed(&mut self, params: &DetectionParams) {
        self.status = params.to_string();
    }

    pub fn has_image(&self) -> bool {
        self.source.frame().is_some()
    }

    pub fn display(&self) -> Option<&DisplayImage> {
        self.display.as_ref()
    }

    pub fn thumbnails(&self) -> &[DisplayImage] {
        self.thumbnails.items()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn show(&mut self, frame: Frame) {
        self.display = Some(DisplayImage::from_frame(&frame));
        self.displayed = Some(frame);
    }
}
