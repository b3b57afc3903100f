use crate::detection::domain::detection_params::DetectionParams;
use crate::shared::frame::Frame;
use crate::shared::rectangle::Rectangle;

/// Domain interface for license plate detection.
///
/// Rectangles may overlap and must lie within the frame. Empty frames
/// yield an empty result rather than an error.
pub trait PlateDetector: Send {
    fn detect(
        &mut self,
        frame: &Frame,
        params: &DetectionParams,
    ) -> Result<Vec<Rectangle>, Box<dyn std::error::Error>>;
}
