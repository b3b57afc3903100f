pub mod detection_params;
pub mod plate_detector;
