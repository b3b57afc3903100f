pub mod frame_view;
pub mod plate_strip;
