pub mod constants;
pub mod frame;
pub mod rectangle;
pub mod video_metadata;
