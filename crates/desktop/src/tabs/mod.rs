pub mod image_tab;
pub mod video_tab;
