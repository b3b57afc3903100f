pub mod image_session;
pub mod session_error;
pub mod video_session;
