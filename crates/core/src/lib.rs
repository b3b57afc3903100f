pub mod detection;
pub mod pipeline;
pub mod playback;
pub mod presentation;
pub mod shared;
pub mod video;
