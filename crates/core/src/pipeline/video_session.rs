use std::path::Path;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::plate_detector::PlateDetector;
use crate::pipeline::session_error::{display_name, SessionError};
use crate::playback::frame_source::{Poll, VideoFrameSource};
use crate::presentation::annotator::draw_rectangles;
use crate::presentation::cropper::extract_plate_regions;
use crate::presentation::display::DisplayImage;
use crate::presentation::thumbnail_tracker::ThumbnailTracker;
use crate::shared::constants::{DEFAULT_VIDEO_PATH, VIDEO_PROCESSING_SIZE};
use crate::video::domain::video_reader::VideoReader;

/// What a single timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Playback is not running.
    Idle,
    /// End of stream; the source went back to the start and nothing was
    /// redrawn.
    Rewound,
    /// A frame was shown with this many detected plates.
    Shown(usize),
}

/// Video tab state: a looping frame source plus the results of the most
/// recent tick.
pub struct VideoSession {
    source: VideoFrameSource,
    display: Option<DisplayImage>,
    thumbnails: ThumbnailTracker,
    status: String,
}

impl VideoSession {
    pub fn new(reader: Box<dyn VideoReader>) -> Self {
        Self {
            source: VideoFrameSource::new(reader, DEFAULT_VIDEO_PATH),
            display: None,
            thumbnails: ThumbnailTracker::new(),
            status: String::new(),
        }
    }

    pub fn load(&mut self, path: &Path) {
        self.source.load(path);
        self.clear();
        log::info!("Selected video {}", path.display());
        self.status = format!("Loaded video: {}", display_name(path));
    }

    pub fn play(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.source.play() {
            log::warn!("Failed to open {}: {e}", self.source.path().display());
            return Err(SessionError::VideoOpenFailed {
                path: self.source.path().to_path_buf(),
                reason: e.to_string(),
            });
        }
        self.status = "Video playing...".to_string();
        Ok(())
    }

    pub fn stop(&mut self) {
        self.source.stop();
        self.status = "Video stopped".to_string();
    }

    /// Advances playback by one frame.
    ///
    /// Detection errors on a single frame are logged and the raw frame is
    /// shown. A decode error stops playback.
    pub fn tick(
        &mut self,
        detector: Option<&mut dyn PlateDetector>,
        params: &DetectionParams,
    ) -> Result<TickOutcome, SessionError> {
        let frame = match self.source.poll() {
            Ok(Poll::Frame(frame)) => frame,
            Ok(Poll::Rewound) => return Ok(TickOutcome::Rewound),
            Ok(Poll::Inactive) => return Ok(TickOutcome::Idle),
            Err(e) => {
                self.stop();
                return Err(SessionError::DecodeFailed(e.to_string()));
            }
        };

        let (width, height) = VIDEO_PROCESSING_SIZE;
        let frame = frame.resized(width, height);

        let Some(detector) = detector else {
            self.display = Some(DisplayImage::from_frame(&frame));
            return Ok(TickOutcome::Shown(0));
        };

        let plates = match detector.detect(&frame, params) {
            Ok(plates) => plates,
            Err(e) => {
                log::warn!("Detection failed on frame {}: {e}", frame.index());
                self.display = Some(DisplayImage::from_frame(&frame));
                return Ok(TickOutcome::Shown(0));
            }
        };
        log::debug!("Frame {}: {} plates", frame.index(), plates.len());

        let regions = extract_plate_regions(&frame, &plates);
        let annotated = draw_rectangles(&frame, &plates);
        let added = self.thumbnails.append_new(&regions);
        if added > 0 {
            log::debug!("Added {added} plate thumbnails");
        }
        self.status = format!("Detected {} license plates", plates.len());
        self.display = Some(DisplayImage::from_frame(&annotated));
        Ok(TickOutcome::Shown(plates.len()))
    }

    /// Forgets the cached detections and thumbnails.
    pub fn clear(&mut self) {
        self.thumbnails.clear();
        self.status.clear();
    }

    pub fn shutdown(&mut self) {
        self.source.shutdown();
    }

    pub fn is_playing(&self) -> bool {
        self.source.is_playing()
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::frame_source::tests::StubVideoReader;
    use crate::playback::frame_source::PlaybackState;
    use crate::shared::frame::Frame;
    use crate::shared::rectangle::Rectangle;

    /// Returns `counts[i]` plates on the i-th call, cycling.
    struct CountingDetector {
        counts: Vec<usize>,
        calls: usize,
        seen_sizes: Vec<(u32, u32)>,
    }

    impl CountingDetector {
        fn new(counts: &[usize]) -> Self {
            Self {
                counts: counts.to_vec(),
                calls: 0,
                seen_sizes: Vec::new(),
            }
        }
    }

    impl PlateDetector for CountingDetector {
        fn detect(
            &mut self,
            frame: &Frame,
            _params: &DetectionParams,
        ) -> Result<Vec<Rectangle>, Box<dyn std::error::Error>> {
            let n = self.counts[self.calls % self.counts.len()];
            self.calls += 1;
            self.seen_sizes.push((frame.width(), frame.height()));
            Ok((0..n as i32)
                .map(|i| Rectangle::new(i * 60, 10, 50, 30))
                .collect())
        }
    }

    struct FailingDetector;

    impl PlateDetector for FailingDetector {
        fn detect(
            &mut self,
            _frame: &Frame,
            _params: &DetectionParams,
        ) -> Result<Vec<Rectangle>, Box<dyn std::error::Error>> {
            Err("boom".into())
        }
    }

    fn session(frames: usize) -> VideoSession {
        VideoSession::new(Box::new(StubVideoReader::new(frames)))
    }

    #[test]
    fn test_default_path_before_any_load() {
        let s = session(3);
        assert_eq!(s.source.path(), Path::new(DEFAULT_VIDEO_PATH));
        assert_eq!(s.source.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_load_sets_status_and_clears() {
        let mut s = session(3);
        s.load(Path::new("/videos/street.mp4"));
        assert_eq!(s.status(), "Loaded video: street.mp4");
        assert_eq!(s.source.path(), Path::new("/videos/street.mp4"));
        assert!(s.thumbnails().is_empty());
    }

    #[test]
    fn test_play_failure_is_warning_and_not_playing() {
        let mut s = VideoSession::new(Box::new(StubVideoReader::failing()));
        let err = s.play().unwrap_err();
        assert!(matches!(err, SessionError::VideoOpenFailed { .. }));
        assert!(err.is_warning());
        assert!(!s.is_playing());
    }

    #[test]
    fn test_play_and_stop_status() {
        let mut s = session(3);
        s.play().unwrap();
        assert_eq!(s.status(), "Video playing...");
        assert!(s.is_playing());
        s.stop();
        assert_eq!(s.status(), "Video stopped");
        assert_eq!(s.source.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_tick_when_idle_does_nothing() {
        let mut s = session(3);
        let mut detector = CountingDetector::new(&[1]);
        let outcome = s
            .tick(Some(&mut detector), &DetectionParams::default())
            .unwrap();
        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(detector.calls, 0);
    }

    #[test]
    fn test_tick_resizes_and_detects() {
        let mut s = session(3);
        let mut detector = CountingDetector::new(&[2]);
        s.play().unwrap();

        let outcome = s
            .tick(Some(&mut detector), &DetectionParams::default())
            .unwrap();
        assert_eq!(outcome, TickOutcome::Shown(2));
        assert_eq!(detector.seen_sizes[0], VIDEO_PROCESSING_SIZE);
        assert_eq!(s.thumbnails().len(), 2);
        assert_eq!(s.status(), "Detected 2 license plates");
        let display = s.display().unwrap();
        assert_eq!((display.width, display.height), VIDEO_PROCESSING_SIZE);
    }

    #[test]
    fn test_thumbnails_only_grow_past_displayed_count() {
        let mut s = session(10);
        let mut detector = CountingDetector::new(&[1, 3, 2]);
        let params = DetectionParams::default();
        s.play().unwrap();

        s.tick(Some(&mut detector), &params).unwrap();
        assert_eq!(s.thumbnails().len(), 1);
        s.tick(Some(&mut detector), &params).unwrap();
        assert_eq!(s.thumbnails().len(), 3);
        let outcome = s.tick(Some(&mut detector), &params).unwrap();
        assert_eq!(s.thumbnails().len(), 3);
        assert_eq!(outcome, TickOutcome::Shown(2));
    }

    #[test]
    fn test_end_of_stream_skips_one_tick_then_loops() {
        let mut s = session(2);
        let mut detector = CountingDetector::new(&[1]);
        let params = DetectionParams::default();
        s.play().unwrap();

        s.tick(Some(&mut detector), &params).unwrap();
        s.tick(Some(&mut detector), &params).unwrap();
        let before = s.display().cloned();

        let outcome = s.tick(Some(&mut detector), &params).unwrap();
        assert_eq!(outcome, TickOutcome::Rewound);
        assert_eq!(s.display().cloned(), before);
        assert_eq!(detector.calls, 2);

        let outcome = s.tick(Some(&mut detector), &params).unwrap();
        assert_eq!(outcome, TickOutcome::Shown(1));
        assert_eq!(detector.calls, 3);
    }

    #[test]
    fn test_tick_without_detector_shows_raw_frame() {
        let mut s = session(3);
        s.play().unwrap();
        let outcome = s.tick(None, &DetectionParams::default()).unwrap();
        assert_eq!(outcome, TickOutcome::Shown(0));
        assert!(s.display().is_some());
        assert!(s.thumbnails().is_empty());
    }

    #[test]
    fn test_detection_error_shows_raw_frame() {
        let mut s = session(3);
        s.play().unwrap();
        let outcome = s
            .tick(Some(&mut FailingDetector), &DetectionParams::default())
            .unwrap();
        assert_eq!(outcome, TickOutcome::Shown(0));
        assert!(s.display().is_some());
        assert!(s.is_playing());
    }

    #[test]
    fn test_clear_empties_thumbnails_and_status() {
        let mut s = session(3);
        let mut detector = CountingDetector::new(&[2]);
        s.play().unwrap();
        s.tick(Some(&mut detector), &DetectionParams::default())
            .unwrap();

        s.clear();
        assert!(s.thumbnails().is_empty());
        assert!(s.status().is_empty());
    }

    #[test]
    fn test_stop_then_play_restarts_from_first_frame() {
        let reader = StubVideoReader::new(5);
        let log = reader.log.clone();
        let mut s = VideoSession::new(Box::new(reader));
        let mut detector = CountingDetector::new(&[0]);
        let params = DetectionParams::default();

        s.play().unwrap();
        s.tick(Some(&mut detector), &params).unwrap();
        s.tick(Some(&mut detector), &params).unwrap();
        s.stop();
        s.play().unwrap();
        s.tick(Some(&mut detector), &params).unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.opened.len(), 2);
        assert_eq!(log.closes, 1);
    }

    #[test]
    fn test_shutdown_releases_handle() {
        let reader = StubVideoReader::new(3);
        let log = reader.log.clone();
        let mut s = VideoSession::new(Box::new(reader));
        s.play().unwrap();
        s.shutdown();
        s.shutdown();
        assert!(!s.is_playing());
        assert_eq!(log.lock().unwrap().closes, 1);
    }
}
