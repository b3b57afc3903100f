use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Serialize;

use platescan_core::detection::domain::detection_params::{
    DetectionParams, DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR,
};
use platescan_core::detection::domain::plate_detector::PlateDetector;
use platescan_core::detection::infrastructure::cascade_plate_detector::CascadePlateDetector;
use platescan_core::presentation::annotator::draw_rectangles;
use platescan_core::presentation::cropper::extract_plate_regions;
use platescan_core::shared::constants::{
    DEFAULT_CASCADE_PATH, IMAGE_EXTENSIONS, VIDEO_PROCESSING_SIZE,
};
use platescan_core::shared::rectangle::Rectangle;
use platescan_core::video::domain::image_reader::ImageReader;
use platescan_core::video::domain::image_writer::ImageWriter;
use platescan_core::video::domain::video_reader::VideoReader;
use platescan_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use platescan_core::video::infrastructure::image_file_reader::ImageFileReader;
use platescan_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// License plate detection for images and videos.
#[derive(Parser)]
#[command(name = "platescan")]
struct Cli {
    /// Input image or video file.
    input: PathBuf,

    /// Annotated output image (image input only).
    output: Option<PathBuf>,

    /// Trained cascade XML file.
    #[arg(long, default_value = DEFAULT_CASCADE_PATH)]
    cascade: PathBuf,

    /// Image pyramid scale step (must be greater than 1.0).
    #[arg(long, default_value_t = DEFAULT_SCALE_FACTOR)]
    scale_factor: f64,

    /// Overlapping candidates needed to keep a detection.
    #[arg(long, default_value_t = DEFAULT_MIN_NEIGHBORS)]
    min_neighbors: u32,

    /// Save each detected plate to this directory as plate_<i>.png.
    #[arg(long)]
    crops: Option<PathBuf>,

    /// Print detections as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Stop after this many video frames.
    #[arg(long)]
    max_frames: Option<usize>,
}

#[derive(Serialize)]
struct PlateBox {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl From<&Rectangle> for PlateBox {
    fn from(r: &Rectangle) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Serialize)]
struct FrameReport {
    frame: usize,
    plates: Vec<PlateBox>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let params = DetectionParams::new(cli.scale_factor, cli.min_neighbors)?;
    let mut detector = CascadePlateDetector::load(&cli.cascade)?;

    if is_image(&cli.input) {
        run_image(&cli, &mut detector, &params)
    } else {
        run_video(&cli, &mut detector, &params)
    }
}

fn run_image(
    cli: &Cli,
    detector: &mut dyn PlateDetector,
    params: &DetectionParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let plates = process_image(cli, detector, params)?;
    println!("{}", image_report(&plates, cli.json)?);
    Ok(())
}

/// Detects plates in the input image, then writes the annotated OUTPUT
/// and the crops when they were requested.
fn process_image(
    cli: &Cli,
    detector: &mut dyn PlateDetector,
    params: &DetectionParams,
) -> Result<Vec<Rectangle>, Box<dyn std::error::Error>> {
    let frame = ImageFileReader::new().read(&cli.input)?;
    let plates = detector.detect(&frame, params)?;
    log::info!(
        "Detected {} plates in {} ({params})",
        plates.len(),
        cli.input.display()
    );

    let writer = ImageFileWriter::new();
    if let Some(output) = &cli.output {
        writer.write(output, &draw_rectangles(&frame, &plates))?;
        log::info!("Output written to {}", output.display());
    }
    if let Some(dir) = &cli.crops {
        let regions = extract_plate_regions(&frame, &plates);
        for (i, region) in regions.iter().enumerate() {
            writer.write(&dir.join(format!("plate_{i}.png")), region)?;
        }
        log::info!("Saved {} plate crops to {}", regions.len(), dir.display());
    }
    Ok(plates)
}

fn image_report(plates: &[Rectangle], json: bool) -> Result<String, serde_json::Error> {
    if json {
        let boxes: Vec<PlateBox> = plates.iter().map(PlateBox::from).collect();
        return serde_json::to_string_pretty(&boxes);
    }
    let mut report = format!("Detected {} license plates", plates.len());
    for r in plates {
        report.push_str(&format!(
            "\n  x={} y={} width={} height={}",
            r.x, r.y, r.width, r.height
        ));
    }
    Ok(report)
}

fn run_video(
    cli: &Cli,
    detector: &mut dyn PlateDetector,
    params: &DetectionParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = FfmpegReader::new();
    let metadata = reader.open(&cli.input)?;
    let limit = cli.max_frames.unwrap_or(usize::MAX);

    let mut total_plates = 0;
    let scanned = scan_video(&mut reader, detector, params, limit, |report| {
        total_plates += report.plates.len();
        if cli.json {
            match serde_json::to_string(report) {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("Failed to serialize frame {}: {e}", report.frame),
            }
        } else {
            eprint!("\r{}", progress_line(report.frame + 1, metadata.total_frames));
        }
    });
    reader.close();
    let frames = scanned?;

    if !cli.json {
        eprintln!();
        println!("Detected {total_plates} license plates across {frames} frames");
    }
    Ok(())
}

/// Reads at most `limit` frames from an opened reader, resizing each to
/// the processing size before detection. Returns the number of frames
/// scanned.
fn scan_video(
    reader: &mut dyn VideoReader,
    detector: &mut dyn PlateDetector,
    params: &DetectionParams,
    limit: usize,
    mut on_frame: impl FnMut(&FrameReport),
) -> Result<usize, Box<dyn std::error::Error>> {
    let (width, height) = VIDEO_PROCESSING_SIZE;
    let mut frames = 0;
    while frames < limit {
        let Some(frame) = reader.read_frame()? else {
            break;
        };
        let frame = frame.resized(width, height);
        let plates = detector.detect(&frame, params)?;
        log::debug!("Frame {}: {} plates", frame.index(), plates.len());

        on_frame(&FrameReport {
            frame: frame.index(),
            plates: plates.iter().map(PlateBox::from).collect(),
        });
        frames += 1;
    }
    Ok(frames)
}

/// Containers that do not report a frame count get no denominator.
fn progress_line(current: usize, total: usize) -> String {
    if total == 0 {
        format!("Processing frame {current}")
    } else {
        format!("Processing frame {current}/{total}")
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) && (cli.output.is_some() || cli.crops.is_some()) {
        return Err("OUTPUT and --crops apply to image input only".into());
    }
    if cli.max_frames == Some(0) {
        return Err("--max-frames must be at least 1".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use platescan_core::shared::frame::Frame;
    use platescan_core::shared::video_metadata::VideoMetadata;

    use super::*;

    /// Single-stage cascade that accepts every window.
    const ACCEPT_ALL_CASCADE: &str = r#"<?xml version="1.0"?>
<opencv_storage>
<cascade>
  <stageType>BOOST</stageType>
  <featureType>HAAR</featureType>
  <height>24</height>
  <width>24</width>
  <stageParams>
    <boostType>GAB</boostType>
    <minHitRate>9.9500000476837158e-01</minHitRate>
    <maxFalseAlarm>5.0000000000000000e-01</maxFalseAlarm>
    <weightTrimRate>9.4999999999999996e-01</weightTrimRate>
    <maxDepth>1</maxDepth>
    <maxWeakCount>1</maxWeakCount></stageParams>
  <featureParams>
    <maxCatCount>0</maxCatCount>
    <featSize>1</featSize>
    <mode>BASIC</mode></featureParams>
  <stageNum>1</stageNum>
  <stages>
    <_>
      <maxWeakCount>1</maxWeakCount>
      <stageThreshold>-1.</stageThreshold>
      <weakClassifiers>
        <_>
          <internalNodes>
            0 -1 0 0.</internalNodes>
          <leafValues>
            1. 1.</leafValues></_></weakClassifiers></_></stages>
  <features>
    <_>
      <rects>
        <_>
          0 0 24 24 -1.</_>
        <_>
          0 0 12 24 2.</_></rects></_></features></cascade>
</opencv_storage>
"#;

    fn write_car_png(dir: &Path) -> PathBuf {
        let (width, height) = (96u32, 72u32);
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x * 7 + y * 13) % 256) as u8;
                data.extend_from_slice(&[v, 255 - v, x as u8]);
            }
        }
        let path = dir.join("car.png");
        ImageFileWriter::new()
            .write(&path, &Frame::new(data, width, height, 3, 0))
            .unwrap();
        path
    }

    fn accept_all_detector(dir: &Path) -> CascadePlateDetector {
        let path = dir.join("accept_all.xml");
        std::fs::write(&path, ACCEPT_ALL_CASCADE).unwrap();
        CascadePlateDetector::load(&path).unwrap()
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("platescan").chain(args.iter().copied()))
    }

    /// Endless clip of 8x6 frames.
    struct StubVideoReader {
        position: usize,
    }

    impl VideoReader for StubVideoReader {
        fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            Ok(VideoMetadata {
                width: 8,
                height: 6,
                fps: 25.0,
                total_frames: 0,
                codec: "stub".into(),
                source_path: Some(path.to_path_buf()),
            })
        }

        fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            let index = self.position;
            self.position += 1;
            Ok(Some(Frame::new(vec![0; 8 * 6 * 3], 8, 6, 3, index)))
        }

        fn rewind(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            self.position = 0;
            Ok(())
        }

        fn is_open(&self) -> bool {
            true
        }

        fn close(&mut self) {}
    }

    /// Reports one plate per frame and records the frame sizes it saw.
    struct SizeRecorder {
        sizes: Arc<Mutex<Vec<(u32, u32)>>>,
    }

    impl PlateDetector for SizeRecorder {
        fn detect(
            &mut self,
            frame: &Frame,
            _params: &DetectionParams,
        ) -> Result<Vec<Rectangle>, Box<dyn std::error::Error>> {
            self.sizes
                .lock()
                .unwrap()
                .push((frame.width(), frame.height()));
            Ok(vec![Rectangle::new(5, 5, 40, 30)])
        }
    }

    #[test]
    fn test_is_image_by_extension() {
        assert!(is_image(Path::new("car.JPG")));
        assert!(is_image(Path::new("dir/car.bmp")));
        assert!(!is_image(Path::new("clip.avi")));
        assert!(!is_image(Path::new("noext")));
    }

    #[test]
    fn test_defaults_match_desktop() {
        let cli = Cli::parse_from(["platescan", "car.png"]);
        assert_eq!(cli.cascade, PathBuf::from("pak.xml"));
        assert_eq!(cli.scale_factor, 1.1);
        assert_eq!(cli.min_neighbors, 5);
        assert!(!cli.json);
    }

    #[test]
    fn test_plate_box_json_shape() {
        let json = serde_json::to_string(&PlateBox::from(&Rectangle::new(1, 2, 30, 40))).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"width":30,"height":40}"#);
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let cli = Cli::parse_from(["platescan", "/definitely/not/here.png"]);
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_image_run_writes_output_and_crops() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_car_png(dir.path());
        let output = dir.path().join("annotated.png");
        let crops = dir.path().join("crops");
        let cli = parse(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--crops",
            crops.to_str().unwrap(),
        ]);
        validate(&cli).unwrap();

        let mut detector = accept_all_detector(dir.path());
        let plates = process_image(&cli, &mut detector, &DetectionParams::default()).unwrap();

        assert!(!plates.is_empty());
        assert!(output.is_file());
        for i in 0..plates.len() {
            assert!(crops.join(format!("plate_{i}.png")).is_file());
        }
        assert!(!crops.join(format!("plate_{}.png", plates.len())).exists());
    }

    #[test]
    fn test_image_run_without_targets_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_car_png(dir.path());
        let cli = parse(&[input.to_str().unwrap()]);

        let mut detector = accept_all_detector(dir.path());
        process_image(&cli, &mut detector, &DetectionParams::default()).unwrap();

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 2);
    }

    #[test]
    fn test_json_report_is_array_of_boxes() {
        let plates = vec![Rectangle::new(1, 2, 30, 40), Rectangle::new(50, 60, 35, 31)];
        let json = image_report(&plates, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[1]["x"], 50);
        assert_eq!(array[1]["height"], 31);
    }

    #[test]
    fn test_text_report_lists_each_plate() {
        let report = image_report(&[Rectangle::new(1, 2, 30, 40)], false).unwrap();
        assert_eq!(
            report,
            "Detected 1 license plates\n  x=1 y=2 width=30 height=40"
        );
    }

    #[test]
    fn test_video_scan_stops_at_max_frames() {
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let mut detector = SizeRecorder {
            sizes: sizes.clone(),
        };
        let mut reader = StubVideoReader { position: 0 };
        reader.open(Path::new("clip.avi")).unwrap();

        let mut reports = Vec::new();
        let scanned = scan_video(
            &mut reader,
            &mut detector,
            &DetectionParams::default(),
            3,
            |report| reports.push(serde_json::to_string(report).unwrap()),
        )
        .unwrap();

        assert_eq!(scanned, 3);
        assert_eq!(reports.len(), 3);
        assert_eq!(
            reports[2],
            r#"{"frame":2,"plates":[{"x":5,"y":5,"width":40,"height":30}]}"#
        );
        assert!(sizes.lock().unwrap().iter().all(|s| *s == (640, 480)));
    }

    #[test]
    fn test_validate_rejects_image_targets_for_video() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("clip.avi");
        std::fs::write(&clip, b"not really a video").unwrap();
        let clip = clip.to_str().unwrap();

        assert!(validate(&parse(&[clip])).is_ok());
        assert!(validate(&parse(&[clip, "out.png"])).is_err());
        assert!(validate(&parse(&[clip, "--crops", "plates"])).is_err());
        assert!(validate(&parse(&[clip, "--max-frames", "0"])).is_err());
    }

    #[test]
    fn test_progress_line_omits_unknown_total() {
        assert_eq!(progress_line(4, 0), "Processing frame 4");
        assert_eq!(progress_line(4, 120), "Processing frame 4/120");
    }
}
