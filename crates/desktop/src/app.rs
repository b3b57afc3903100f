use std::path::PathBuf;

use iced::widget::{button, column, container, image, row, text};
use iced::{window, Element, Length, Subscription, Task, Theme};

use platescan_core::detection::domain::detection_params::DetectionParams;
use platescan_core::detection::domain::plate_detector::PlateDetector;
use platescan_core::detection::infrastructure::cascade_plate_detector::CascadePlateDetector;
use platescan_core::pipeline::image_session::ImageSession;
use platescan_core::pipeline::session_error::SessionError;
use platescan_core::pipeline::video_session::{TickOutcome, VideoSession};
use platescan_core::presentation::display::DisplayImage;
use platescan_core::shared::constants::{
    DEFAULT_CASCADE_PATH, FRAME_POLL_INTERVAL, IMAGE_EXTENSIONS, SAVE_EXTENSIONS,
    VIDEO_EXTENSIONS,
};
use platescan_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use platescan_core::video::infrastructure::image_file_reader::ImageFileReader;
use platescan_core::video::infrastructure::image_file_writer::ImageFileWriter;

use crate::tabs;
use crate::theme;
use crate::widgets::plate_strip::Thumbnail;

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Video,
    Image,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Video, Tab::Image];

    fn label(self) -> &'static str {
        match self {
            Tab::Video => "Video Processing",
            Tab::Image => "Image Processing",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    SelectVideo,
    VideoSelected(Option<PathBuf>),
    Play,
    Stop,
    ClearVideo,
    Tick,
    SelectImage,
    ImageSelected(Option<PathBuf>),
    Detect,
    SaveImage,
    SavePathSelected(Option<PathBuf>),
    ClearImage,
    ScaleFactorChanged(u32),
    MinNeighborsChanged(u32),
    DialogClosed,
    CloseRequested(window::Id),
}

/// Everything a tab draws, as iced handles. Handles are only rebuilt
/// for the tab a message touched.
#[derive(Default)]
pub struct Panel {
    pub frame: Option<image::Handle>,
    pub thumbnails: Vec<Thumbnail>,
    pub status: String,
}

impl Panel {
    fn set_frame(&mut self, frame: Option<&DisplayImage>) {
        self.frame = frame.map(to_handle);
    }

    fn replace_thumbnails(&mut self, items: &[DisplayImage]) {
        self.thumbnails = items.iter().map(to_thumbnail).collect();
    }

    /// Converts only the thumbnails past the ones already held. The video
    /// list only grows between clears, so a shorter list means it was
    /// cleared.
    fn sync_thumbnails(&mut self, items: &[DisplayImage]) {
        self.thumbnails.truncate(items.len());
        let held = self.thumbnails.len();
        self.thumbnails
            .extend(items[held..].iter().map(to_thumbnail));
    }

    fn set_status(&mut self, status: &str) {
        if self.status != status {
            self.status = status.to_string();
        }
    }
}

fn to_handle(display: &DisplayImage) -> image::Handle {
    image::Handle::from_rgba(display.width, display.height, display.rgba.clone())
}

fn to_thumbnail(display: &DisplayImage) -> Thumbnail {
    Thumbnail {
        handle: to_handle(display),
        width: display.width,
        height: display.height,
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    detector: Option<Box<dyn PlateDetector>>,
    cascade_error: Option<String>,
    params: DetectionParams,
    video: VideoSession,
    image: ImageSession,
    video_panel: Panel,
    image_panel: Panel,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let (detector, cascade_error, task) =
            match CascadePlateDetector::load(std::path::Path::new(DEFAULT_CASCADE_PATH)) {
                Ok(d) => (Some(Box::new(d) as Box<dyn PlateDetector>), None, Task::none()),
                Err(e) => {
                    log::error!("{e}");
                    let message = format!("Error loading cascade classifier: {e}");
                    let task = show_dialog(rfd::MessageLevel::Error, "Error", message.clone());
                    (None, Some(message), task)
                }
            };

        let app = Self {
            active_tab: Tab::Video,
            detector,
            cascade_error,
            params: DetectionParams::default(),
            video: VideoSession::new(Box::new(FfmpegReader::new())),
            image: ImageSession::new(
                Box::new(ImageFileReader::new()),
                Box::new(ImageFileWriter::new()),
            ),
            video_panel: Panel::default(),
            image_panel: Panel::default(),
        };
        (app, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
                Task::none()
            }
            Message::SelectVideo => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Open Video File")
                        .add_filter("Video Files", VIDEO_EXTENSIONS)
                        .pick_file()
                        .await
                        .map(|h| h.path().to_path_buf())
                },
                Message::VideoSelected,
            ),
            Message::VideoSelected(Some(path)) => {
                self.video.load(&path);
                self.sync_video(false);
                Task::none()
            }
            Message::VideoSelected(None) => Task::none(),
            Message::Play => {
                let result = self.video.play();
                self.sync_video(false);
                match result {
                    Ok(()) => Task::none(),
                    Err(e) => report(&e),
                }
            }
            Message::Stop => {
                self.video.stop();
                self.sync_video(false);
                Task::none()
            }
            Message::ClearVideo => {
                self.video.clear();
                self.sync_video(false);
                Task::none()
            }
            Message::Tick => {
                let detector = self
                    .detector
                    .as_mut()
                    .map(|d| &mut **d as &mut dyn PlateDetector);
                // Video runs with the fixed defaults; the sliders belong to
                // the image tab.
                match self.video.tick(detector, &DetectionParams::default()) {
                    Ok(TickOutcome::Shown(_)) => {
                        self.sync_video(true);
                        Task::none()
                    }
                    Ok(TickOutcome::Rewound | TickOutcome::Idle) => Task::none(),
                    Err(e) => {
                        self.sync_video(false);
                        report(&e)
                    }
                }
            }
            Message::SelectImage => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Open Image File")
                        .add_filter("Image Files", IMAGE_EXTENSIONS)
                        .pick_file()
                        .await
                        .map(|h| h.path().to_path_buf())
                },
                Message::ImageSelected,
            ),
            Message::ImageSelected(Some(path)) => {
                // Failures are shown in the status line only.
                if let Err(e) = self.image.load(&path) {
                    log::debug!("Image load reported in status: {e}");
                }
                self.sync_image(true);
                Task::none()
            }
            Message::ImageSelected(None) => Task::none(),
            Message::Detect => {
                let detector = self
                    .detector
                    .as_mut()
                    .map(|d| &mut **d as &mut dyn PlateDetector);
                match self.image.detect(detector, &self.params) {
                    Ok(_) => {
                        self.sync_image(true);
                        Task::none()
                    }
                    Err(e) => report(&e),
                }
            }
            Message::SaveImage => {
                if !self.image.has_image() {
                    report(&SessionError::NothingToSave)
                } else {
                    Task::perform(
                        async {
                            rfd::AsyncFileDialog::new()
                                .set_title("Save Image")
                                .set_file_name("result.png")
                                .add_filter("Images", SAVE_EXTENSIONS)
                                .save_file()
                                .await
                                .map(|h| h.path().to_path_buf())
                        },
                        Message::SavePathSelected,
                    )
                }
            }
            Message::SavePathSelected(Some(path)) => {
                let result = self.image.save(&path);
                self.sync_image(false);
                match result {
                    Ok(()) => Task::none(),
                    Err(e) => report(&e),
                }
            }
            Message::SavePathSelected(None) => Task::none(),
            Message::ClearImage => {
                self.image.clear();
                self.sync_image(true);
                Task::none()
            }
            Message::ScaleFactorChanged(value) => {
                self.params = self.params.with_scale_slider(value);
                self.image.params_changed(&self.params);
                self.sync_image(false);
                Task::none()
            }
            Message::MinNeighborsChanged(value) => {
                self.params = self.params.with_neighbors_slider(value);
                self.image.params_changed(&self.params);
                self.sync_image(false);
                Task::none()
            }
            Message::DialogClosed => Task::none(),
            Message::CloseRequested(_) => {
                self.video.shutdown();
                iced::exit()
            }
        }
    }

    /// Copies video session state into the panel. A new frame handle is
    /// built only when a tick produced one; thumbnails are appended.
    fn sync_video(&mut self, new_frame: bool) {
        if new_frame {
            self.video_panel.set_frame(self.video.display());
        }
        self.video_panel.sync_thumbnails(self.video.thumbnails());
        self.video_panel.set_status(self.video.status());
    }

    fn sync_image(&mut self, rebuild: bool) {
        if rebuild {
            self.image_panel.set_frame(self.image.display());
            self.image_panel.replace_thumbnails(self.image.thumbnails());
        }
        self.image_panel.set_status(self.image.status());
    }

    pub fn view(&self) -> Element<'_, Message> {
        let theme = self.theme();

        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let btn = button(text(tab.label()).size(13))
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Video => tabs::video_tab::view(&self.video_panel, self.video.is_playing(), &theme),
            Tab::Image => tabs::image_tab::view(&self.image_panel, &self.params, &theme),
        };

        let mut layout = column![tab_bar].spacing(0).height(Length::Fill);
        if let Some(error) = &self.cascade_error {
            layout = layout.push(
                container(text(error).size(13).color(theme.palette().danger)).padding([6, 16]),
            );
        }
        layout
            .push(container(content).padding(16).height(Length::Fill))
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let close = window::close_requests().map(Message::CloseRequested);
        if self.video.is_playing() {
            Subscription::batch([
                close,
                iced::time::every(FRAME_POLL_INTERVAL).map(|_| Message::Tick),
            ])
        } else {
            close
        }
    }
}

/// Surfaces a session failure as a native message box.
fn report(error: &SessionError) -> Task<Message> {
    let (level, title) = if error.is_warning() {
        (rfd::MessageLevel::Warning, "Warning")
    } else {
        (rfd::MessageLevel::Error, "Error")
    };
    show_dialog(level, title, error.to_string())
}

fn show_dialog(level: rfd::MessageLevel, title: &'static str, description: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(level)
                .set_title(title)
                .set_description(description)
                .set_buttons(rfd::MessageButtons::Ok)
                .show()
                .await
        },
        |_| Message::DialogClosed,
    )
}
