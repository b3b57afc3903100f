use iced::widget::{container, image, row, scrollable, text};
use iced::{Element, Length, Theme};

use crate::app::Message;
use crate::theme::muted_color;

const THUMB_SPACING: f32 = 8.0;
const STRIP_HEIGHT: f32 = 84.0;

/// A decoded thumbnail ready for the strip.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

/// Left-to-right row of plate crops, scrolling horizontally when it
/// overflows.
pub fn view<'a>(thumbnails: &[Thumbnail], theme: &Theme) -> Element<'a, Message> {
    if thumbnails.is_empty() {
        return container(text("No plates yet").size(13).color(muted_color(theme)))
            .height(STRIP_HEIGHT)
            .center_y(STRIP_HEIGHT)
            .into();
    }

    let items = thumbnails.iter().map(|thumb| -> Element<'a, Message> {
        image(thumb.handle.clone())
            .width(thumb.width as f32)
            .height(thumb.height as f32)
            .into()
    });

    scrollable(row(items).spacing(THUMB_SPACING).padding([4, 0]))
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new(),
        ))
        .width(Length::Fill)
        .height(STRIP_HEIGHT)
        .into()
}
