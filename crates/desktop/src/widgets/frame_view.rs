use iced::border::Border;
use iced::widget::{container, image, text};
use iced::{Element, Length, Theme};

use crate::app::Message;
use crate::theme::{frame_border_color, muted_color};

const FRAME_WIDTH: f32 = 640.0;
const FRAME_HEIGHT: f32 = 480.0;

/// Bordered 640x480 area showing the current frame, or a placeholder.
pub fn frame_view<'a>(
    handle: Option<&image::Handle>,
    placeholder: &'a str,
    theme: &Theme,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => text(placeholder).color(muted_color(theme)).into(),
    };

    let border_color = frame_border_color(theme);
    container(content)
        .width(FRAME_WIDTH)
        .height(FRAME_HEIGHT)
        .center_x(FRAME_WIDTH)
        .center_y(FRAME_HEIGHT)
        .style(move |_theme: &Theme| container::Style {
            border: Border {
                color: border_color,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}
