use iced::widget::{button, column, row, text};
use iced::{Element, Length, Theme};

use crate::app::{Message, Panel};
use crate::theme::muted_color;
use crate::widgets::frame_view::frame_view;
use crate::widgets::plate_strip;

pub fn view<'a>(panel: &'a Panel, is_playing: bool, theme: &Theme) -> Element<'a, Message> {
    let play = button(text("Play")).padding([6, 14]);
    let play = if is_playing {
        play
    } else {
        play.on_press(Message::Play)
    };
    let stop = button(text("Stop")).padding([6, 14]);
    let stop = if is_playing {
        stop.on_press(Message::Stop)
    } else {
        stop
    };

    let controls = row![
        button(text("Load Video"))
            .on_press(Message::SelectVideo)
            .padding([6, 14]),
        play,
        stop,
        button(text("Clear"))
            .on_press(Message::ClearVideo)
            .style(button::secondary)
            .padding([6, 14]),
    ]
    .spacing(8);

    column![
        frame_view(panel.frame.as_ref(), "Press Play to start the video", theme),
        controls,
        text(&panel.status).size(14).color(muted_color(theme)),
        plate_strip::view(&panel.thumbnails, theme),
    ]
    .spacing(12)
    .width(Length::Fill)
    .into()
}
