use iced::widget::{button, column, row, slider, text};
use iced::{Alignment, Element, Length, Theme};

use platescan_core::detection::domain::detection_params::{
    DetectionParams, NEIGHBORS_SLIDER_RANGE, SCALE_SLIDER_RANGE,
};

use crate::app::{Message, Panel};
use crate::theme::muted_color;
use crate::widgets::frame_view::frame_view;
use crate::widgets::plate_strip;

pub fn view<'a>(
    panel: &'a Panel,
    params: &DetectionParams,
    theme: &Theme,
) -> Element<'a, Message> {
    let controls = row![
        button(text("Load Image"))
            .on_press(Message::SelectImage)
            .padding([6, 14]),
        button(text("Detect Plates"))
            .on_press(Message::Detect)
            .padding([6, 14]),
        button(text("Save Result"))
            .on_press(Message::SaveImage)
            .padding([6, 14]),
        button(text("Clear"))
            .on_press(Message::ClearImage)
            .style(button::secondary)
            .padding([6, 14]),
    ]
    .spacing(8);

    let (scale_min, scale_max) = SCALE_SLIDER_RANGE;
    let (neighbors_min, neighbors_max) = NEIGHBORS_SLIDER_RANGE;
    let sliders = row![
        text("Scale Factor:").size(14),
        slider(
            scale_min..=scale_max,
            params.scale_slider_value(),
            Message::ScaleFactorChanged
        ),
        text("Min Neighbors:").size(14),
        slider(
            neighbors_min..=neighbors_max,
            params.min_neighbors(),
            Message::MinNeighborsChanged
        ),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    column![
        frame_view(panel.frame.as_ref(), "Load an image to begin", theme),
        controls,
        sliders,
        text(&panel.status).size(14).color(muted_color(theme)),
        plate_strip::view(&panel.thumbnails, theme),
    ]
    .spacing(12)
    .width(Length::Fill)
    .into()
}
