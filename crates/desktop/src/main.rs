mod app;
mod tabs;
mod theme;
mod widgets;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("License Plate Detection")
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(800.0, 820.0),
            min_size: Some(iced::Size::new(680.0, 640.0)),
            exit_on_close_request: false,
            ..Default::default()
        })
        .run()
}
