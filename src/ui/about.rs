use iced::widget::{button, column, row, text};
use iced::Element;

use super::go;
use crate::router::Route;
use crate::Message;

/// Landing page
pub fn view<'a>() -> Element<'a, Message> {
    column![
        text("Index Server Console").size(40),
        text(
            "Browse the file mappings published by the index server and \
             inspect the metadata held for each file."
        )
        .size(16),
        row![
            button("Sign in").on_press(go(Route::Login)),
            button("Open mappings")
                .style(button::secondary)
                .on_press(go(Route::Main)),
        ]
        .spacing(12),
    ]
    .spacing(20)
    .into()
}
