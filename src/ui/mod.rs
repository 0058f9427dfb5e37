/// View layer
///
/// One module per routed page, plus the navigation bar and the
/// fallback page shared by all of them.

pub mod about;
pub mod dashboard;
pub mod login;
pub mod server_link;

use iced::widget::{button, column, row, text, Row};
use iced::{Alignment, Element};

use crate::router::{Route, ROUTES};
use crate::state::auth::AuthStore;
use crate::Message;

/// Top bar with one button per routed view and the login status
pub fn nav_bar<'a>(current: Route, auth: &'a AuthStore) -> Element<'a, Message> {
    let mut links = Row::new().spacing(8).align_y(Alignment::Center);
    for (path, route) in ROUTES {
        let link = button(text(route.title()))
            .padding([4, 10])
            .on_press(Message::Navigate(path.to_string()));
        let link = if route == current {
            link.style(button::primary)
        } else {
            link.style(button::secondary)
        };
        links = links.push(link);
    }

    let who = if auth.is_logged_in() {
        text(format!("Signed in as {}", auth.user_info().display_name()))
    } else {
        text("Not signed in")
    };

    row![links, who.size(14)]
        .spacing(24)
        .align_y(Alignment::Center)
        .into()
}

/// Fallback page for paths outside the route table
pub fn not_found(path: &str) -> Element<'_, Message> {
    column![
        text("Page not found").size(32),
        text(format!("Nothing is routed at \"{}\".", path)),
        button("Back to mappings").on_press(go(Route::Main)),
    ]
    .spacing(12)
    .into()
}

/// Navigation message for a routed view
fn go(route: Route) -> Message {
    Message::Navigate(route.path().unwrap_or("/").to_string())
}

/// `label: value` line used by the detail panes
fn field<'a>(label: &'a str, value: &'a str) -> Element<'a, Message> {
    row![text(label).size(14).width(140), text(value).size(14)]
        .spacing(8)
        .into()
}
