use iced::widget::{button, column, text, text_input, Column};
use iced::Element;

use super::field;
use crate::state::auth::AuthStore;
use crate::Message;

/// Everything the login page shows
pub struct LoginView<'a> {
    pub auth: &'a AuthStore,
    pub authorize_url: &'a str,
    pub token_input: &'a str,
    pub error: Option<&'a str>,
    pub pending: bool,
}

pub fn view(login: LoginView<'_>) -> Element<'_, Message> {
    if login.auth.is_logged_in() {
        return signed_in(login.auth);
    }

    let submit = button(if login.pending { "Signing in..." } else { "Sign in" });
    let submit = if login.pending {
        submit
    } else {
        submit.on_press(Message::SubmitLogin)
    };

    let mut page: Column<Message> = column![
        text("Sign in").size(32),
        text("1. Open this address in a browser and grant access:").size(14),
        text(login.authorize_url).size(12),
        text("2. Paste the access token from the redirect below.").size(14),
        text_input("Access token", login.token_input)
            .on_input(Message::TokenChanged)
            .on_submit(Message::SubmitLogin)
            .secure(true)
            .padding(8),
        submit,
    ]
    .spacing(10);

    if let Some(error) = login.error {
        page = page.push(text(error).style(text::danger));
    }

    page.into()
}

fn signed_in(auth: &AuthStore) -> Element<'_, Message> {
    let profile = auth.user_info();

    column![
        text("Signed in").size(32),
        field("Name", profile.name.as_deref().unwrap_or("-")),
        field("Email", profile.email.as_deref().unwrap_or("-")),
        field("Subject", &profile.sub),
        button("Log out")
            .style(button::danger)
            .on_press(Message::Logout),
    ]
    .spacing(10)
    .into()
}
