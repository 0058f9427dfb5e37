use iced::widget::{button, column, text};
use iced::Element;

use super::field;
use crate::Message;

/// Connection details for the index server
pub struct ServerLinkView<'a> {
    pub api_url: &'a str,
    pub mappings_url: String,
    pub node_count: usize,
    pub last_refresh: Option<String>,
}

pub fn view(link: ServerLinkView<'_>) -> Element<'_, Message> {
    let refreshed = link.last_refresh.unwrap_or_else(|| "never".to_string());

    column![
        text("Server link").size(32),
        field("Index server", link.api_url),
        text(format!("Mapping endpoint: {}", link.mappings_url)).size(14),
        text(format!("Mappings loaded: {}", link.node_count)).size(14),
        text(format!("Last refresh: {}", refreshed)).size(14),
        button("Refresh mappings").on_press(Message::RefreshMappings),
    ]
    .spacing(10)
    .into()
}
