use std::collections::HashSet;

use iced::widget::{button, column, container, row, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length, Theme};

use super::field;
use crate::state::data::{MappingNode, SelectionComposite};
use crate::state::mappings::{flatten_visible, MappingStore};
use crate::Message;

/// Pixels of indentation per tree level
const INDENT: f32 = 18.0;

/// Main page: mapping tree on the left, selection details on the right
pub fn view<'a>(store: &'a MappingStore, collapsed: &HashSet<String>) -> Element<'a, Message> {
    let header = row![
        text("Mappings").size(32),
        button("Refresh")
            .style(button::secondary)
            .on_press(Message::RefreshMappings),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let tree = container(scrollable(tree_pane(store, collapsed)).height(Length::Fill))
        .padding(10)
        .width(Length::FillPortion(3))
        .style(container::bordered_box);

    let details = container(detail_pane(store.selected_mapping()))
        .padding(10)
        .width(Length::FillPortion(2))
        .style(container::bordered_box);

    column![header, row![tree, details].spacing(16).height(Length::Fill)]
        .spacing(16)
        .into()
}

fn tree_pane<'a>(store: &'a MappingStore, collapsed: &HashSet<String>) -> Element<'a, Message> {
    let rows = flatten_visible(store.all_mappings(), collapsed)
        .into_iter()
        .map(|r| tree_row(r.node, r.depth, collapsed.contains(&r.node.id), is_highlighted(store, r.node)));

    Column::with_children(rows).spacing(2).into()
}

fn tree_row(node: &MappingNode, depth: usize, is_collapsed: bool, is_selected: bool) -> Element<'_, Message> {
    let toggle: Element<'_, Message> = if node.children.is_empty() {
        Space::with_width(Length::Fixed(INDENT)).into()
    } else {
        button(text(if is_collapsed { "+" } else { "-" }).size(12))
            .padding([0, 6])
            .style(button::text)
            .on_press(Message::ToggleNode(node.id.clone()))
            .into()
    };

    let style: fn(&Theme, button::Status) -> button::Style = if is_selected {
        button::primary
    } else {
        button::text
    };
    let label = button(text(label_for(node)).size(14))
        .padding([2, 6])
        .style(style)
        .on_press(Message::Select(node.into()));

    row![
        Space::with_width(Length::Fixed(INDENT * depth as f32)),
        toggle,
        label
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Only a real selection highlights a row; the placeholder id never does.
fn is_highlighted(store: &MappingStore, node: &MappingNode) -> bool {
    store.has_selection() && store.selected_mapping().is_data.id == node.id
}

/// Display label, falling back to path then id for unlabeled nodes
fn label_for(node: &MappingNode) -> &str {
    if !node.text.is_empty() {
        &node.text
    } else if !node.path.is_empty() {
        &node.path
    } else {
        &node.id
    }
}

fn detail_pane(selected: &SelectionComposite) -> Element<'_, Message> {
    let fs = &selected.fs_data;
    let note = if fs.is_placeholder() {
        text("No file metadata for this mapping.").size(12)
    } else {
        text("").size(12)
    };

    column![
        text("Selected file").size(22),
        field("Mapping id", &selected.is_data.id),
        field("Path", &selected.is_data.path),
        field("Server name", &fs.server_name),
        field("Patient", &fs.patient),
        field("Updated", &fs.updated_at),
        field("Fetch token", &fs.fetch_token),
        note,
    ]
    .spacing(8)
    .into()
}
