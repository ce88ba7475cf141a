pub mod map;

use iced::{
    Alignment::Center,
    Color, Element, Length, Theme, border,
    widget::{column, container, container::Style, row, text, text_input},
};
use iced_widget::container::bordered_box;

use crate::core::model;

pub const ERROR_COLOR: Color = Color::from_rgb8(0xE5, 0x39, 0x35);
pub const NOTICE_COLOR: Color = Color::from_rgb8(0x22, 0x8B, 0x22);

pub fn to_iced_color(color: model::Color) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}

fn card_style(theme: &Theme) -> Style {
    bordered_box(theme).border(border::rounded(6).width(1))
}

/// Highlighted variant used for the selected office panel.
fn accent_style(theme: &Theme) -> Style {
    bordered_box(theme)
        .border(border::rounded(6).width(2).color(theme.palette().primary))
}

pub fn card<'a, Message: 'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(12)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

pub fn accent_card<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    container(content)
        .padding(12)
        .width(Length::Fill)
        .style(accent_style)
        .into()
}

/// A titled block with an optional action (usually an "Add" button) on
/// the right of the title.
pub fn section<'a, Message: 'a>(
    title: &'a str,
    action: Option<Element<'a, Message>>,
    body: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let mut header = row![container(text(title).size(20)).width(Length::Fill)].align_y(Center);
    if let Some(action) = action {
        header = header.push(action);
    }
    column![header, body.into()].spacing(8).into()
}

pub fn labeled_input<'a, Message: Clone + 'a>(
    label: &'a str,
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    column![
        text(label).size(14),
        text_input(label, value).on_input(on_input).padding(6),
    ]
    .spacing(4)
    .into()
}

pub fn error_text<'a, Message: 'a>(message: impl ToString) -> Element<'a, Message> {
    text(message.to_string()).color(ERROR_COLOR).into()
}

pub fn notice_text<'a, Message: 'a>(message: &'a str) -> Element<'a, Message> {
    text(message).color(NOTICE_COLOR).into()
}

/// Centred, fixed-width panel every sign-in step is drawn in.
pub fn auth_layout<'a, Message: 'a>(
    title: &'a str,
    subtitle: impl ToString,
    body: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let panel = container(
        column![
            text(title).size(28),
            text(subtitle.to_string()).size(14),
            body.into(),
        ]
        .spacing(16),
    )
    .padding(24)
    .width(Length::Fixed(380.0))
    .style(card_style);

    container(panel)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Dashboard body: the map column on the left, the scrolling panels on
/// the right.
pub fn layout<'a, Message: 'a>(
    header: impl Into<Element<'a, Message>>,
    map_column: impl Into<Element<'a, Message>>,
    panels: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    column![
        header.into(),
        row![
            container(map_column.into()).width(Length::FillPortion(3)),
            container(panels.into())
                .width(Length::FillPortion(2))
                .height(Length::Fill),
        ]
        .spacing(16),
    ]
    .spacing(16)
    .padding(16)
    .into()
}
