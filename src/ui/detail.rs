/// Single memory view, editable when the gallery is unlocked
use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;

use memory_gallery::state::{ItemId, MemoryEdit, MemoryItem};

use super::{picture, Picture};
use crate::Message;

pub fn view<'a>(
    item: &'a MemoryItem,
    draft: &'a MemoryEdit,
    pictures: &HashMap<ItemId, Picture>,
    unlocked: bool,
) -> Element<'a, Message> {
    let mut details = Column::new().spacing(12).align_x(Alignment::Center);

    if unlocked {
        details = details
            .push(
                text_input("Date to be added", &draft.date)
                    .on_input(Message::DateChanged)
                    .width(Length::Fixed(420.0)),
            )
            .push(
                text_input("Add a caption...", &draft.caption)
                    .on_input(Message::CaptionChanged)
                    .on_submit(Message::Save)
                    .width(Length::Fixed(420.0)),
            )
            .push(
                row![
                    button("Save Memory").on_press(Message::Save).padding(8),
                    button("Delete").on_press(Message::Delete).padding(8),
                ]
                .spacing(12),
            );
    } else {
        if !item.date.is_empty() {
            details = details.push(text(&item.date).size(14));
        }
        if !item.caption.is_empty() {
            details = details.push(text(&item.caption).size(20));
        }
    }

    let content = column![
        row![button("Close").on_press(Message::CloseDetail).padding(6)],
        picture(item, pictures, 720.0, 480.0),
        details,
    ]
    .spacing(20)
    .padding(30)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
