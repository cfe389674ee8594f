/// Photo grid with the upload panel underneath
use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use memory_gallery::state::{ItemId, MemoryItem};

use super::sections::header;
use super::{picture, Picture};
use crate::Message;

const CARD_WIDTH: f32 = 240.0;
const CARD_HEIGHT: f32 = 180.0;

/// Everything the grid needs to render
pub struct GalleryView<'a> {
    pub items: &'a [MemoryItem],
    pub pictures: &'a HashMap<ItemId, Picture>,
    pub offline: bool,
    pub upload: UploadPanel<'a>,
}

/// State of the passcode / upload panel
pub struct UploadPanel<'a> {
    pub open: bool,
    pub unlocked: bool,
    pub passcode: &'a str,
    pub passcode_error: bool,
    pub uploading: bool,
}

pub fn view<'a>(gallery: GalleryView<'a>) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = gallery
        .items
        .iter()
        .map(|item| card(item, gallery.pictures))
        .collect();

    let mut content = Column::new()
        .spacing(24)
        .align_x(Alignment::Center)
        .push(header("Our Moments"));

    if gallery.offline {
        content = content.push(text("Offline: showing bundled memories only").size(14));
    }

    content
        .push(Wrap::with_elements(cards))
        .push(upload_panel(gallery.upload))
        .into()
}

fn card<'a>(item: &'a MemoryItem, pictures: &HashMap<ItemId, Picture>) -> Element<'a, Message> {
    let mut body = column![picture(item, pictures, CARD_WIDTH, CARD_HEIGHT)].spacing(6);
    if !item.date.is_empty() {
        body = body.push(text(&item.date).size(13));
    }

    container(
        button(body)
            .on_press(Message::Select(item.id.clone()))
            .padding(4),
    )
    .padding(6)
    .into()
}

fn upload_panel<'a>(panel: UploadPanel<'a>) -> Element<'a, Message> {
    if !panel.open {
        return button("Add more memories")
            .on_press(Message::ToggleUpload)
            .padding(10)
            .into();
    }

    let body: Element<'a, Message> = if !panel.unlocked {
        let mut form = column![
            text("Private Access").size(20),
            text_input("Enter Passcode", panel.passcode)
                .secure(true)
                .on_input(Message::PasscodeChanged)
                .on_submit(Message::Unlock)
                .width(Length::Fixed(240.0)),
        ]
        .spacing(12)
        .align_x(Alignment::Center);
        if panel.passcode_error {
            form = form.push(text("Wrong passcode").size(13));
        }
        form.into()
    } else {
        let label = if panel.uploading {
            "Uploading..."
        } else {
            "Select Photo"
        };
        column![
            text("Add Memory").size(20),
            text("Upload a new photo to the collection.").size(14),
            row![
                button(label)
                    .on_press_maybe((!panel.uploading).then_some(Message::PickPhoto))
                    .padding(10),
                button("Lock").on_press(Message::Lock).padding(10),
            ]
            .spacing(12),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
    };

    column![body, button("Close").on_press(Message::ToggleUpload).padding(6)]
        .spacing(16)
        .align_x(Alignment::Center)
        .into()
}
