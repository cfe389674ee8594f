/// UI components
///
/// - `sections.rs` - hero banner, story cards, moments and closing quote
/// - `gallery.rs` - photo grid, connection indicator and upload panel
/// - `detail.rs` - single memory view with the edit form

pub mod detail;
pub mod gallery;
pub mod sections;

use iced::widget::image::{Handle, Image};
use iced::widget::{container, text};
use iced::{ContentFit, Element, Length};
use std::collections::HashMap;

use memory_gallery::state::{ImageSource, ItemId, MemoryItem};

use crate::Message;

/// Download state of a remote photo
#[derive(Debug, Clone)]
pub enum Picture {
    Loaded(Handle),
    Failed,
}

/// Render an item's photo at the given size.
///
/// Bundled photos load straight from disk; remote photos show a placeholder
/// until their download finishes.
pub fn picture<'a>(
    item: &MemoryItem,
    pictures: &HashMap<ItemId, Picture>,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let handle = match &item.image {
        ImageSource::Bundled(path) => Some(Handle::from_path(path.clone())),
        ImageSource::Url(_) => match pictures.get(&item.id) {
            Some(Picture::Loaded(handle)) => Some(handle.clone()),
            Some(Picture::Failed) => {
                return placeholder("Failed to load", width, height);
            }
            None => None,
        },
    };

    match handle {
        Some(handle) => Image::new(handle)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        None => placeholder("Loading...", width, height),
    }
}

fn placeholder<'a>(label: &'a str, width: f32, height: f32) -> Element<'a, Message> {
    container(text(label).size(14))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .center_x(Length::Fixed(width))
        .center_y(Length::Fixed(height))
        .into()
}
