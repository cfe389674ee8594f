/// Narrative sections around the gallery
use iced::widget::{column, container, horizontal_rule, row, text, Column, Row};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;

use memory_gallery::config::SiteConfig;
use memory_gallery::content::{CLOSING_QUOTE, FOOTER, MOMENTS, STORY};
use memory_gallery::state::{ItemId, MemoryItem};

use super::{picture, Picture};
use crate::Message;

pub fn hero(site: &SiteConfig) -> Element<'_, Message> {
    container(
        column![
            text(&site.subtitle).size(18),
            text(&site.title).size(56),
            text(&site.tagline).size(20),
        ]
        .spacing(16)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(80)
    .center_x(Length::Fill)
    .into()
}

/// Section title with a divider underneath
pub fn header(title: &str) -> Element<'_, Message> {
    column![text(title).size(32), horizontal_rule(1)]
        .spacing(8)
        .width(Length::Fixed(320.0))
        .align_x(Alignment::Center)
        .into()
}

pub fn story<'a>() -> Element<'a, Message> {
    let cards = STORY.iter().fold(Row::new().spacing(24), |cards, card| {
        cards.push(
            column![text(card.title).size(22), text(card.text).size(15)]
                .spacing(10)
                .width(Length::Fixed(260.0)),
        )
    });

    column![header("Our Journey"), cards]
        .spacing(32)
        .align_x(Alignment::Center)
        .into()
}

/// Highlighted moments, alternating photo and text sides
pub fn moments<'a>(
    seed: &[MemoryItem],
    pictures: &HashMap<ItemId, Picture>,
) -> Element<'a, Message> {
    let list = MOMENTS.iter().enumerate().fold(
        Column::new().spacing(40),
        |list, (index, moment)| {
            let photo = seed
                .iter()
                .find(|item| item.id == ItemId::Local(moment.seed))
                .map(|item| picture(item, pictures, 360.0, 240.0));
            let words: Element<'a, Message> =
                column![text(moment.date).size(14), text(moment.caption).size(24)]
                    .spacing(8)
                    .width(Length::Fixed(360.0))
                    .into();

            let line = match photo {
                Some(photo) if index % 2 == 0 => row![photo, words],
                Some(photo) => row![words, photo],
                None => row![words],
            };
            list.push(line.spacing(32).align_y(Alignment::Center))
        },
    );

    column![header("Cherished Memories"), list]
        .spacing(32)
        .align_x(Alignment::Center)
        .into()
}

pub fn ending<'a>() -> Element<'a, Message> {
    column![text(CLOSING_QUOTE).size(26), text(FOOTER).size(14)]
        .spacing(40)
        .padding(60)
        .align_x(Alignment::Center)
        .into()
}
