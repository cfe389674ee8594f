//! Static content: the bundled seed memories and the narrative sections

use std::path::Path;

use crate::state::data::{ImageSource, ItemId, MemoryItem};

/// Number of photos shipped in the assets directory (moment1.jpg ..)
pub const SEED_COUNT: u32 = 5;

/// The bundled memories, in display order.
///
/// Ids are `ItemId::Local`, so these can never be edited remotely or deleted
/// from the store.
pub fn seed_memories(assets_dir: &Path) -> Vec<MemoryItem> {
    (1..=SEED_COUNT)
        .map(|n| MemoryItem {
            id: ItemId::Local(n),
            image: ImageSource::Bundled(assets_dir.join(format!("moment{}.jpg", n))),
            date: String::new(),
            caption: String::new(),
        })
        .collect()
}

pub struct StoryCard {
    pub title: &'static str,
    pub text: &'static str,
}

pub const STORY: [StoryCard; 3] = [
    StoryCard {
        title: "The Beginning",
        text: "How we met. A chance encounter that became a lifetime promise.",
    },
    StoryCard {
        title: "The Journey",
        text: "How we grew. Through laughter, silence, and every moment in between.",
    },
    StoryCard {
        title: "The Forever",
        text: "Where we are now. Building a future on the foundation of our love.",
    },
];

/// A highlighted moment, shown with one of the seed photos
pub struct Moment {
    pub seed: u32,
    pub date: &'static str,
    pub caption: &'static str,
}

pub const MOMENTS: [Moment; 3] = [
    Moment {
        seed: 1,
        date: "02 December 2025",
        caption: "The first time we realized this was forever.",
    },
    Moment {
        seed: 2,
        date: "03 October 2025",
        caption: "Laughter that echoes in our hearts.",
    },
    Moment {
        seed: 3,
        date: "Every Day",
        caption: "Finding home in each other's eyes.",
    },
];

pub const CLOSING_QUOTE: &str = "\u{201c}In a world full of temporary things, we chose permanence.\u{201d}";

pub const FOOTER: &str = "Made with love.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_local_and_ordered() {
        let seed = seed_memories(Path::new("/assets"));
        assert_eq!(seed.len(), SEED_COUNT as usize);
        assert!(seed.iter().all(|item| !item.id.is_remote()));
        assert_eq!(seed[0].id, ItemId::Local(1));
        assert_eq!(
            seed[4].image,
            ImageSource::Bundled(Path::new("/assets").join("moment5.jpg"))
        );
    }

    #[test]
    fn test_moments_point_at_seed_photos() {
        assert!(MOMENTS.iter().all(|m| (1..=SEED_COUNT).contains(&m.seed)));
    }
}
