/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the remote store layer and the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identifier assigned by the remote store when a record is created.
///
/// The store may hand out numeric or textual ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RemoteId(pub String);

impl<'de> Deserialize<'de> for RemoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => RemoteId(n.to_string()),
            Raw::Text(s) => RemoteId(s),
        })
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a gallery item.
///
/// The variant decides mutability: `Local` items ship with the app and are
/// display-only, `Remote` items live in the store and can be edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemId {
    Local(u32),
    Remote(RemoteId),
}

impl ItemId {
    /// True when edits and deletes for this id must reach the remote store
    pub fn is_remote(&self) -> bool {
        matches!(self, ItemId::Remote(_))
    }

    pub fn remote(id: impl Into<String>) -> Self {
        ItemId::Remote(RemoteId(id.into()))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Local(n) => write!(f, "local:{}", n),
            ItemId::Remote(id) => write!(f, "remote:{}", id),
        }
    }
}

/// Where the bytes of an item's picture come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Asset shipped with the application
    Bundled(PathBuf),
    /// Public URL in the remote blob store
    Url(String),
}

impl ImageSource {
    /// Storage key of a remote blob: everything after the final `/` of the URL.
    /// Bundled assets have no storage key.
    pub fn blob_key(&self) -> Option<&str> {
        match self {
            ImageSource::Url(url) => url.rsplit('/').next().filter(|key| !key.is_empty()),
            ImageSource::Bundled(_) => None,
        }
    }
}

/// A single memory shown in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryItem {
    pub id: ItemId,
    pub image: ImageSource,
    /// Free-text date label, may be empty
    pub date: String,
    /// Free-text caption, may be empty
    pub caption: String,
}

impl MemoryItem {
    /// Overwrite the editable fields
    pub(crate) fn apply(&mut self, edit: &MemoryEdit) {
        self.date = edit.date.clone();
        self.caption = edit.caption.clone();
    }
}

/// The editable fields of a memory, sent to the store as-is on update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEdit {
    pub date: String,
    pub caption: String,
}

/// A row of the remote `memories` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemoryRecord {
    pub id: RemoteId,
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub caption: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<MemoryRecord> for MemoryItem {
    fn from(record: MemoryRecord) -> Self {
        MemoryItem {
            id: ItemId::Remote(record.id),
            image: ImageSource::Url(record.image_url),
            date: record.date,
            caption: record.caption,
        }
    }
}

/// Fields sent when inserting a new row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMemory {
    pub image_url: String,
    pub date: String,
    pub caption: String,
}

impl NewMemory {
    pub fn for_image(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            date: String::new(),
            caption: String::new(),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_follows_variant() {
        assert!(!ItemId::Local(1).is_remote());
        assert!(ItemId::remote("1").is_remote());
        // A remote id that looks like a seed id is still remote
        assert!(ItemId::remote("local:1").is_remote());
    }

    #[test]
    fn test_blob_key_is_last_path_segment() {
        let src = ImageSource::Url(
            "https://x.supabase.co/storage/v1/object/public/gallery-images/1700000000000-beach.jpg"
                .to_string(),
        );
        assert_eq!(src.blob_key(), Some("1700000000000-beach.jpg"));

        assert_eq!(ImageSource::Url("https://host/dir/".to_string()).blob_key(), None);
        assert_eq!(ImageSource::Bundled(PathBuf::from("a/b.jpg")).blob_key(), None);
    }

    #[test]
    fn test_record_accepts_numeric_id_and_null_fields() {
        let json = r#"{
            "id": 42,
            "image_url": "https://host/gallery-images/a.jpg",
            "date": null,
            "caption": "sunset",
            "created_at": "2025-12-02T10:00:00+00:00"
        }"#;
        let record: MemoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RemoteId("42".to_string()));
        assert_eq!(record.date, "");

        let item = MemoryItem::from(record);
        assert_eq!(item.id, ItemId::remote("42"));
        assert_eq!(item.caption, "sunset");
    }

    #[test]
    fn test_record_accepts_uuid_id() {
        let json = r#"{"id":"5f0c","image_url":"u","date":"","caption":"","created_at":null}"#;
        let record: MemoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.to_string(), "5f0c");
    }
}
