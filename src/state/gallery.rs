use std::collections::HashMap;

use super::data::{ImageSource, ItemId, MemoryEdit, MemoryItem, MemoryRecord, RemoteId};
use crate::error::{GalleryError, MutationOp};
use crate::remote::{RemoteStore, StoreError};

/// Prompt shown before a memory is deleted
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this memory forever?";

/// The Gallery owns the list of displayed memories.
///
/// Items are the remote memories (newest first) followed by the bundled
/// seed memories in their fixed order. Edits and deletes are applied to the
/// local list immediately; the remote outcome arrives later through
/// [`Gallery::settle`] and never rolls the local change back.
#[derive(Debug)]
pub struct Gallery {
    seed: Vec<MemoryItem>,
    items: Vec<MemoryItem>,
    selected: Option<MemoryItem>,
    connection_error: Option<StoreError>,
    alert: Option<GalleryError>,
    /// Latest local write version per remote id
    versions: HashMap<RemoteId, u64>,
}

/// Remote half of an edit, produced by [`Gallery::update`]
#[derive(Debug, Clone)]
pub struct PendingUpdate {
    id: RemoteId,
    edit: MemoryEdit,
    version: u64,
}

/// Remote half of a delete, produced by [`Gallery::delete`]
#[derive(Debug, Clone)]
pub struct PendingDelete {
    id: RemoteId,
    blob_key: Option<String>,
}

/// Outcome of a remote mutation, fed back into [`Gallery::settle`]
#[derive(Debug, Clone)]
pub enum Settled {
    Updated {
        id: RemoteId,
        version: u64,
        result: Result<(), StoreError>,
    },
    Deleted {
        id: RemoteId,
        result: Result<(), StoreError>,
    },
}

impl PendingUpdate {
    pub async fn run(self, store: &dyn RemoteStore) -> Settled {
        let result = store.update_memory(&self.id, &self.edit).await;
        Settled::Updated {
            id: self.id,
            version: self.version,
            result,
        }
    }
}

impl PendingDelete {
    /// Delete the row, then the picture behind it.
    ///
    /// The picture is only touched once the row is gone. A failure there is
    /// logged and dropped since nothing references the blob anymore.
    pub async fn run(self, store: &dyn RemoteStore) -> Settled {
        let result = store.delete_memory(&self.id).await;

        if result.is_ok() {
            if let Some(key) = &self.blob_key {
                if let Err(e) = store.delete_blob(key).await {
                    tracing::warn!("Failed to delete image {} from storage: {}", key, e);
                }
            }
        }

        Settled::Deleted {
            id: self.id,
            result,
        }
    }
}

impl Gallery {
    /// Create a gallery showing only the bundled seed memories
    pub fn new(seed: Vec<MemoryItem>) -> Self {
        Self {
            items: seed.clone(),
            seed,
            selected: None,
            connection_error: None,
            alert: None,
            versions: HashMap::new(),
        }
    }

    pub fn items(&self) -> &[MemoryItem] {
        &self.items
    }

    /// The bundled memories, in seed order
    pub fn seed(&self) -> &[MemoryItem] {
        &self.seed
    }

    pub fn selected(&self) -> Option<&MemoryItem> {
        self.selected.as_ref()
    }

    /// Set when the initial fetch failed; the seed stays browsable
    pub fn connection_error(&self) -> Option<&StoreError> {
        self.connection_error.as_ref()
    }

    /// Hand the pending mutation failure to the UI, once
    pub fn take_alert(&mut self) -> Option<GalleryError> {
        self.alert.take()
    }

    /// Fetch remote memories once and merge them in front of the seed
    pub async fn load_remote(&mut self, store: &dyn RemoteStore) -> Result<(), GalleryError> {
        let fetched = store.list_memories().await;
        self.apply_remote(fetched)
    }

    /// Merge the result of a `list_memories` call.
    ///
    /// On success `items` becomes `remote ++ seed`. On failure `items` is
    /// left alone and the connection error is recorded.
    pub fn apply_remote(
        &mut self,
        fetched: Result<Vec<MemoryRecord>, StoreError>,
    ) -> Result<(), GalleryError> {
        match fetched {
            Ok(records) => {
                tracing::info!("Loaded {} remote memories", records.len());
                let mut items: Vec<MemoryItem> =
                    records.into_iter().map(MemoryItem::from).collect();
                items.extend(self.seed.iter().cloned());
                self.items = items;
                self.connection_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load memories: {}", e);
                self.connection_error = Some(e.clone());
                Err(GalleryError::Connection(e))
            }
        }
    }

    /// No store to fetch from; only the seed is browsable
    pub fn mark_offline(&mut self, reason: StoreError) {
        tracing::warn!("Showing bundled memories only: {}", reason);
        self.connection_error = Some(reason);
    }

    /// Open the detail view for an item
    pub fn select(&mut self, id: &ItemId) {
        self.selected = self.items.iter().find(|item| &item.id == id).cloned();
    }

    /// Close the detail view
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Apply an edit locally and return the remote write, if any.
    ///
    /// Without the capability this is a no-op. Local ids never produce
    /// remote work.
    pub fn update(
        &mut self,
        id: &ItemId,
        edit: MemoryEdit,
        unlocked: bool,
    ) -> Option<PendingUpdate> {
        if !unlocked {
            tracing::debug!("Ignoring update of {} while locked", id);
            return None;
        }

        for item in self.items.iter_mut().filter(|item| &item.id == id) {
            item.apply(&edit);
        }
        if let Some(selected) = self.selected.as_mut().filter(|s| &s.id == id) {
            selected.apply(&edit);
        }

        match id {
            ItemId::Remote(remote_id) => {
                let version = self.versions.entry(remote_id.clone()).or_insert(0);
                *version += 1;
                Some(PendingUpdate {
                    id: remote_id.clone(),
                    edit,
                    version: *version,
                })
            }
            ItemId::Local(_) => None,
        }
    }

    /// Remove an item locally and return the remote delete, if any.
    ///
    /// `confirm` is asked first and must answer yes; declining leaves
    /// everything untouched. The selection is always cleared.
    pub fn delete<F>(
        &mut self,
        id: &ItemId,
        image: &ImageSource,
        unlocked: bool,
        confirm: F,
    ) -> Option<PendingDelete>
    where
        F: FnOnce(&str) -> bool,
    {
        if !unlocked {
            tracing::debug!("Ignoring delete of {} while locked", id);
            return None;
        }
        if !confirm(DELETE_PROMPT) {
            tracing::debug!("Delete of {} cancelled", id);
            return None;
        }

        self.items.retain(|item| &item.id != id);
        self.selected = None;

        match id {
            ItemId::Remote(remote_id) => {
                self.versions.remove(remote_id);
                Some(PendingDelete {
                    id: remote_id.clone(),
                    blob_key: image.blob_key().map(str::to_string),
                })
            }
            ItemId::Local(_) => None,
        }
    }

    /// A new memory was created remotely; show it first
    pub fn on_upload_success(&mut self, record: MemoryRecord) {
        tracing::info!("Added memory {}", record.id);
        self.items.insert(0, MemoryItem::from(record));
    }

    /// Record the remote outcome of an earlier mutation.
    ///
    /// Failures raise an alert. Local state keeps the optimistic value.
    pub fn settle(&mut self, settled: Settled) {
        match settled {
            Settled::Updated {
                id,
                version,
                result,
            } => {
                let latest = self.versions.get(&id).copied().unwrap_or(0);
                if version < latest {
                    tracing::debug!(
                        "Stale confirmation for memory {} (version {} < {})",
                        id,
                        version,
                        latest
                    );
                }
                if let Err(e) = result {
                    self.raise(MutationOp::Update, &id, e);
                }
            }
            Settled::Deleted { id, result } => {
                if let Err(e) = result {
                    self.raise(MutationOp::Delete, &id, e);
                }
            }
        }
    }

    fn raise(&mut self, op: MutationOp, id: &RemoteId, source: StoreError) {
        tracing::error!("Failed to {} memory {}: {}", op, id, source);
        self.alert = Some(GalleryError::Mutation { op, source });
    }
}
