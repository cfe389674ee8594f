/// In-memory remote store for tests
///
/// Rows and blobs live behind a mutex. Each operation can be switched to
/// fail, and every call is appended to a log so tests can assert exactly
/// which requests reached the "network".

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use super::{RemoteStore, StoreError};
use crate::state::data::{MemoryEdit, MemoryRecord, NewMemory, RemoteId};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Update(RemoteId, MemoryEdit),
    Delete(RemoteId),
    DeleteBlob(String),
    Upload(String),
    Insert(NewMemory),
}

#[derive(Debug, Default)]
pub struct Failures {
    pub list: bool,
    pub update: bool,
    pub delete: bool,
    pub delete_blob: bool,
    pub upload: bool,
    pub insert: bool,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<MemoryRecord>,
    blobs: HashMap<String, Vec<u8>>,
    next_id: i64,
    calls: Vec<Call>,
    fail: Failures,
}

#[derive(Debug, Default)]
pub struct FakeStore {
    inner: Mutex<Inner>,
}

fn unavailable() -> StoreError {
    StoreError::Status {
        status: 503,
        body: "unavailable".to_string(),
    }
}

/// A record as the store would return it; `n` also orders `created_at`
pub fn record(id: &str, n: i64) -> MemoryRecord {
    MemoryRecord {
        id: RemoteId(id.to_string()),
        image_url: format!("https://store.test/gallery-images/{}.jpg", id),
        date: String::new(),
        caption: String::new(),
        created_at: Utc.timestamp_opt(1_700_000_000 + n, 0).single(),
    }
}

impl FakeStore {
    pub fn with_rows(rows: Vec<MemoryRecord>) -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            inner.next_id = rows.len() as i64 + 1;
            inner.rows = rows;
        }
        store
    }

    pub fn fail(&self, configure: impl FnOnce(&mut Failures)) {
        configure(&mut self.inner.lock().unwrap().fail);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn rows(&self) -> Vec<MemoryRecord> {
        self.inner.lock().unwrap().rows.clone()
    }

    pub fn put_blob(&self, key: &str) {
        self.inner
            .lock()
            .unwrap()
            .blobs
            .insert(key.to_string(), Vec::new());
    }

    pub fn has_blob(&self, key: &str) -> bool {
        self.inner.lock().unwrap().blobs.contains_key(key)
    }
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn list_memories(&self) -> Result<Vec<MemoryRecord>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::List);
        if inner.fail.list {
            return Err(StoreError::Http("connection refused".to_string()));
        }
        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_memory(&self, id: &RemoteId, edit: &MemoryEdit) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Update(id.clone(), edit.clone()));
        if inner.fail.update {
            return Err(unavailable());
        }
        if let Some(row) = inner.rows.iter_mut().find(|r| &r.id == id) {
            row.date = edit.date.clone();
            row.caption = edit.caption.clone();
        }
        Ok(())
    }

    async fn delete_memory(&self, id: &RemoteId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(id.clone()));
        if inner.fail.delete {
            return Err(unavailable());
        }
        inner.rows.retain(|r| &r.id != id);
        Ok(())
    }

    async fn delete_blob(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::DeleteBlob(key.to_string()));
        if inner.fail.delete_blob {
            return Err(unavailable());
        }
        inner.blobs.remove(key);
        Ok(())
    }

    async fn upload_blob(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Upload(key.to_string()));
        if inner.fail.upload {
            return Err(unavailable());
        }
        inner.blobs.insert(key.to_string(), bytes);
        Ok(format!("https://store.test/gallery-images/{}", key))
    }

    async fn insert_memory(&self, memory: &NewMemory) -> Result<MemoryRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Insert(memory.clone()));
        if inner.fail.insert {
            return Err(unavailable());
        }
        let n = inner.next_id;
        inner.next_id += 1;
        let row = MemoryRecord {
            id: RemoteId(n.to_string()),
            image_url: memory.image_url.clone(),
            date: memory.date.clone(),
            caption: memory.caption.clone(),
            created_at: Utc.timestamp_opt(1_800_000_000 + n, 0).single(),
        };
        inner.rows.push(row.clone());
        Ok(row)
    }
}
