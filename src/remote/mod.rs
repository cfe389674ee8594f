/// Remote store access
///
/// This module handles everything that talks to the hosted backend:
/// - The `RemoteStore` trait the gallery core is written against
/// - The REST + object storage client (supabase.rs)
/// - An in-memory store for tests (fake.rs)

pub mod supabase;
#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use thiserror::Error;

use crate::state::data::{MemoryEdit, MemoryRecord, NewMemory, RemoteId};

pub use supabase::SupabaseStore;

/// Table holding one row per memory
pub const MEMORIES_TABLE: &str = "memories";
/// Bucket holding the uploaded pictures
pub const IMAGES_BUCKET: &str = "gallery-images";

/// Failure reported by the remote store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No usable backend URL was configured
    #[error("remote store is not configured")]
    NotConfigured,

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status
    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape
    #[error("decode error: {0}")]
    Decode(String),

    /// An insert returned no row
    #[error("store returned no rows")]
    EmptyResponse,
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Http(err.to_string())
        }
    }
}

/// Operations the gallery needs from the hosted backend.
///
/// Table operations address the `memories` table, blob operations the
/// `gallery-images` bucket.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All memories, newest first by creation time
    async fn list_memories(&self) -> Result<Vec<MemoryRecord>, StoreError>;

    /// Overwrite `date` and `caption` of one row
    async fn update_memory(&self, id: &RemoteId, edit: &MemoryEdit) -> Result<(), StoreError>;

    async fn delete_memory(&self, id: &RemoteId) -> Result<(), StoreError>;

    /// Remove an object from the image bucket
    async fn delete_blob(&self, key: &str) -> Result<(), StoreError>;

    /// Store an object in the image bucket and return its public URL
    async fn upload_blob(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;

    /// Insert a row and return it as stored
    async fn insert_memory(&self, memory: &NewMemory) -> Result<MemoryRecord, StoreError>;
}
