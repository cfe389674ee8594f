//! memory-gallery: a commemorative photo gallery
//!
//! The gallery shows a fixed set of bundled photos plus memories kept in a
//! hosted table/blob store. Editing, uploading and deleting are gated by a
//! device-scoped unlock flag and applied optimistically.

pub mod config;
pub mod content;
pub mod error;
pub mod media;
pub mod remote;
pub mod state;

pub use config::Config;
pub use error::{GalleryError, UploadError};
pub use remote::{RemoteStore, StoreError, SupabaseStore};
pub use state::Gallery;
