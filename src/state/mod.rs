/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The gallery list and its optimistic mutations (gallery.rs)
/// - Device-scoped settings such as the unlock flag (device.rs)

pub mod data;
pub mod device;
pub mod gallery;

pub use data::{ImageSource, ItemId, MemoryEdit, MemoryItem, MemoryRecord, NewMemory, RemoteId};
pub use gallery::{Gallery, PendingDelete, PendingUpdate, Settled};
