//! Error types for the gallery, uploads, config, device settings and audio

use std::fmt;
use thiserror::Error;

use crate::remote::StoreError;

/// Which mutation a remote failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Update,
    Delete,
}

impl fmt::Display for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationOp::Update => f.write_str("update"),
            MutationOp::Delete => f.write_str("delete"),
        }
    }
}

/// Gallery error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalleryError {
    /// The store could not be reached when loading the gallery
    #[error("Connection error: {0}")]
    Connection(StoreError),

    /// The store rejected an edit or delete that was already applied locally
    #[error("Failed to {op} memory: {source}")]
    Mutation {
        op: MutationOp,
        #[source]
        source: StoreError,
    },
}

/// Upload error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Unsupported or corrupt image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Upload failed: {0}")]
    Store(#[from] StoreError),

    #[error("Task join error: {0}")]
    Join(String),
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Device settings error type
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Could not determine user data directory")]
    NoDataDir,
}

/// Audio playback error type
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No audio output: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("Failed to start playback: {0}")]
    Play(#[from] rodio::PlayError),

    #[error("Unsupported audio file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("Track has nothing left to play")]
    Empty,
}
