/// Photo handling module
///
/// This module handles:
/// - Downscaling and recompressing photos before upload (encoder.rs)
/// - Storing the photo and creating its memory row (upload.rs)
/// - Looping background music (audio.rs)

pub mod audio;
pub mod encoder;
pub mod upload;
