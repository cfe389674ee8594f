use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::config::EncoderConfig;
use crate::error::UploadError;

/// Content type of everything the encoder produces
pub const CONTENT_TYPE: &str = "image/jpeg";

/// Shrink and recompress a photo before upload.
///
/// The longest edge is capped at `limits.max_dimension` (aspect ratio kept,
/// never upscaled) and the result is always a JPEG at `limits.jpeg_quality`.
pub fn encode_for_upload(bytes: &[u8], limits: EncoderConfig) -> Result<Vec<u8>, UploadError> {
    let img = image::load_from_memory(bytes).map_err(|e| UploadError::Decode(e.to_string()))?;

    let (width, height) = img.dimensions();
    let max = limits.max_dimension.max(1);
    let img = if width > max || height > max {
        img.resize(max, max, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, limits.jpeg_quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| UploadError::Encode(e.to_string()))?;

    tracing::debug!(
        "Encoded {}x{} photo: {}KB -> {}KB",
        width,
        height,
        bytes.len() / 1024,
        out.len() / 1024
    );
    Ok(out)
}
