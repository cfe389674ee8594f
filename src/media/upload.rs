use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::encoder::{self, CONTENT_TYPE};
use crate::config::EncoderConfig;
use crate::error::UploadError;
use crate::remote::RemoteStore;
use crate::state::data::{MemoryRecord, NewMemory};

/// Photo extensions offered in the file picker
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff"];

/// Storage key for an uploaded photo: `<unix millis>-<file stem>.jpg`.
///
/// Anything in the stem outside `[A-Za-z0-9._-]` becomes `_`, so the key
/// can sit in a URL path segment unescaped.
pub fn object_key(file_name: &str, now_millis: i64) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.is_empty() { "photo".to_string() } else { stem };

    format!("{}-{}.jpg", now_millis, stem)
}

/// Read, encode and upload a photo from disk, then create its row.
///
/// Runs the CPU-bound part on a blocking thread.
pub async fn upload_photo(
    store: Arc<dyn RemoteStore>,
    path: PathBuf,
    limits: EncoderConfig,
) -> Result<MemoryRecord, UploadError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let encoded = tokio::task::spawn_blocking(move || {
        let bytes = std::fs::read(&path).map_err(|e| UploadError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        encoder::encode_for_upload(&bytes, limits)
    })
    .await
    .map_err(|e| UploadError::Join(e.to_string()))??;

    store_photo(store.as_ref(), &file_name, encoded).await
}

/// Upload already-encoded bytes and insert the row that points at them
pub async fn store_photo(
    store: &dyn RemoteStore,
    file_name: &str,
    encoded: Vec<u8>,
) -> Result<MemoryRecord, UploadError> {
    let key = object_key(file_name, Utc::now().timestamp_millis());
    let size = encoded.len();

    let public_url = store.upload_blob(&key, encoded, CONTENT_TYPE).await?;
    let record = store.insert_memory(&NewMemory::for_image(public_url)).await?;

    tracing::info!("Uploaded {} ({}KB) as memory {}", key, size / 1024, record.id);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::{Call, FakeStore};

    #[test]
    fn test_object_key_is_url_safe() {
        assert_eq!(
            object_key("Our first trip.HEIC", 1700000000000),
            "1700000000000-Our_first_trip.jpg"
        );
        assert_eq!(object_key("a\tb c.png", 1), "1-a_b_c.jpg");
        assert_eq!(object_key("", 5), "5-photo.jpg");
        assert_eq!(object_key("photo #3?.jpg", 1), "1-photo__3_.jpg");
        assert_eq!(object_key("café/été.png", 2), "2-_t_.jpg");
    }

    #[tokio::test]
    async fn test_store_photo_uploads_then_inserts() {
        let store = FakeStore::default();

        let record = store_photo(&store, "beach day.png", vec![1, 2, 3])
            .await
            .unwrap();

        let calls = store.calls();
        assert_eq!(calls.len(), 2);
        let key = match &calls[0] {
            Call::Upload(key) => key.clone(),
            other => panic!("expected upload first, got {:?}", other),
        };
        assert!(key.ends_with("-beach_day.jpg"));
        assert!(store.has_blob(&key));
        assert_eq!(
            calls[1],
            Call::Insert(NewMemory::for_image(format!(
                "https://store.test/gallery-images/{}",
                key
            )))
        );
        assert!(record.image_url.ends_with(&key));
        assert_eq!(record.date, "");
        assert_eq!(record.caption, "");
    }

    #[tokio::test]
    async fn test_failed_blob_upload_skips_insert() {
        let store = FakeStore::default();
        store.fail(|f| f.upload = true);

        let result = store_photo(&store, "a.jpg", vec![0]).await;

        assert!(matches!(result, Err(UploadError::Store(_))));
        assert!(!store.calls().iter().any(|c| matches!(c, Call::Insert(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_a_read_error() {
        let store: Arc<dyn RemoteStore> = Arc::new(FakeStore::default());
        let result = upload_photo(
            store,
            PathBuf::from("/nonexistent/photo.jpg"),
            EncoderConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(UploadError::Read { .. })));
    }
}
