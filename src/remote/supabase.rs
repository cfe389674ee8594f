/// Client for the hosted REST table API and object storage
///
/// Speaks the PostgREST dialect under `/rest/v1` and the storage API
/// under `/storage/v1`. Every request is authenticated with the anon key.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;

use super::{RemoteStore, StoreError, IMAGES_BUCKET, MEMORIES_TABLE};
use crate::state::data::{MemoryEdit, MemoryRecord, NewMemory, RemoteId};

#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStore {
    /// Build a client, or `None` when the URL is unusable.
    ///
    /// A half-filled config must not crash the app; callers fall back to
    /// showing the bundled memories only.
    pub fn connect(base_url: &str, anon_key: &str) -> Option<Self> {
        if !is_valid_url(base_url) {
            tracing::warn!("Remote store is not initialized. Check the supabase_url setting.");
            return None;
        }

        Some(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, MEMORIES_TABLE)
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, IMAGES_BUCKET, key)
    }

    /// Public URL of an object in the image bucket
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, IMAGES_BUCKET, key
        )
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Download the bytes behind a public image URL
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, StoreError> {
        let response = check(self.client.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

fn is_valid_url(url: &str) -> bool {
    url.starts_with("http")
}

/// Turn a non-success status into `StoreError::Status`, keeping the body
async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RemoteStore for SupabaseStore {
    async fn list_memories(&self) -> Result<Vec<MemoryRecord>, StoreError> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let response = check(self.authed(request).send().await?).await?;
        let records: Vec<MemoryRecord> = response.json().await?;
        tracing::debug!("Fetched {} memories", records.len());
        Ok(records)
    }

    async fn update_memory(&self, id: &RemoteId, edit: &MemoryEdit) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{}", id))])
            .json(edit);

        check(self.authed(request).send().await?).await?;
        Ok(())
    }

    async fn delete_memory(&self, id: &RemoteId) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.table_url())
            .query(&[("id", format!("eq.{}", id))]);

        check(self.authed(request).send().await?).await?;
        Ok(())
    }

    async fn delete_blob(&self, key: &str) -> Result<(), StoreError> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, IMAGES_BUCKET);
        let request = self
            .client
            .delete(url)
            .json(&json!({ "prefixes": [key] }));

        check(self.authed(request).send().await?).await?;
        Ok(())
    }

    async fn upload_blob(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let request = self
            .client
            .post(self.object_url(key))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);

        check(self.authed(request).send().await?).await?;
        Ok(self.public_url(key))
    }

    async fn insert_memory(&self, memory: &NewMemory) -> Result<MemoryRecord, StoreError> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&[memory]);

        let response = check(self.authed(request).send().await?).await?;
        let mut rows: Vec<MemoryRecord> = response.json().await?;
        if rows.is_empty() {
            return Err(StoreError::EmptyResponse);
        }
        Ok(rows.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_urls_without_scheme() {
        assert!(SupabaseStore::connect("", "key").is_none());
        assert!(SupabaseStore::connect("your-project-url", "key").is_none());
        assert!(SupabaseStore::connect("https://abc.supabase.co", "key").is_some());
    }

    #[test]
    fn test_urls_are_built_from_trimmed_base() {
        let store = SupabaseStore::connect("https://abc.supabase.co/", "key").unwrap();
        assert_eq!(store.table_url(), "https://abc.supabase.co/rest/v1/memories");
        assert_eq!(
            store.object_url("1-a.jpg"),
            "https://abc.supabase.co/storage/v1/object/gallery-images/1-a.jpg"
        );
        assert_eq!(
            store.public_url("1-a.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/gallery-images/1-a.jpg"
        );
    }

    #[test]
    fn test_object_key_survives_url_parsing() {
        use crate::media::upload::object_key;
        use crate::state::data::ImageSource;

        let store = SupabaseStore::connect("https://abc.supabase.co", "key").unwrap();
        let key = object_key("photo #3?v=1.jpg", 1);

        let upload = reqwest::Url::parse(&store.object_url(&key)).unwrap();
        assert_eq!(
            upload.path(),
            format!("/storage/v1/object/gallery-images/{}", key)
        );
        assert!(upload.query().is_none());
        assert!(upload.fragment().is_none());

        let public = store.public_url(&key);
        assert!(reqwest::Url::parse(&public).unwrap().path().ends_with(&key));
        assert_eq!(ImageSource::Url(public).blob_key(), Some(key.as_str()));
    }
}
