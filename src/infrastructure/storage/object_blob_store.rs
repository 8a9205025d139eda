use std::path::PathBuf;
use std::sync::Arc;

use futures::TryStreamExt;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::{Namespace, ObjectKey};

/// [`BlobStore`] over any `object_store` backend, one key prefix per namespace.
pub struct ObjectBlobStore {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectBlobStore {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self { inner }
    }

    pub fn local(base_path: PathBuf) -> Result<Self, BlobStoreError> {
        std::fs::create_dir_all(&base_path).map_err(BlobStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(fs)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }

    pub fn azure(account: &str, access_key: &str, container: &str) -> Result<Self, BlobStoreError> {
        let store = MicrosoftAzureBuilder::new()
            .with_account(account)
            .with_access_key(access_key)
            .with_container_name(container)
            .build()
            .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(store)))
    }

    pub fn gcs(bucket: &str, service_account_path: Option<&str>) -> Result<Self, BlobStoreError> {
        let mut builder = GoogleCloudStorageBuilder::new().with_bucket_name(bucket);
        if let Some(path) = service_account_path {
            builder = builder.with_service_account_path(path);
        }
        let store = builder
            .build()
            .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(store)))
    }
}

fn store_path(namespace: Namespace, id: &str) -> StorePath {
    StorePath::from(ObjectKey::new(namespace, id).as_str())
}

#[async_trait::async_trait]
impl BlobStore for ObjectBlobStore {
    async fn put(
        &self,
        namespace: Namespace,
        id: &str,
        data: Vec<u8>,
    ) -> Result<(), BlobStoreError> {
        let path = store_path(namespace, id);
        let size = data.len();
        self.inner
            .put(&path, PutPayload::from(data))
            .await
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;
        tracing::debug!(path = %path, bytes = size, "Blob stored");
        Ok(())
    }

    async fn get(
        &self,
        namespace: Namespace,
        id: &str,
    ) -> Result<Option<Vec<u8>>, BlobStoreError> {
        let path = store_path(namespace, id);
        let result = match self.inner.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                tracing::debug!(path = %path, "Blob not found");
                return Ok(None);
            }
            Err(e) => return Err(BlobStoreError::DownloadFailed(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::DownloadFailed(e.to_string()))?;

        Ok(Some(bytes.to_vec()))
    }

    async fn list(&self, namespace: Namespace) -> Result<Vec<String>, BlobStoreError> {
        let prefix = StorePath::from(ObjectKey::prefix(namespace).as_str());
        let metas: Vec<_> = self
            .inner
            .list(Some(&prefix))
            .try_collect()
            .await
            .map_err(|e| BlobStoreError::ListFailed(e.to_string()))?;

        Ok(metas
            .into_iter()
            .filter_map(|meta| meta.location.filename().map(str::to_string))
            .collect())
    }

    async fn delete(&self, namespace: Namespace, id: &str) -> Result<(), BlobStoreError> {
        let path = store_path(namespace, id);
        match self.inner.delete(&path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(BlobStoreError::DeleteFailed(e.to_string())),
        }
    }
}
