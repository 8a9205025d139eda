use async_trait::async_trait;

use crate::domain::Namespace;

/// Id-addressed blob storage, partitioned by namespace.
///
/// Each call is atomic for its single key; there are no multi-key transactions.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(
        &self,
        namespace: Namespace,
        id: &str,
        data: Vec<u8>,
    ) -> Result<(), BlobStoreError>;

    async fn get(
        &self,
        namespace: Namespace,
        id: &str,
    ) -> Result<Option<Vec<u8>>, BlobStoreError>;

    async fn list(&self, namespace: Namespace) -> Result<Vec<String>, BlobStoreError>;

    async fn delete(&self, namespace: Namespace, id: &str) -> Result<(), BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("configuration invalid: {0}")]
    Configuration(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("list failed: {0}")]
    ListFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
