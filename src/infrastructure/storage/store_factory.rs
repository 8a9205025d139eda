use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_blob_store::ObjectBlobStore;

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BlobStoreError> {
        tracing::info!(provider = ?settings.provider, "Creating blob store");
        match settings.provider {
            StorageProviderSetting::Local => {
                let store = ObjectBlobStore::local(PathBuf::from(&settings.local_path))?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Memory => Ok(Arc::new(ObjectBlobStore::in_memory())),
            StorageProviderSetting::Azure => {
                let account = settings.azure_account.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_account required".into())
                })?;
                let key = settings.azure_access_key.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_access_key required".into())
                })?;
                let container = settings.azure_container.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_container required".into())
                })?;
                let store = ObjectBlobStore::azure(account, key, container)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Gcs => {
                let bucket = settings.gcs_bucket.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("gcs_bucket required".into())
                })?;
                let store =
                    ObjectBlobStore::gcs(bucket, settings.gcs_service_account_path.as_deref())?;
                Ok(Arc::new(store))
            }
        }
    }
}
