use deviation_analyzer::application::ports::BlobStoreError;
use deviation_analyzer::domain::Namespace;
use deviation_analyzer::infrastructure::storage::BlobStoreFactory;
use deviation_analyzer::presentation::config::{StorageProviderSetting, StorageSettings};

#[tokio::test]
async fn given_local_settings_when_creating_then_store_writes_under_configured_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let settings = StorageSettings {
        local_path: dir.path().join("data").to_string_lossy().to_string(),
        ..Default::default()
    };

    let store = BlobStoreFactory::create(&settings).unwrap();
    store
        .put(Namespace::Images, "i1", b"jpeg".to_vec())
        .await
        .unwrap();

    assert!(dir.path().join("data").join("images").join("i1").exists());
}

#[test]
fn given_memory_settings_when_creating_then_succeeds() {
    let settings = StorageSettings {
        provider: StorageProviderSetting::Memory,
        ..Default::default()
    };

    assert!(BlobStoreFactory::create(&settings).is_ok());
}

#[test]
fn given_azure_without_account_when_creating_then_configuration_error() {
    let settings = StorageSettings {
        provider: StorageProviderSetting::Azure,
        ..Default::default()
    };

    assert!(matches!(
        BlobStoreFactory::create(&settings),
        Err(BlobStoreError::Configuration(_))
    ));
}

#[test]
fn given_gcs_without_bucket_when_creating_then_configuration_error() {
    let settings = StorageSettings {
        provider: StorageProviderSetting::Gcs,
        ..Default::default()
    };

    assert!(matches!(
        BlobStoreFactory::create(&settings),
        Err(BlobStoreError::Configuration(_))
    ));
}
