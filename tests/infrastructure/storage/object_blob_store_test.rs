use deviation_analyzer::application::ports::BlobStore;
use deviation_analyzer::domain::Namespace;
use deviation_analyzer::infrastructure::storage::ObjectBlobStore;

fn create_test_store() -> (tempfile::TempDir, ObjectBlobStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = ObjectBlobStore::local(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_stored_blob_when_fetching_then_bytes_match_upload() {
    let (_dir, store) = create_test_store();

    store
        .put(Namespace::Images, "a1", b"jpeg bytes".to_vec())
        .await
        .unwrap();

    let fetched = store.get(Namespace::Images, "a1").await.unwrap();
    assert_eq!(fetched.as_deref(), Some(&b"jpeg bytes"[..]));
}

#[tokio::test]
async fn given_stored_blob_when_inspecting_disk_then_lives_under_namespace_folder() {
    let (dir, store) = create_test_store();

    store
        .put(Namespace::Recordings, "r1", b"mp3".to_vec())
        .await
        .unwrap();

    assert!(dir.path().join("recordings").join("r1").exists());
}

#[tokio::test]
async fn given_missing_blob_when_fetching_then_returns_none() {
    let (_dir, store) = create_test_store();

    let fetched = store.get(Namespace::Deviations, "nope").await.unwrap();

    assert!(fetched.is_none());
}

#[tokio::test]
async fn given_existing_blob_when_putting_again_then_content_is_replaced() {
    let (_dir, store) = create_test_store();

    store
        .put(Namespace::Deviations, "d1", b"first".to_vec())
        .await
        .unwrap();
    store
        .put(Namespace::Deviations, "d1", b"second".to_vec())
        .await
        .unwrap();

    let fetched = store.get(Namespace::Deviations, "d1").await.unwrap();
    assert_eq!(fetched.as_deref(), Some(&b"second"[..]));
}

#[tokio::test]
async fn given_blobs_in_several_namespaces_when_listing_then_only_that_namespace_is_returned() {
    let (_dir, store) = create_test_store();
    store
        .put(Namespace::Deviations, "d1", b"{}".to_vec())
        .await
        .unwrap();
    store
        .put(Namespace::Deviations, "d1-analysis", b"{}".to_vec())
        .await
        .unwrap();
    store
        .put(Namespace::Images, "i1", b"jpeg".to_vec())
        .await
        .unwrap();

    let mut ids = store.list(Namespace::Deviations).await.unwrap();
    ids.sort();

    assert_eq!(ids, vec!["d1".to_string(), "d1-analysis".to_string()]);
}

#[tokio::test]
async fn given_empty_namespace_when_listing_then_returns_empty() {
    let (_dir, store) = create_test_store();

    let ids = store.list(Namespace::Recordings).await.unwrap();

    assert!(ids.is_empty());
}

#[tokio::test]
async fn given_stored_blob_when_deleting_then_fetch_returns_none() {
    let (_dir, store) = create_test_store();
    store
        .put(Namespace::Images, "i1", b"jpeg".to_vec())
        .await
        .unwrap();

    store.delete(Namespace::Images, "i1").await.unwrap();

    assert!(store.get(Namespace::Images, "i1").await.unwrap().is_none());
}

#[tokio::test]
async fn given_missing_blob_when_deleting_then_succeeds() {
    let (_dir, store) = create_test_store();

    assert!(store.delete(Namespace::Images, "ghost").await.is_ok());
}

#[tokio::test]
async fn given_in_memory_store_when_round_tripping_then_behaves_like_disk() {
    let store = ObjectBlobStore::in_memory();

    store
        .put(Namespace::Images, "i1", b"jpeg".to_vec())
        .await
        .unwrap();

    assert_eq!(store.list(Namespace::Images).await.unwrap(), vec!["i1"]);
    assert!(store.get(Namespace::Recordings, "i1").await.unwrap().is_none());
}
