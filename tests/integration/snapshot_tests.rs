use super::common::{ids, mixed_org};
use metadeps::config::SourceSelection;
use metadeps::source::open_source;
use metadeps::{DependencyResolver, MetadataError, SnapshotSource};
use std::io::Write;
use tempfile::NamedTempFile;

fn snapshot_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let json = serde_json::to_string_pretty(&mixed_org()).unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn resolves_from_a_snapshot_file() {
    let file = snapshot_file();
    let source = SnapshotSource::from_path(file.path()).await.unwrap();
    let mut resolver = DependencyResolver::new(source);

    resolver.describe().await.unwrap();
    let found = resolver.usage("CustomField", "F", true).await.unwrap();
    assert_eq!(ids(&found), vec!["F", "A1", "A2", "P"]);
}

#[tokio::test]
async fn open_source_boxes_the_snapshot() {
    let file = snapshot_file();
    let source = open_source(&SourceSelection::Snapshot(file.path().to_path_buf()), "61.0")
        .await
        .unwrap();
    let mut resolver = DependencyResolver::new(source);

    let types = resolver.describe().await.unwrap();
    assert_eq!(types, vec!["ApexClass", "ApexPage", "CustomField"]);
}

#[tokio::test]
async fn malformed_snapshot_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{\"types\": 42}").unwrap();

    let err = SnapshotSource::from_path(file.path()).await.unwrap_err();
    assert!(matches!(err, MetadataError::Snapshot { .. }));
}
