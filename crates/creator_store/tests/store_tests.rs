//! Integration tests for creator_store backends

use creator_scene::{
    CodecError, MaterialMode, ParseError, Rgb, SceneRecord, SelectionShape, Shading, Substance,
    MAX_NAME_BYTES, OPAQUE,
};
use creator_store::*;

fn sample_records() -> Vec<SceneRecord> {
    vec![
        SceneRecord::new("Default"),
        SceneRecord::new("fluid harbour")
            .with_shape(SelectionShape::CircleXz)
            .with_material(MaterialMode::new(Substance::Fluid, Shading::Noise))
            .with_color(Rgb::new(0, 128, 255).with_alpha(200))
            .with_grid(false),
        SceneRecord::new("transparent")
            .with_shape(SelectionShape::SquareYz)
            .with_color(Rgb::new(255, 255, 255).with_alpha(0)),
    ]
}

async fn check_round_trip<S: SceneStore>(store: &S) {
    for record in sample_records() {
        store.put(&record).await.unwrap();
        let loaded = store.get(&record.name).await.unwrap();
        assert_eq!(loaded, record);
    }
}

async fn check_upsert<S: SceneStore>(store: &S) {
    store.put(&SceneRecord::new("dup")).await.unwrap();
    store
        .put(&SceneRecord::new("dup").with_grid(false))
        .await
        .unwrap();

    let names = store.list_names().await.unwrap();
    assert_eq!(names.iter().filter(|n| n.as_str() == "dup").count(), 1);
    assert!(!store.get("dup").await.unwrap().grid_visible);
}

async fn check_idempotent_delete<S: SceneStore>(store: &S) {
    store.put(&SceneRecord::new("gone")).await.unwrap();

    store.delete("gone").await.unwrap();
    store.delete("gone").await.unwrap();
    store.delete("never existed").await.unwrap();

    assert!(store.get("gone").await.unwrap_err().is_not_found());
}

async fn check_list_names<S: SceneStore>(store: &S) {
    assert!(store.list_names().await.unwrap().is_empty());

    for name in ["b", "a", "c"] {
        store.put(&SceneRecord::new(name)).await.unwrap();
    }

    let mut names = store.list_names().await.unwrap();
    names.sort();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_memory_round_trip() {
    check_round_trip(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_upsert() {
    check_upsert(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_idempotent_delete() {
    check_idempotent_delete(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_list_names() {
    check_list_names(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_legacy_record_defaults_alpha() {
    let store = MemoryStore::new();
    store.insert_raw(
        "legacy",
        r#"{"name":"legacy","selection_shape":"sphere",
            "material_mode":{"substance":"solid","shading":"smooth"},
            "color":{"r":1,"g":2,"b":3},"grid_visible":false}"#,
    );

    let record = store.get("legacy").await.unwrap();
    assert_eq!(record.alpha, OPAQUE);
    assert_eq!(record.color, Rgb::new(1, 2, 3));
}

#[tokio::test]
async fn test_shared_store_through_rc() {
    let store = std::rc::Rc::new(MemoryStore::new());
    let handle = store.clone();

    handle.put(&SceneRecord::new("shared")).await.unwrap();
    assert!(store.contains("shared"));
}

#[tokio::test]
async fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    check_round_trip(&FileStore::new(dir.path().join("scenes"))).await;
}

#[tokio::test]
async fn test_file_upsert() {
    let dir = tempfile::tempdir().unwrap();
    check_upsert(&FileStore::new(dir.path())).await;
}

#[tokio::test]
async fn test_file_idempotent_delete() {
    let dir = tempfile::tempdir().unwrap();
    check_idempotent_delete(&FileStore::new(dir.path())).await;
}

#[tokio::test]
async fn test_file_list_names() {
    let dir = tempfile::tempdir().unwrap();
    check_list_names(&FileStore::new(dir.path().join("not yet created"))).await;
}

#[tokio::test]
async fn test_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let record = sample_records().remove(1);

    FileStore::new(dir.path()).put(&record).await.unwrap();

    let reopened = FileStore::new(dir.path());
    assert_eq!(reopened.list_names().await.unwrap(), vec![record.name.clone()]);
    assert_eq!(reopened.get(&record.name).await.unwrap(), record);
}

#[tokio::test]
async fn test_file_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.put(&SceneRecord::new("clean")).await.unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with(".json"));
}

#[tokio::test]
async fn test_file_ignores_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("README.txt"), "not a scene").unwrap();

    let store = FileStore::new(dir.path());
    store.put(&SceneRecord::new("real")).await.unwrap();

    assert_eq!(store.list_names().await.unwrap(), vec!["real".to_string()]);
}

#[tokio::test]
async fn test_file_corrupt_record_is_codec_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.put(&SceneRecord::new("broken")).await.unwrap();

    let path = std::fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap().path();
    std::fs::write(path, "{ truncated").unwrap();

    assert!(matches!(store.get("broken").await, Err(StoreError::Codec(_))));
}

async fn check_name_limits<S: SceneStore>(store: &S) {
    let longest = SceneRecord::new("n".repeat(MAX_NAME_BYTES));
    store.put(&longest).await.unwrap();
    assert_eq!(store.get(&longest.name).await.unwrap(), longest);

    let too_long = SceneRecord::new("n".repeat(200));
    assert!(matches!(
        store.put(&too_long).await,
        Err(StoreError::InvalidName(ParseError::NameTooLong { len: 200, .. }))
    ));
    assert!(matches!(
        store.put(&SceneRecord::new("  ")).await,
        Err(StoreError::InvalidName(ParseError::EmptyName))
    ));
    assert_eq!(store.list_names().await.unwrap(), vec![longest.name]);
}

#[tokio::test]
async fn test_memory_name_limits() {
    check_name_limits(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_file_name_limits() {
    let dir = tempfile::tempdir().unwrap();
    check_name_limits(&FileStore::new(dir.path())).await;
}

#[tokio::test]
async fn test_memory_quota_keeps_previous_record() {
    let record = SceneRecord::new("small");
    let store = MemoryStore::new().with_quota(256);
    store.put(&record).await.unwrap();

    let err = store
        .put(&SceneRecord::new("n".repeat(MAX_NAME_BYTES)))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Backend(_)));
    assert_eq!(store.list_names().await.unwrap(), vec!["small".to_string()]);
    assert_eq!(store.get("small").await.unwrap(), record);
}

#[tokio::test]
async fn test_memory_record_under_wrong_key() {
    let store = MemoryStore::new();
    store.insert_raw(
        "copy",
        r#"{"name":"original","selection_shape":"sphere",
            "material_mode":{"substance":"solid","shading":"smooth"},
            "color":{"r":1,"g":2,"b":3},"grid_visible":true}"#,
    );

    assert!(matches!(
        store.get("copy").await,
        Err(StoreError::Codec(CodecError::Malformed(_)))
    ));
}

#[tokio::test]
async fn test_file_copied_record_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.put(&SceneRecord::new("original")).await.unwrap();
    store.put(&SceneRecord::new("copy")).await.unwrap();

    // Overwrite the "copy" file with the contents of "original"
    let mut paths: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    let contents: Vec<_> = paths.iter().map(|p| std::fs::read(p).unwrap()).collect();
    let copy = contents
        .iter()
        .position(|c| String::from_utf8_lossy(c).contains("\"copy\""))
        .unwrap();
    let original = 1 - copy;
    std::fs::write(&paths[copy], &contents[original]).unwrap();

    assert!(matches!(
        store.get("copy").await,
        Err(StoreError::Codec(CodecError::Malformed(_)))
    ));
    assert_eq!(store.get("original").await.unwrap().name, "original");
}
