use std::fs;

use educomic_engine::{ensure_artifact_dir, export_filename, ArtifactStore, ComicArtifact};
use tempfile::TempDir;

fn png_artifact() -> ComicArtifact {
    ComicArtifact {
        bytes: b"\x89PNG\r\n\x1a\nstub-panels".to_vec(),
        content_type: "image/png".to_string(),
    }
}

#[test]
fn creates_missing_artifact_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("strips");
    assert!(!new_dir.exists());
    ensure_artifact_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn materialized_file_lives_until_the_handle_drops() {
    let temp = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp.path().to_path_buf());
    let artifact = png_artifact();

    let handle = store
        .materialize(Some("Photosynthesis"), &artifact.bytes, &artifact.content_type)
        .unwrap();
    let path = handle.path().to_path_buf();
    assert_eq!(fs::read(&path).unwrap(), artifact.bytes);
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("educomic-Photosynthesis--"));
    assert!(name.ends_with(".png"));

    drop(handle);
    assert!(!path.exists());
}

#[test]
fn keep_retains_the_file_for_export() {
    let temp = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp.path().to_path_buf());
    let artifact = png_artifact();

    let path = store
        .materialize(None, &artifact.bytes, &artifact.content_type)
        .unwrap()
        .keep();
    assert!(path.exists());
    assert_eq!(fs::read(&path).unwrap(), artifact.bytes);
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("educomic-untitled--"));
}

#[test]
fn rematerializing_replaces_a_kept_file_at_the_same_path() {
    let temp = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp.path().to_path_buf());
    let artifact = png_artifact();

    let kept = store
        .materialize(Some("Photosynthesis"), &artifact.bytes, &artifact.content_type)
        .unwrap()
        .keep();
    let replacement = store
        .materialize(Some("Photosynthesis"), &artifact.bytes, &artifact.content_type)
        .unwrap();
    assert_eq!(replacement.path(), kept);
    assert_eq!(fs::read(replacement.path()).unwrap(), artifact.bytes);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let store = ArtifactStore::new(blocker.clone());
    assert!(store
        .materialize(Some("Photosynthesis"), &png_artifact().bytes, "image/png")
        .is_err());
    assert!(blocker.is_file());
}

#[test]
fn export_names_are_deterministic_and_windows_safe() {
    let named = export_filename(Some("My: Comic?/Strip"), b"payload", "image/png");
    assert_eq!(
        named,
        export_filename(Some("My: Comic?/Strip"), b"payload", "image/png")
    );
    assert!(named.starts_with("educomic-My_ Comic_Strip--"));
    assert!(named.ends_with(".png"));

    let jpeg = export_filename(None, b"payload", "image/jpeg; charset=binary");
    assert!(jpeg.starts_with("educomic-untitled--"));
    assert!(jpeg.ends_with(".jpg"));

    let reserved = export_filename(Some("CON"), b"payload", "image/png");
    assert!(reserved.starts_with("educomic-CON_--"));

    let first = export_filename(Some("Photosynthesis"), b"one", "image/png");
    let second = export_filename(Some("Photosynthesis"), b"two", "image/png");
    assert_ne!(first, second);
}
