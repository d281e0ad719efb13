use super::*;
use chrono::TimeZone;

fn scratch(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_archive")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn fixed_now() -> chrono::DateTime<chrono::Local> {
    chrono::Local
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap()
}

#[test]
fn safe_title_replaces_and_truncates() {
    assert_eq!(safe_title("Breaking: A/B test?"), "Breaking_ A_B test_");
    assert_eq!(safe_title("  padded  "), "padded");
    assert_eq!(safe_title(&"x".repeat(80)).chars().count(), 50);
    assert_eq!(safe_title(""), "untitled");
    assert_eq!(safe_title(".."), "untitled");
}

#[test]
fn hash_is_stable_and_content_sensitive() {
    assert_eq!(image_hash(b"abc"), image_hash(b"abc"));
    assert_ne!(image_hash(b"abc"), image_hash(b"abd"));
    assert_eq!(image_hash(b"abc").len(), 16);
}

#[test]
fn save_writes_png_and_metadata() {
    let root = scratch("save");
    let archive = Archive::new(&root);
    let record = ArchiveRecord {
        title: "Markets: rally".into(),
        source: "Wire".into(),
        summary: "Stocks up".into(),
        generated_image: POST_FILE.into(),
        ..ArchiveRecord::default()
    };
    let folder = archive.save_at(&record, b"png-bytes", fixed_now()).unwrap();
    assert_eq!(folder, root.join("2024-05-01").join("Markets_ rally"));
    assert_eq!(std::fs::read(folder.join(POST_FILE)).unwrap(), b"png-bytes");

    let meta: Value =
        serde_json::from_str(&std::fs::read_to_string(folder.join(METADATA_FILE)).unwrap())
            .unwrap();
    assert_eq!(meta["title"], "Markets: rally");
    assert_eq!(meta["image_hash"], image_hash(b"png-bytes"));
    assert!(meta["last_updated"].as_str().unwrap().starts_with("2024-05-01T12:00:00"));
}

#[test]
fn save_merges_into_existing_metadata() {
    let root = scratch("merge");
    let archive = Archive::new(&root);
    let folder = archive.folder_for("Same", fixed_now());
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join(METADATA_FILE), r#"{"note":"keep me","source":"old"}"#).unwrap();

    let record = ArchiveRecord {
        title: "Same".into(),
        source: "new".into(),
        ..ArchiveRecord::default()
    };
    archive.save_at(&record, b"x", fixed_now()).unwrap();
    let meta: Value =
        serde_json::from_str(&std::fs::read_to_string(folder.join(METADATA_FILE)).unwrap())
            .unwrap();
    assert_eq!(meta["note"], "keep me");
    assert_eq!(meta["source"], "new");
    assert!(folder.join(POST_FILE).exists());
}
