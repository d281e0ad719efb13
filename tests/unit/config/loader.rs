use super::*;
use serde_json::json;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_config").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn merge_json_is_deep_for_objects_and_replacing_otherwise() {
    let mut base = json!({"canvas": {"width": 1080, "height": 1350}, "colors": {"accent_default": [1, 2, 3]}});
    merge_json(
        &mut base,
        json!({"canvas": {"width": 720}, "colors": {"accent_default": [9, 9, 9]}}),
    );
    assert_eq!(
        base,
        json!({"canvas": {"width": 720, "height": 1350}, "colors": {"accent_default": [9, 9, 9]}})
    );
}

#[test]
fn static_loader_ignores_requester() {
    let loader = StaticConfigLoader::from_json(r#"{"canvas": {"width": 300}}"#).unwrap();
    assert_eq!(loader.load(None).unwrap().canvas.width, 300);
    assert_eq!(loader.load(Some("42")).unwrap().canvas.width, 300);
}

#[test]
fn file_loader_without_files_yields_defaults() {
    let loader = FileConfigLoader::new()
        .with_default_path("target/does-not-exist/template.json")
        .with_users_dir("target/does-not-exist/users");
    assert_eq!(loader.load(Some("7")).unwrap(), TemplateConfig::default());
}

#[test]
fn requester_template_layers_over_shared_default() {
    let dir = scratch_dir("layering");
    let default_path = dir.join("template.json");
    std::fs::write(
        &default_path,
        r#"{"canvas": {"width": 800, "height": 1000}, "layout": {"headline_summary_gap": 60}}"#,
    )
    .unwrap();
    let user_dir = dir.join("users").join("1234");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join(USER_TEMPLATE_FILE), r#"{"canvas": {"height": 1920}}"#).unwrap();

    let loader = FileConfigLoader::new()
        .with_default_path(&default_path)
        .with_users_dir(dir.join("users"));

    let shared = loader.load(None).unwrap();
    assert_eq!((shared.canvas.width, shared.canvas.height), (800, 1000));

    let user = loader.load(Some("1234")).unwrap();
    assert_eq!((user.canvas.width, user.canvas.height), (800, 1920));
    assert_eq!(user.layout.headline_summary_gap, 60);

    // Unknown requester falls back to the shared default.
    assert_eq!(loader.load(Some("999")).unwrap(), shared);
}

#[test]
fn malformed_override_is_skipped() {
    let dir = scratch_dir("malformed");
    let default_path = dir.join("template.json");
    std::fs::write(&default_path, r#"{"canvas": {"width": 640}}"#).unwrap();
    let user_dir = dir.join("users").join("u1");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join(USER_TEMPLATE_FILE), "{not json").unwrap();

    let loader = FileConfigLoader::new()
        .with_default_path(&default_path)
        .with_users_dir(dir.join("users"));
    assert_eq!(loader.load(Some("u1")).unwrap().canvas.width, 640);
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let dir = scratch_dir("invalid_values");
    let default_path = dir.join("template.json");
    std::fs::write(&default_path, r#"{"canvas": {"bg_color": [999, 0, 0]}}"#).unwrap();
    let loader = FileConfigLoader::new().with_default_path(&default_path);
    assert_eq!(loader.load(None).unwrap(), TemplateConfig::default());
}

#[test]
fn path_like_requester_ids_are_rejected() {
    let loader = FileConfigLoader::new().with_users_dir("users");
    assert!(loader.user_path("../etc").is_none());
    assert!(loader.user_path("..").is_none());
    assert_eq!(
        loader.user_path("55").unwrap(),
        Path::new("users").join("55").join(USER_TEMPLATE_FILE)
    );
}

#[test]
fn invalid_override_value_keeps_shared_default() {
    let dir = scratch_dir("bad_value");
    let default_path = dir.join("template.json");
    std::fs::write(&default_path, r#"{"canvas": {"width": 800, "height": 1000}}"#).unwrap();
    let user_dir = dir.join("users").join("alice");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join(USER_TEMPLATE_FILE),
        r#"{"gradient": {"max_alpha": 300}}"#,
    )
    .unwrap();

    let loader = FileConfigLoader::new()
        .with_default_path(&default_path)
        .with_users_dir(dir.join("users"));
    let cfg = loader.load(Some("alice")).unwrap();
    assert_eq!((cfg.canvas.width, cfg.canvas.height), (800, 1000));
    assert_eq!(cfg.gradient, TemplateConfig::default().gradient);
}

#[test]
fn invalid_shared_default_falls_back_to_builtin() {
    let dir = scratch_dir("bad_shared");
    let default_path = dir.join("template.json");
    std::fs::write(&default_path, r#"{"canvas": {"width": "wide"}}"#).unwrap();
    let loader = FileConfigLoader::new().with_default_path(&default_path);
    assert_eq!(loader.load(None).unwrap(), TemplateConfig::default());
}
