use asset_mirror::utils::validation::Validate;
use asset_mirror::{LayoutConfig, LocalStore, MirrorEngine, Stage};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_custom_layout_drives_the_run() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("proj");
    let dst = temp.path().join("site");

    let config_path = temp.path().join("layout.toml");
    fs::write(
        &config_path,
        r#"
[layout]
submission_dir = "final"
assets_dir = "static/img"

[[pairs]]
tag = "0007_0008"
left = "IMG_0007.jpg"
center = "IMG_0008.jpg"

[[rectification]]
label = "door"
source = "data/raw/door.jpg"
"#,
    )
    .unwrap();

    let data = src.join("final/data");
    fs::create_dir_all(data.join("converted/mosaic_0007_0008")).unwrap();
    fs::write(data.join("converted/mosaic_0007_0008/IMG_0007.jpg"), b"l").unwrap();
    fs::write(data.join("converted/mosaic_0007_0008/IMG_0008.jpg"), b"c").unwrap();
    fs::create_dir_all(data.join("raw")).unwrap();
    fs::write(data.join("raw/door.jpg"), b"door").unwrap();
    fs::create_dir_all(data.join("out/b3/0007_0008")).unwrap();
    fs::write(data.join("out/b3/0007_0008/matches.png"), b"m").unwrap();

    let layout = LayoutConfig::from_file(&config_path).unwrap();
    layout.validate().unwrap();

    let engine = MirrorEngine::new(LocalStore::new(), layout, &src, &dst);
    let report = engine.run(&[Stage::A1, Stage::A3, Stage::B3]).unwrap();

    let assets = dst.join("static/img");
    assert!(assets.join("a1/0007_0008_left.jpg").exists());
    assert!(assets.join("a1/0007_0008_center.jpg").exists());
    assert_eq!(fs::read(assets.join("a3/door/door_original.jpg")).unwrap(), b"door");
    assert!(assets.join("b3/0007_0008/matches.png").exists());
    assert!(!assets.join("a1/1491_1492_left.jpg").exists());

    assert_eq!(report.stages.len(), 3);
    assert_eq!(report.assets_root, assets);
    assert_eq!(report.total_copied(), 4);
}

#[test]
fn test_layout_rejects_nested_tag() {
    let layout = LayoutConfig::from_toml_str(
        r#"
[[pairs]]
tag = "../escape"
left = "a.jpg"
center = "b.jpg"
"#,
    )
    .unwrap();

    assert!(layout.validate().is_err());
}
