use std::fs;
use std::path::Path;

use tempfile::tempdir;

#[path = "../build_support/bundle.rs"]
mod bundle;

fn write_bundle(root: &Path, template: &str) {
    fs::create_dir_all(root.join("stylesheets")).expect("stylesheet dir should be created");
    fs::write(root.join("template.html"), template).expect("template should be written");
    fs::write(root.join("script.js"), "render();").expect("script should be written");
    fs::write(root.join("stylesheets/default-desktop.css"), "body{}")
        .expect("stylesheet should be written");
}

#[test]
fn shipped_assets_form_a_valid_bundle() {
    bundle::validate_bundle(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").as_path())
        .expect("repository assets should validate");
}

#[test]
fn template_without_placeholders_is_rejected() {
    let temp = tempdir().expect("temp dir should be created");
    write_bundle(temp.path(), "<style>PLACEHOLDER_STYLESHEET</style>");

    let err = bundle::validate_bundle(temp.path()).expect_err("script placeholder missing");
    assert!(err.contains("PLACEHOLDER_SCRIPT"), "unexpected error: {err}");
}

#[test]
fn bundle_without_stylesheets_is_rejected() {
    let temp = tempdir().expect("temp dir should be created");
    write_bundle(temp.path(), "PLACEHOLDER_SCRIPT PLACEHOLDER_STYLESHEET");
    fs::remove_file(temp.path().join("stylesheets/default-desktop.css"))
        .expect("stylesheet should be removed");

    let err = bundle::validate_bundle(temp.path()).expect_err("no stylesheets");
    assert!(err.contains("no stylesheets"), "unexpected error: {err}");
}

#[test]
fn copy_replaces_previous_bundle() {
    let temp = tempdir().expect("temp dir should be created");
    let source = temp.path().join("assets");
    let dest = temp.path().join("bundle");
    write_bundle(&source, "PLACEHOLDER_SCRIPT PLACEHOLDER_STYLESHEET");
    fs::create_dir_all(&dest).expect("dest should be created");
    fs::write(dest.join("stale.txt"), "old").expect("stale file should be written");

    bundle::copy_bundle(&source, &dest).expect("bundle should copy");

    assert!(!dest.join("stale.txt").exists());
    assert_eq!(
        fs::read_to_string(dest.join("stylesheets/default-desktop.css"))
            .expect("copied stylesheet"),
        "body{}"
    );
}
