use std::env;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[path = "build_support/bundle.rs"]
mod bundle;

fn main() {
    prepare_bundle().expect("failed to prepare bundled surface assets");

    let assets_dir = Path::new("assets");
    println!("cargo:rerun-if-changed={}", assets_dir.display());
    println!("cargo:rerun-if-changed=build_support/bundle.rs");

    if assets_dir.is_dir() {
        for entry in WalkDir::new(assets_dir).into_iter().flatten() {
            println!("cargo:rerun-if-changed={}", entry.path().display());
        }
    }
}

fn prepare_bundle() -> Result<(), String> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(|err| err.to_string())?);
    let source = Path::new("assets");

    bundle::validate_bundle(source)?;
    bundle::copy_bundle(source, &out_dir.join("bundle"))
}
