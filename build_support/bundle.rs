use std::fs;
use std::path::Path;

use walkdir::WalkDir;

pub const TEMPLATE_FILE: &str = "template.html";
pub const SCRIPT_FILE: &str = "script.js";
pub const STYLESHEET_DIR: &str = "stylesheets";
pub const REQUIRED_PLACEHOLDERS: [&str; 2] = ["PLACEHOLDER_SCRIPT", "PLACEHOLDER_STYLESHEET"];

/// Check that `source` holds a usable asset bundle: a template carrying both
/// placeholders, the renderer script, and at least one stylesheet.
pub fn validate_bundle(source: &Path) -> Result<(), String> {
    validate_template(&source.join(TEMPLATE_FILE))?;

    let script = source.join(SCRIPT_FILE);
    if !script.is_file() {
        return Err(format!("renderer script missing at {}", script.display()));
    }

    let stylesheets = source.join(STYLESHEET_DIR);
    let sheet_count = fs::read_dir(&stylesheets)
        .map_err(|err| format!("failed to read {}: {err}", stylesheets.display()))?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .count();
    if sheet_count == 0 {
        return Err(format!("no stylesheets found in {}", stylesheets.display()));
    }

    Ok(())
}

fn validate_template(path: &Path) -> Result<(), String> {
    let template = fs::read_to_string(path)
        .map_err(|err| format!("failed to read template {}: {err}", path.display()))?;

    for placeholder in REQUIRED_PLACEHOLDERS {
        if !template.contains(placeholder) {
            return Err(format!(
                "template {} is missing the {placeholder} token",
                path.display()
            ));
        }
    }

    Ok(())
}

/// Mirror `source` into `dest`, replacing whatever `dest` held before.
pub fn copy_bundle(source: &Path, dest: &Path) -> Result<(), String> {
    if dest.exists() {
        fs::remove_dir_all(dest)
            .map_err(|err| format!("failed to clean {}: {err}", dest.display()))?;
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|err| format!("failed to walk {}: {err}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| format!("failed to relativize {}: {err}", entry.path().display()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|err| format!("failed to create {}: {err}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|err| format!("failed to create {}: {err}", parent.display()))?;
            }
            fs::copy(entry.path(), &target).map_err(|err| {
                format!(
                    "failed to copy {} to {}: {err}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    Ok(())
}
