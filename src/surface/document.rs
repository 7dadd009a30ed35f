//! Full-document assembly from the template, renderer script, and stylesheet.

use crate::infra::assets::DocumentAssets;

pub const SCRIPT_PLACEHOLDER: &str = "PLACEHOLDER_SCRIPT";
pub const STYLESHEET_PLACEHOLDER: &str = "PLACEHOLDER_STYLESHEET";

/// Substitute the script and stylesheet into the template.
///
/// Only the template is scanned for placeholders; inserted script or CSS
/// text that happens to contain a placeholder token is left untouched.
pub fn build_document(assets: &DocumentAssets, stylesheet: &str) -> String {
    let template = assets.template();
    let mut html =
        String::with_capacity(template.len() + assets.script().len() + stylesheet.len());

    let mut segments = template.split(SCRIPT_PLACEHOLDER).peekable();
    while let Some(segment) = segments.next() {
        let mut parts = segment.split(STYLESHEET_PLACEHOLDER).peekable();
        while let Some(part) = parts.next() {
            html.push_str(part);
            if parts.peek().is_some() {
                html.push_str(stylesheet);
            }
        }
        if segments.peek().is_some() {
            html.push_str(assets.script());
        }
    }

    html
}
