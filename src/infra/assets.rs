//! Embedded surface assets: the document template, the in-surface renderer
//! script, and the named stylesheets.

use std::collections::HashMap;

use include_dir::{Dir, include_dir};
use once_cell::sync::OnceCell;

use crate::domain::AssetError;

static BUNDLED_ASSETS: Dir<'_> = include_dir!("$OUT_DIR/bundle");
static BUNDLED_DOCUMENT: OnceCell<DocumentAssets> = OnceCell::new();

/// Template asset carrying the script and stylesheet placeholders.
pub const TEMPLATE_ASSET: &str = "template.html";
/// Renderer script injected into the template.
pub const SCRIPT_ASSET: &str = "script.js";

/// Read-only lookup of assets by relative name.
pub trait AssetSource {
    fn read(&self, name: &str) -> Option<&[u8]>;

    /// Read an asset as UTF-8 text.
    fn read_text(&self, name: &str) -> Result<&str, AssetError> {
        let bytes = self.read(name).ok_or_else(|| AssetError::missing(name))?;
        std::str::from_utf8(bytes).map_err(|_| AssetError::not_utf8(name))
    }
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn read(&self, name: &str) -> Option<&[u8]> {
        (**self).read(name)
    }
}

impl AssetSource for Dir<'_> {
    fn read(&self, name: &str) -> Option<&[u8]> {
        let candidate = name.trim_start_matches('/');
        if candidate.is_empty() || candidate.ends_with('/') || candidate.contains("..") {
            return None;
        }
        self.get_file(candidate).map(|file| file.contents())
    }
}

/// The asset directory compiled into the crate.
pub fn bundled() -> &'static Dir<'static> {
    &BUNDLED_ASSETS
}

/// In-memory asset table for hosts that ship their own assets, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), contents.into());
    }

    pub fn with(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(name, contents);
        self
    }
}

impl AssetSource for MemoryAssets {
    fn read(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }
}

/// Template and renderer script used to build every full document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAssets {
    template: String,
    script: String,
}

impl DocumentAssets {
    pub fn new(template: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            script: script.into(),
        }
    }

    pub fn from_source(source: &dyn AssetSource) -> Result<Self, AssetError> {
        let template = source.read_text(TEMPLATE_ASSET)?;
        let script = source.read_text(SCRIPT_ASSET)?;
        Ok(Self::new(template, script))
    }

    /// Document assets from the embedded bundle, read once per process.
    pub fn bundled() -> Result<&'static DocumentAssets, AssetError> {
        BUNDLED_DOCUMENT.get_or_try_init(|| Self::from_source(bundled()))
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn script(&self) -> &str {
        &self.script
    }
}
