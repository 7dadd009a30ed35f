#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use markdown_surface::application::{
    BundledStyleResolver, ContentLoadCoordinator, LinkOpener, MarkdownRuntime,
};
use markdown_surface::config::PoolSettings;
use markdown_surface::domain::HostPlatform;
use markdown_surface::infra::assets::{DocumentAssets, MemoryAssets};
use markdown_surface::surface::bridge::UPDATE_ENTRY_POINT;
use markdown_surface::surface::{
    BridgeChannel, EngineFactory, EngineSetting, RenderEngine, RenderSurface, RenderSurfacePool,
};
use url::Url;

pub const TEMPLATE: &str =
    "<html><style>PLACEHOLDER_STYLESHEET</style><script>PLACEHOLDER_SCRIPT</script></html>";
pub const SCRIPT: &str = "render();";
pub const STANDARD_CSS: &str = "body{font:system}";

/// Engine that records every call made on it.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub loads: Vec<String>,
    pub scripts: Vec<String>,
    pub settings: Vec<EngineSetting>,
    pub handlers: Vec<BridgeChannel>,
    pub invalidations: Vec<f64>,
}

impl RecordingEngine {
    /// Markdown payloads pushed through the page's update entry point.
    pub fn pushed_markdown(&self) -> Vec<String> {
        let prefix = format!("{UPDATE_ENTRY_POINT}(`");
        self.scripts
            .iter()
            .filter_map(|script| {
                let encoded = script.strip_prefix(&prefix)?.strip_suffix("`)")?;
                let bytes = STANDARD.decode(encoded).ok()?;
                String::from_utf8(bytes).ok()
            })
            .collect()
    }
}

impl RenderEngine for RecordingEngine {
    fn load_html(&mut self, html: &str) {
        self.loads.push(html.to_string());
    }

    fn evaluate_script(&mut self, script: &str) {
        self.scripts.push(script.to_string());
    }

    fn apply_setting(&mut self, setting: EngineSetting) {
        self.settings.push(setting);
    }

    fn add_message_handler(&mut self, channel: BridgeChannel) {
        self.handlers.push(channel);
    }

    fn remove_all_message_handlers(&mut self) {
        self.handlers.clear();
    }

    fn invalidate_intrinsic_size(&mut self, height: f64) {
        self.invalidations.push(height);
    }
}

#[derive(Debug, Default)]
pub struct RecordingFactory {
    pub processes: Cell<usize>,
}

impl EngineFactory for RecordingFactory {
    type Engine = RecordingEngine;
    type Process = ();

    fn spawn_process(&self) -> Self::Process {
        self.processes.set(self.processes.get() + 1);
    }

    fn create_engine(&self, _process: &()) -> RecordingEngine {
        RecordingEngine::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    pub opened: Rc<RefCell<Vec<Url>>>,
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &Url) {
        self.opened.borrow_mut().push(url.clone());
    }
}

pub type Coordinator = ContentLoadCoordinator<RecordingFactory>;
pub type Runtime = MarkdownRuntime<RecordingFactory>;

pub fn settings(initial_size: usize, retain_document: bool) -> PoolSettings {
    PoolSettings {
        platform: HostPlatform::Desktop,
        initial_size,
        retain_document_across_reuse: retain_document,
    }
}

/// Runtime over fixed in-memory assets. Only the standard desktop
/// stylesheet exists, so the messaging style fails to resolve.
pub fn runtime_with(settings: &PoolSettings, opener: RecordingOpener) -> Rc<Runtime> {
    let stylesheets =
        MemoryAssets::new().with("stylesheets/default-desktop.css", STANDARD_CSS);
    Rc::new(MarkdownRuntime::new(
        RenderSurfacePool::new(RecordingFactory::default(), settings),
        Box::new(BundledStyleResolver::with_source(
            settings.platform,
            stylesheets,
        )),
        DocumentAssets::new(TEMPLATE, SCRIPT),
        Box::new(opener),
    ))
}

pub fn runtime() -> Rc<Runtime> {
    runtime_with(&settings(0, true), RecordingOpener::default())
}

pub fn document_with(css: &str) -> String {
    TEMPLATE
        .replace("PLACEHOLDER_SCRIPT", SCRIPT)
        .replace("PLACEHOLDER_STYLESHEET", css)
}

pub fn engine(coordinator: &Coordinator) -> &RecordingEngine {
    coordinator
        .surface()
        .expect("coordinator should own a surface")
        .engine()
}

pub fn surface(coordinator: &Coordinator) -> &RenderSurface<RecordingEngine> {
    coordinator
        .surface()
        .expect("coordinator should own a surface")
}

/// Complete the load currently in flight.
pub fn finish_load(coordinator: &mut Coordinator) {
    let ticket = coordinator
        .pending_ticket()
        .expect("a document load should be pending");
    assert!(coordinator.document_finished(ticket));
}

pub fn encode(text: &str) -> String {
    encode_bytes(text.as_bytes())
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
