use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::domain::StyleSpec;
use crate::infra::assets::DocumentAssets;

use super::bridge::{self, BridgeChannel};
use super::capabilities::PlatformCapabilities;
use super::document::build_document;
use super::engine::RenderEngine;

/// Pool-unique surface identifier, for logging and identity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// Identifies one document load on one surface. A completion event carrying
/// a stale ticket belongs to a load that was superseded or abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    surface: SurfaceId,
    generation: u64,
}

impl LoadTicket {
    pub fn surface(self) -> SurfaceId {
        self.surface
    }
}

/// One rendering-engine instance plus the state needed to reuse it.
pub struct RenderSurface<E> {
    id: SurfaceId,
    engine: E,
    capabilities: PlatformCapabilities,
    applied_style: Option<StyleSpec>,
    content_height: f64,
    static_setup_applied: bool,
    subscriptions: BTreeSet<BridgeChannel>,
    load_generation: u64,
    pending_load: Option<LoadTicket>,
}

impl<E: RenderEngine> RenderSurface<E> {
    pub fn new(id: SurfaceId, engine: E, capabilities: PlatformCapabilities) -> Self {
        Self {
            id,
            engine,
            capabilities,
            applied_style: None,
            content_height: 0.0,
            static_setup_applied: false,
            subscriptions: BTreeSet::new(),
            load_generation: 0,
            pending_load: None,
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn applied_style(&self) -> Option<&StyleSpec> {
        self.applied_style.as_ref()
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Apply the platform setup table. Returns `false` when it was already
    /// applied to this surface; nothing is re-applied in that case.
    pub fn apply_static_setup(&mut self) -> bool {
        if self.static_setup_applied {
            return false;
        }

        for setting in self.capabilities.settings() {
            self.engine.apply_setting(*setting);
        }
        self.static_setup_applied = true;
        debug!(
            surface_id = %self.id,
            platform = self.capabilities.platform().as_str(),
            settings = self.capabilities.settings().len(),
            "Static surface setup applied"
        );
        true
    }

    /// Whether a full document load is required to display `style`.
    pub fn needs_full_load(&self, style: &StyleSpec) -> bool {
        self.applied_style.as_ref() != Some(style)
    }

    /// Replace the document with the template filled with the renderer script
    /// and `stylesheet`. The returned ticket must be passed to
    /// [`complete_load`](Self::complete_load) once the engine reports the
    /// load finished; content is pushed only after that.
    pub fn load_document(&mut self, assets: &DocumentAssets, stylesheet: &str) -> LoadTicket {
        let html = build_document(assets, stylesheet);
        let ticket = self.next_ticket();
        self.pending_load = Some(ticket);
        self.applied_style = None;
        self.engine.load_html(&html);
        debug!(
            surface_id = %self.id,
            generation = ticket.generation,
            document_bytes = html.len(),
            "Document load started"
        );
        ticket
    }

    /// Record `style` as loaded if `ticket` is the load still in flight.
    /// Returns `false` for stale or unknown tickets.
    pub fn complete_load(&mut self, ticket: LoadTicket, style: StyleSpec) -> bool {
        if self.pending_load != Some(ticket) {
            return false;
        }
        self.pending_load = None;
        self.applied_style = Some(style);
        true
    }

    /// Hand `markdown` to the page's renderer. Fire-and-forget.
    pub fn push_content(&mut self, markdown: &str) {
        let script = bridge::content_push_script(markdown);
        self.engine.evaluate_script(&script);
    }

    pub fn subscribe(&mut self, channel: BridgeChannel) {
        if self.subscriptions.insert(channel) {
            self.engine.add_message_handler(channel);
        }
    }

    /// Drop every bridge subscription on this surface.
    pub fn clear_subscriptions(&mut self) {
        self.engine.remove_all_message_handlers();
        self.subscriptions.clear();
    }

    pub fn is_subscribed(&self, channel: BridgeChannel) -> bool {
        self.subscriptions.contains(&channel)
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = BridgeChannel> + '_ {
        self.subscriptions.iter().copied()
    }

    /// Store a reported content height. Returns `true` and asks the host to
    /// re-measure only when the height actually changed.
    pub fn record_height(&mut self, height: f64) -> bool {
        if self.content_height == height {
            return false;
        }
        self.content_height = height;
        self.engine.invalidate_intrinsic_size(height);
        true
    }

    /// Prepare for handing to a different owner: height back to zero, every
    /// bridge subscription removed, content blanked, and any in-flight load
    /// abandoned. With `retain_document` the applied-style identity survives,
    /// since the template, script and stylesheet stay loaded. An abandoned
    /// load never records its style, so the identity stays empty then.
    pub fn reset_for_reuse(&mut self, retain_document: bool) {
        self.content_height = 0.0;
        self.clear_subscriptions();
        self.push_content("");
        self.pending_load = None;

        if !retain_document {
            self.applied_style = None;
        }
    }

    fn next_ticket(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket {
            surface: self.id,
            generation: self.load_generation,
        }
    }
}

impl<E> fmt::Debug for RenderSurface<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderSurface")
            .field("id", &self.id)
            .field("applied_style", &self.applied_style.as_ref().map(StyleSpec::label))
            .field("content_height", &self.content_height)
            .field("static_setup_applied", &self.static_setup_applied)
            .field("subscriptions", &self.subscriptions)
            .field("pending_load", &self.pending_load)
            .finish()
    }
}
