//! Per-view coordination of one display request with one pooled surface.
//!
//! ```text
//! Initializing ──▶ AwaitingDocumentLoad ──▶ Ready ──▶ TornDown
//!       └────────────────────────────────────▲
//! ```
//!
//! Creation acquires a surface and either starts a full document load or,
//! when the surface already holds a document in the requested style, pushes
//! the markdown straight away. Load completions, bridge messages and
//! navigation decisions arrive later as events on the UI thread.

use std::fmt;
use std::rc::Rc;

use metrics::counter;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::domain::StyleSpec;
use crate::infra::telemetry::{BRIDGE_DROPPED_TOTAL, DOCUMENT_LOAD_TOTAL, DOCUMENT_REUSE_TOTAL};
use crate::surface::bridge::decode_rendered_payload;
use crate::surface::{
    BridgeChannel, BridgeError, BridgeMessage, EngineFactory, LoadTicket, RenderSurface,
};

use super::error::{CoordinatorError, ErrorReport};
use super::lifecycle::ViewLifecycle;
use super::navigation::{NavigationAction, NavigationKind, NavigationPolicy};
use super::request::DisplayRequest;
use super::runtime::MarkdownRuntime;

const SOURCE: &str = "application::coordinator::ContentLoadCoordinator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Initializing,
    AwaitingDocumentLoad,
    Ready,
    TornDown,
}

impl LoadPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadPhase::Initializing => "initializing",
            LoadPhase::AwaitingDocumentLoad => "awaiting_document_load",
            LoadPhase::Ready => "ready",
            LoadPhase::TornDown => "torn_down",
        }
    }
}

#[derive(Debug)]
struct PendingLoad {
    ticket: LoadTicket,
    style: StyleSpec,
}

/// Drives one surface for the lifetime of one embedded view.
///
/// The surface goes back to the pool exactly once: on [`tear_down`], or on
/// drop if the host never called it.
///
/// [`tear_down`]: Self::tear_down
pub struct ContentLoadCoordinator<F: EngineFactory> {
    runtime: Rc<MarkdownRuntime<F>>,
    surface: Option<RenderSurface<F::Engine>>,
    request: DisplayRequest,
    phase: LoadPhase,
    pending: Option<PendingLoad>,
    last_error: Option<CoordinatorError>,
}

impl<F: EngineFactory> ContentLoadCoordinator<F> {
    pub fn new(runtime: Rc<MarkdownRuntime<F>>, request: DisplayRequest) -> Self {
        let mut surface = runtime.pool().acquire();
        if !surface.apply_static_setup() {
            debug!(
                target_module = SOURCE,
                surface_id = %surface.id(),
                "Static setup already present on reused surface"
            );
        }

        let mut coordinator = Self {
            runtime,
            surface: Some(surface),
            request,
            phase: LoadPhase::Initializing,
            pending: None,
            last_error: None,
        };
        coordinator.sync_subscriptions();
        coordinator.present();
        coordinator
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// The owned surface; `None` once torn down.
    pub fn surface(&self) -> Option<&RenderSurface<F::Engine>> {
        self.surface.as_ref()
    }

    pub fn request(&self) -> &DisplayRequest {
        &self.request
    }

    /// Ticket of the document load in flight. The host passes it back to
    /// [`document_finished`](Self::document_finished) when its engine
    /// reports the load complete.
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        self.pending.as_ref().map(|pending| pending.ticket)
    }

    /// Error from the most recent attempt to present the request.
    pub fn last_error(&self) -> Option<&CoordinatorError> {
        self.last_error.as_ref()
    }

    /// Apply a new request from the host.
    ///
    /// While a document load is pending only the request is stored; the
    /// completion pushes the newest markdown.
    pub fn update(&mut self, request: DisplayRequest) {
        match self.phase {
            LoadPhase::TornDown => {
                debug!(
                    target_module = SOURCE,
                    "Update after teardown ignored"
                );
            }
            LoadPhase::AwaitingDocumentLoad => {
                self.request = request;
                self.sync_subscriptions();
                debug!(
                    target_module = SOURCE,
                    surface_id = ?self.surface.as_ref().map(RenderSurface::id),
                    "Update held until document load finishes"
                );
            }
            LoadPhase::Initializing | LoadPhase::Ready => {
                self.request = request;
                self.sync_subscriptions();
                self.present();
            }
        }
    }

    /// Engine reported a finished document load. Returns `false` when the
    /// ticket is stale or this coordinator no longer owns a surface.
    pub fn document_finished(&mut self, ticket: LoadTicket) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            debug!(
                target_module = SOURCE,
                ticket_surface = %ticket.surface(),
                "Load completion after teardown ignored"
            );
            return false;
        };

        let Some(pending) = self.pending.take_if(|pending| pending.ticket == ticket) else {
            debug!(
                target_module = SOURCE,
                surface_id = %surface.id(),
                ticket_surface = %ticket.surface(),
                "Stale load completion ignored"
            );
            return false;
        };

        if !surface.complete_load(ticket, pending.style) {
            return false;
        }
        Self::transition(&mut self.phase, LoadPhase::Ready, surface.id());

        if surface.needs_full_load(&self.request.style) {
            debug!(
                target_module = SOURCE,
                surface_id = %surface.id(),
                style = %self.request.style.label(),
                "Style changed during load; reloading"
            );
            self.present();
        } else {
            surface.push_content(&self.request.markdown);
        }
        true
    }

    /// Policy for a navigation the engine is about to perform. Activated
    /// links are cancelled and handed to the request's link handler, or to
    /// the system opener when there is none.
    pub fn decide_navigation(&self, action: &NavigationAction) -> NavigationPolicy {
        if action.kind != NavigationKind::LinkActivated {
            return NavigationPolicy::Allow;
        }

        let Some(url) = action.url.as_ref() else {
            return NavigationPolicy::Cancel;
        };

        match self.request.link_handler.as_ref() {
            Some(handler) => handler(url),
            None => self.runtime.link_opener().open(url),
        }
        NavigationPolicy::Cancel
    }

    /// Message posted by the page on a named handler.
    pub fn receive_script_message(&mut self, name: &str, body: &Value) {
        match BridgeMessage::decode(name, body) {
            Ok(message) => self.handle_message(message),
            Err(err) => self.drop_message(&err),
        }
    }

    /// Message posted by the page as a JSON envelope.
    pub fn receive_ipc_message(&mut self, raw: &str) {
        match BridgeMessage::decode_envelope(raw) {
            Ok(message) => self.handle_message(message),
            Err(err) => self.drop_message(&err),
        }
    }

    /// Return the surface to the pool. Later calls do nothing.
    pub fn tear_down(&mut self) {
        let Some(surface) = self.surface.take() else {
            return;
        };
        let surface_id = surface.id();
        let abandoned_load = self.pending.take().is_some();

        self.runtime.pool().release(surface);
        Self::transition(&mut self.phase, LoadPhase::TornDown, surface_id);
        info!(
            target_module = SOURCE,
            surface_id = %surface_id,
            abandoned_load,
            "Coordinator torn down"
        );
    }

    fn present(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let style = &self.request.style;

        if !surface.needs_full_load(style) {
            surface.push_content(&self.request.markdown);
            counter!(DOCUMENT_REUSE_TOTAL).increment(1);
            self.last_error = None;
            Self::transition(&mut self.phase, LoadPhase::Ready, surface.id());
            return;
        }

        let css = match self.runtime.resolver().resolve(style) {
            Ok(css) => css,
            Err(source) => {
                let error = CoordinatorError::style(surface.id(), source);
                let report = ErrorReport::from_error(SOURCE, &error);
                error!(
                    target_module = report.source,
                    surface_id = %surface.id(),
                    style = %style.label(),
                    messages = ?report.messages,
                    "Document load aborted"
                );
                if surface.applied_style().is_some() {
                    surface.push_content("");
                }
                self.last_error = Some(error);
                Self::transition(&mut self.phase, LoadPhase::Ready, surface.id());
                return;
            }
        };

        let ticket = surface.load_document(self.runtime.document(), &css);
        counter!(DOCUMENT_LOAD_TOTAL).increment(1);
        info!(
            target_module = SOURCE,
            surface_id = %surface.id(),
            style = %style.label(),
            "Full document load requested"
        );
        self.pending = Some(PendingLoad {
            ticket,
            style: style.clone(),
        });
        self.last_error = None;
        Self::transition(&mut self.phase, LoadPhase::AwaitingDocumentLoad, surface.id());
    }

    fn handle_message(&mut self, message: BridgeMessage) {
        let Some(surface) = self.surface.as_mut() else {
            debug!(
                target_module = SOURCE,
                channel = message.channel().name(),
                "Bridge message after teardown ignored"
            );
            return;
        };

        match message {
            BridgeMessage::SizeChanged(height) => {
                if surface.record_height(height) {
                    debug!(
                        target_module = SOURCE,
                        surface_id = %surface.id(),
                        height,
                        "Content height changed"
                    );
                }
            }
            BridgeMessage::RenderedContentReady(encoded) => {
                let Some(handler) = self.request.rendered_handler.clone() else {
                    return;
                };
                match decode_rendered_payload(&encoded) {
                    Ok(rendered) => handler(&rendered),
                    Err(err) => self.drop_message(&err),
                }
            }
        }
    }

    fn drop_message(&self, err: &BridgeError) {
        counter!(BRIDGE_DROPPED_TOTAL, "reason" => drop_reason(err)).increment(1);
        debug!(
            target_module = SOURCE,
            surface_id = ?self.surface.as_ref().map(RenderSurface::id),
            error = %err,
            "Bridge message dropped"
        );
    }

    fn sync_subscriptions(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let wants_rendered = self.request.rendered_handler.is_some();

        if !wants_rendered && surface.is_subscribed(BridgeChannel::RenderedContent) {
            surface.clear_subscriptions();
        }
        surface.subscribe(BridgeChannel::SizeChange);
        if wants_rendered {
            surface.subscribe(BridgeChannel::RenderedContent);
        }
    }

    fn transition(phase: &mut LoadPhase, next: LoadPhase, surface_id: impl fmt::Display) {
        if *phase == next {
            return;
        }
        debug!(
            target_module = SOURCE,
            surface_id = %surface_id,
            from = phase.as_str(),
            to = next.as_str(),
            "Load phase changed"
        );
        *phase = next;
    }
}

fn drop_reason(err: &BridgeError) -> &'static str {
    match err {
        BridgeError::UnknownChannel { .. } => "unknown_channel",
        BridgeError::InvalidBody { .. } => "invalid_body",
        BridgeError::MalformedEnvelope(_) => "malformed_envelope",
        BridgeError::InvalidBase64 => "invalid_base64",
        BridgeError::NotUtf8 => "not_utf8",
    }
}

impl<F: EngineFactory> Drop for ContentLoadCoordinator<F> {
    fn drop(&mut self) {
        self.tear_down();
    }
}

impl<F: EngineFactory> fmt::Debug for ContentLoadCoordinator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentLoadCoordinator")
            .field("surface", &self.surface.as_ref().map(RenderSurface::id))
            .field("request", &self.request)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<F: EngineFactory> ViewLifecycle for ContentLoadCoordinator<F> {
    type Context = Rc<MarkdownRuntime<F>>;
    type Inputs = DisplayRequest;

    fn on_create(context: &Self::Context, inputs: DisplayRequest) -> Self {
        Self::new(Rc::clone(context), inputs)
    }

    fn on_update(&mut self, inputs: DisplayRequest) {
        self.update(inputs);
    }

    fn on_destroy(mut self) {
        self.tear_down();
    }
}
