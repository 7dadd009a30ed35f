//! Pooled markdown rendering surfaces for embedding in a host UI.
//!
//! A host builds one [`MarkdownRuntime`](application::MarkdownRuntime) on its
//! UI thread, then creates a
//! [`ContentLoadCoordinator`](application::ContentLoadCoordinator) per
//! embedded view. Coordinators borrow surfaces from the shared pool, load the
//! bundled document only when the requested style changes, and relay height
//! and rendered-output messages from the page.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod surface;
