//! Workspace controller: top-level orchestration of an editing window.
//!
//! Owns the project manifest and the single active document, routes host
//! events to them, and gates every action that would discard unsaved
//! changes (switching documents, opening another workspace, closing the
//! window) behind [`EditSession::request_close`](rpgedit_session::EditSession::request_close).
//!
//! # Invariants
//! - At most one document is open at a time.
//! - A failed load leaves the previous workspace and document untouched.
//! - A declined confirmation aborts the triggering action with no change.

mod config;
mod controller;
mod document;
mod event;

pub use config::EditorConfig;
pub use controller::{WorkspaceController, WorkspaceError};
pub use document::{ActiveDocument, ActorDocument, MapDocument};
pub use event::{CloseDecision, EventOutcome, ExportError, Exporter, HostEvent};
