//! Edit session: the lifecycle of one open document.
//!
//! # Invariants
//! - `dirty` is false right after a load and after a successful save.
//! - Every mutation sets `dirty`; only the clean-to-dirty transition
//!   re-renders the window title.
//! - A failed save leaves the session dirty.

mod session;

pub use session::{DEFAULT_HISTORY_DEPTH, EditSession, SessionError, SessionState, UNSAVED_PROMPT};
