//! Host boundary: everything the editor core asks of the native shell.
//!
//! The core never touches the filesystem, dialogs, or window chrome
//! directly. It calls a [`Host`], so the same state machine runs under a
//! desktop shell, the CLI ([`FsHost`]), or tests ([`MemoryHost`]).
//!
//! # Invariants
//! - Host calls complete before the initiating action resumes.
//! - A failed host call never leaves partial state in the core.

mod fs;
mod memory;
mod types;

pub use fs::FsHost;
pub use memory::MemoryHost;
pub use types::DocumentId;

/// Errors reported by host file operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("{path}: {message}")]
    Io { path: String, message: String },
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl HostError {
    pub fn io(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Services the native shell provides to the editor core.
pub trait Host {
    /// Create a new file with an initial body. Fails if it already exists.
    fn create_file(&mut self, path: &str, initial_body: &str) -> Result<(), HostError>;

    /// Overwrite (or create) a file.
    fn write_file(&mut self, path: &str, body: &str) -> Result<(), HostError>;

    /// Read a whole file as text.
    fn read_file(&mut self, path: &str) -> Result<String, HostError>;

    /// Ask the user a yes/no question.
    fn confirm(&mut self, question: &str) -> bool;

    /// Show a message to the user.
    fn notify(&mut self, message: &str);

    fn set_window_title(&mut self, text: &str);
}

/// Join a workspace root and a manifest-relative asset path.
pub fn join_path(root: &str, relative: &str) -> String {
    if root.is_empty() {
        return relative.to_string();
    }
    format!("{}/{}", root.trim_end_matches('/'), relative)
}
