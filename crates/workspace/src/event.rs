use rpgedit_project::Manifest;

/// Events delivered by the native shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A workspace folder was picked; `body` is its manifest content.
    OpenWorkspace { path: String, body: String },
    /// A listed asset was opened; `path` is workspace-relative.
    OpenDocument { path: String, body: String },
    Save,
    Export,
    WindowClosing,
}

/// Answer to a window-closing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Allow,
    Prevent,
}

impl From<bool> for CloseDecision {
    fn from(allowed: bool) -> Self {
        if allowed {
            CloseDecision::Allow
        } else {
            CloseDecision::Prevent
        }
    }
}

/// What the shell should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Done,
    Close(CloseDecision),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ExportError(pub String);

/// The build step that compiles a workspace into the engine format.
///
/// The controller only hands over the root folder and the manifest.
pub trait Exporter {
    fn export(&mut self, root: &str, manifest: &Manifest) -> Result<(), ExportError>;
}
