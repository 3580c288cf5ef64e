use rpgedit_project::MANIFEST_FILE_NAME;
use rpgedit_session::DEFAULT_HISTORY_DEPTH;

/// Editor tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Manifest file name at the workspace root.
    pub manifest_file_name: String,
    /// Undo entries kept per open document.
    pub history_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            manifest_file_name: MANIFEST_FILE_NAME.to_string(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}
