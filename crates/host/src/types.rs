use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one loaded document.
///
/// A fresh id is minted on every load, so two loads of the same file are
/// distinct documents as far as unsaved-changes gating is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short form for log lines.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}
