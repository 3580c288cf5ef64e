//! Project manifest: the workspace-level registry of asset files.
//!
//! Layout of a workspace folder:
//! ```text
//! project.json      - { "maps": [...], "actors": [...] }
//! <relative paths>  - one JSON document per listed map or actor
//! ```
//!
//! # Invariants
//! - Each list is kept sorted ascending by string comparison.
//! - The manifest validates its own shape only, never the listed files.
//! - Mutations return a new manifest; callers persist it.

use rpgedit_schema::shape::{Field, STRING_LIST, Shape};
use rpgedit_schema::AssetKind;
use serde::{Deserialize, Serialize};

/// File name of the manifest at the workspace root.
pub const MANIFEST_FILE_NAME: &str = "project.json";

/// Errors from manifest operations.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid workspace: {0}")]
    InvalidWorkspace(String),
    #[error("failed to encode manifest: {0}")]
    Encode(#[from] serde_json::Error),
}

static MANIFEST: Shape = Shape::Object {
    fields: &[
        Field {
            name: "maps",
            shape: &STRING_LIST,
        },
        Field {
            name: "actors",
            shape: &STRING_LIST,
        },
    ],
};

/// Relative paths of every map and actor owned by a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub maps: Vec<String>,
    pub actors: Vec<String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and validate manifest bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| ManifestError::InvalidWorkspace(e.to_string()))?;
        MANIFEST.validate(&value).map_err(|v| {
            ManifestError::InvalidWorkspace(format!("{}: expected {}", v.path, v.expected))
        })?;
        serde_json::from_value(value).map_err(|e| ManifestError::InvalidWorkspace(e.to_string()))
    }

    pub fn parse_str(text: &str) -> Result<Self, ManifestError> {
        Self::parse(text.as_bytes())
    }

    /// Encode as pretty-printed JSON for `project.json`.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn entries(&self, kind: AssetKind) -> &[String] {
        match kind {
            AssetKind::Map => &self.maps,
            AssetKind::Actor => &self.actors,
        }
    }

    pub fn contains(&self, kind: AssetKind, path: &str) -> bool {
        self.entries(kind).iter().any(|p| p == path)
    }

    /// Which list a path belongs to. Maps win if a path is listed twice.
    pub fn kind_of(&self, path: &str) -> Option<AssetKind> {
        AssetKind::ALL.into_iter().find(|k| self.contains(*k, path))
    }

    /// Append `path` to the `kind` list and re-sort that list.
    ///
    /// Returns a new manifest; `self` is left untouched.
    pub fn add_asset(&self, kind: AssetKind, path: impl Into<String>) -> Self {
        let mut next = self.clone();
        let list = match kind {
            AssetKind::Map => &mut next.maps,
            AssetKind::Actor => &mut next.actors,
        };
        list.push(path.into());
        list.sort();
        tracing::debug!(%kind, count = list.len(), "asset added to manifest");
        next
    }

    /// Total number of listed assets.
    pub fn len(&self) -> usize {
        self.maps.len() + self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty() && self.actors.is_empty()
    }
}
