//! Asset schema: the data model behind every editing screen.
//!
//! Two asset types live here, [`MapData`] (tile grids) and [`ActorData`]
//! (keyframed sprite animations). Each has a declarative [`Shape`] that
//! drives validation of incoming documents.
//!
//! # Invariants
//! - A document either fully matches its shape or is rejected; there is no
//!   lenient or partial acceptance and no schema migration.
//! - Map grids are non-empty and rectangular.
//! - Every actor keyframe list holds at least one point.

pub mod actor;
pub mod map;
pub mod shape;

pub use actor::{ActorData, AnimationState, Direction, EventScript, UvFunc, UvFuncPoint};
pub use map::{MapData, MapTileData, UvArea};
pub use shape::{Field, Shape, Violation};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors from decoding or encoding asset documents.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("invalid {kind} document at {path}: expected {expected}")]
    InvalidSchema {
        kind: &'static str,
        path: String,
        expected: String,
    },
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A name that does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name `{0}`")]
pub struct UnknownName(pub String);

/// The two kinds of asset a workspace owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Map,
    Actor,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Map, AssetKind::Actor];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Map => "map",
            AssetKind::Actor => "actor",
        }
    }

    /// File body written when a new asset of this kind is created.
    pub fn default_body(self) -> Result<String, SchemaError> {
        match self {
            AssetKind::Map => serialize(&MapData::default()),
            AssetKind::Actor => serialize(&ActorData::default()),
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// A document type with a declarative shape.
pub trait Asset:
    Serialize + DeserializeOwned + Default + Clone + PartialEq + std::fmt::Debug
{
    const KIND: AssetKind;

    fn shape() -> &'static Shape;
}

/// Decode bytes as JSON, validate against `T`'s shape, then convert.
pub fn parse<T: Asset>(bytes: &[u8]) -> Result<T, SchemaError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| SchemaError::MalformedDocument(e.to_string()))?;
    validate::<T>(&value)?;
    serde_json::from_value(value).map_err(|e| SchemaError::InvalidSchema {
        kind: T::KIND.as_str(),
        path: "$".into(),
        expected: e.to_string(),
    })
}

pub fn parse_str<T: Asset>(text: &str) -> Result<T, SchemaError> {
    parse(text.as_bytes())
}

/// Check an already-decoded value against `T`'s shape.
pub fn validate<T: Asset>(value: &serde_json::Value) -> Result<(), SchemaError> {
    T::shape().validate(value).map_err(|v| {
        tracing::debug!(kind = T::KIND.as_str(), path = %v.path, "shape violation");
        SchemaError::InvalidSchema {
            kind: T::KIND.as_str(),
            path: v.path,
            expected: v.expected,
        }
    })
}

/// Encode an asset as pretty-printed JSON.
pub fn serialize<T: Serialize>(value: &T) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(value)?)
}
