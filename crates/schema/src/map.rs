use crate::shape::{Field, ONE, STRING, Shape, ZERO};
use crate::{Asset, AssetKind};
use serde::{Deserialize, Serialize};

/// Texture-space sampling window, as fractions of the source image.
///
/// The intended domain is [0, 1]; the data model does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for UvArea {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: 1.0,
            bottom: 1.0,
        }
    }
}

/// One cell of a map grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapTileData {
    pub uv: UvArea,
}

/// A tile-grid map: a texture plus a rectangular grid of UV cells.
///
/// `tiles` is rows outer, columns inner. It is never empty and every row has
/// the same length; the editing operations preserve both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Texture path relative to the workspace root; empty when unset.
    pub image: String,
    pub tiles: Vec<Vec<MapTileData>>,
}

impl Default for MapData {
    fn default() -> Self {
        Self {
            image: String::new(),
            tiles: vec![vec![MapTileData::default()]],
        }
    }
}

impl MapData {
    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn cols(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&MapTileData> {
        self.tiles.get(row).and_then(|r| r.get(col))
    }
}

pub static UV_AREA: Shape = Shape::Object {
    fields: &[
        Field {
            name: "left",
            shape: &ZERO,
        },
        Field {
            name: "top",
            shape: &ZERO,
        },
        Field {
            name: "right",
            shape: &ONE,
        },
        Field {
            name: "bottom",
            shape: &ONE,
        },
    ],
};

pub static MAP_TILE: Shape = Shape::Object {
    fields: &[Field {
        name: "uv",
        shape: &UV_AREA,
    }],
};

static TILE_ROW: Shape = Shape::Array {
    item: &MAP_TILE,
    non_empty: true,
};

static TILE_GRID: Shape = Shape::Array {
    item: &TILE_ROW,
    non_empty: true,
};

pub static MAP_DATA: Shape = Shape::Object {
    fields: &[
        Field {
            name: "image",
            shape: &STRING,
        },
        Field {
            name: "tiles",
            shape: &TILE_GRID,
        },
    ],
};

impl Asset for MapData {
    const KIND: AssetKind = AssetKind::Map;

    fn shape() -> &'static Shape {
        &MAP_DATA
    }
}
