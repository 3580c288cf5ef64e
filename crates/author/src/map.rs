use crate::{EditError, out_of_range};
use rpgedit_schema::{MapData, MapTileData};

/// Largest row or column count a grid may have.
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Outcome of [`resize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resize {
    /// The requested size equals the current one.
    Unchanged,
    Resized(MapData),
}

/// Resize the tile grid to `rows` x `cols`.
///
/// Cells inside the overlap of the old and new bounds keep their content
/// (anchored top-left); every other cell gets the default tile. Cells a
/// short row lacks are filled the same way.
pub fn resize(map: &MapData, rows: usize, cols: usize) -> Result<Resize, EditError> {
    if !(1..=MAX_GRID_DIMENSION).contains(&rows) || !(1..=MAX_GRID_DIMENSION).contains(&cols) {
        return Err(EditError::InvalidDimension(format!("grid {rows}x{cols}")));
    }
    let (old_rows, old_cols) = (map.rows(), map.cols());
    if rows == old_rows && cols == old_cols {
        return Ok(Resize::Unchanged);
    }

    let tiles: Vec<Vec<MapTileData>> = (0..rows)
        .map(|i| {
            (0..cols)
                .map(|j| map.tile(i, j).copied().unwrap_or_default())
                .collect()
        })
        .collect();

    tracing::debug!(old_rows, old_cols, rows, cols, "map resized");
    Ok(Resize::Resized(MapData {
        image: map.image.clone(),
        tiles,
    }))
}

/// Replace exactly one cell.
pub fn update_cell(
    map: &MapData,
    row: usize,
    col: usize,
    tile: MapTileData,
) -> Result<MapData, EditError> {
    if row >= map.rows() {
        return Err(out_of_range("row", row, map.rows()));
    }
    if col >= map.tiles[row].len() {
        return Err(out_of_range("column", col, map.tiles[row].len()));
    }
    let uv = tile.uv;
    if ![uv.left, uv.top, uv.right, uv.bottom].iter().all(|v| v.is_finite()) {
        return Err(EditError::InvalidDimension(format!(
            "uv ({}, {}, {}, {})",
            uv.left, uv.top, uv.right, uv.bottom
        )));
    }
    let mut next = map.clone();
    next.tiles[row][col] = tile;
    Ok(next)
}

pub fn set_image(map: &MapData, image: impl Into<String>) -> MapData {
    MapData {
        image: image.into(),
        tiles: map.tiles.clone(),
    }
}

/// The cell currently shown in the tile inspector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellSelection {
    pub row: usize,
    pub col: usize,
}

impl CellSelection {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Pull the selection back inside `map` after a shrink.
    pub fn clamp_to(self, map: &MapData) -> Self {
        Self {
            row: self.row.min(map.rows().saturating_sub(1)),
            col: self.col.min(map.cols().saturating_sub(1)),
        }
    }

    pub fn tile(self, map: &MapData) -> Option<&MapTileData> {
        map.tile(self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpgedit_schema::UvArea;

    fn tile(v: f64) -> MapTileData {
        MapTileData {
            uv: UvArea {
                left: v,
                top: v,
                right: v,
                bottom: v,
            },
        }
    }

    /// 2x3 grid where cell (i, j) carries `i * 10 + j`.
    fn numbered() -> MapData {
        MapData {
            image: "t.png".into(),
            tiles: (0..2)
                .map(|i| (0..3).map(|j| tile((i * 10 + j) as f64)).collect())
                .collect(),
        }
    }

    fn resized(map: &MapData, rows: usize, cols: usize) -> MapData {
        match resize(map, rows, cols).unwrap() {
            Resize::Resized(m) => m,
            Resize::Unchanged => panic!("expected a resize"),
        }
    }

    #[test]
    fn same_size_is_unchanged() {
        assert_eq!(resize(&numbered(), 2, 3).unwrap(), Resize::Unchanged);
    }

    #[test]
    fn result_is_rectangular() {
        for (r, c) in [(1, 1), (2, 5), (4, 3), (5, 1), (1, 7)] {
            let m = resized(&numbered(), r, c);
            assert_eq!(m.rows(), r);
            assert!(m.tiles.iter().all(|row| row.len() == c));
        }
    }

    #[test]
    fn grow_preserves_overlap_and_fills_default() {
        let old = numbered();
        let m = resized(&old, 4, 5);
        for i in 0..4 {
            for j in 0..5 {
                if i < 2 && j < 3 {
                    assert_eq!(m.tiles[i][j], old.tiles[i][j]);
                } else {
                    assert_eq!(m.tiles[i][j], MapTileData::default());
                }
            }
        }
        assert_eq!(m.image, "t.png");
    }

    #[test]
    fn shrink_truncates_trailing() {
        let old = numbered();
        let m = resized(&old, 1, 2);
        assert_eq!(m.tiles, vec![vec![old.tiles[0][0], old.tiles[0][1]]]);
    }

    #[test]
    fn mixed_grow_and_shrink() {
        let old = numbered();
        let m = resized(&old, 3, 1);
        assert_eq!(m.tiles[0][0], old.tiles[0][0]);
        assert_eq!(m.tiles[1][0], old.tiles[1][0]);
        assert_eq!(m.tiles[2][0], MapTileData::default());
    }

    #[test]
    fn resize_leaves_input_untouched() {
        let old = numbered();
        let _ = resized(&old, 1, 1);
        assert_eq!(old, numbered());
    }

    #[test]
    fn zero_or_oversized_dimension_rejected() {
        let map = numbered();
        assert!(matches!(resize(&map, 0, 3), Err(EditError::InvalidDimension(_))));
        assert!(matches!(resize(&map, 2, 0), Err(EditError::InvalidDimension(_))));
        assert!(matches!(
            resize(&map, MAX_GRID_DIMENSION + 1, 1),
            Err(EditError::InvalidDimension(_))
        ));
    }

    #[test]
    fn update_cell_replaces_one() {
        let old = numbered();
        let m = update_cell(&old, 1, 2, tile(0.5)).unwrap();
        assert_eq!(m.tiles[1][2], tile(0.5));
        let changed = (0..2)
            .flat_map(|i| (0..3).map(move |j| (i, j)))
            .filter(|&(i, j)| m.tiles[i][j] != old.tiles[i][j])
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn update_cell_out_of_range() {
        let old = numbered();
        assert_eq!(
            update_cell(&old, 2, 0, tile(0.0)),
            Err(EditError::IndexOutOfRange {
                target: "row",
                index: 2,
                len: 2
            })
        );
        assert_eq!(
            update_cell(&old, 0, 3, tile(0.0)),
            Err(EditError::IndexOutOfRange {
                target: "column",
                index: 3,
                len: 3
            })
        );
    }

    #[test]
    fn update_cell_rejects_non_finite_uv() {
        let old = numbered();
        let mut bad = tile(0.5);
        bad.uv.left = f64::NAN;
        assert!(matches!(
            update_cell(&old, 0, 0, bad),
            Err(EditError::InvalidDimension(_))
        ));
        bad.uv.left = 0.5;
        bad.uv.bottom = f64::INFINITY;
        assert!(matches!(
            update_cell(&old, 1, 1, bad),
            Err(EditError::InvalidDimension(_))
        ));
    }

    #[test]
    fn resize_ragged_grid_fills_missing_cells() {
        let map: MapData = rpgedit_schema::parse_str(
            r#"{"image":"","tiles":[
                [{"uv":{"left":0.1,"top":0,"right":1,"bottom":1}},
                 {"uv":{"left":0.2,"top":0,"right":1,"bottom":1}}],
                [{"uv":{"left":0.3,"top":0,"right":1,"bottom":1}}]
            ]}"#,
        )
        .unwrap();
        assert_eq!(map.cols(), 2);
        assert_eq!(map.tiles[1].len(), 1);

        let m = resized(&map, 2, 3);
        assert!(m.tiles.iter().all(|row| row.len() == 3));
        assert_eq!(m.tiles[0][1], map.tiles[0][1]);
        assert_eq!(m.tiles[1][0], map.tiles[1][0]);
        assert_eq!(m.tiles[1][1], MapTileData::default());
        assert_eq!(m.tiles[1][2], MapTileData::default());
    }

    #[test]
    fn set_image_keeps_tiles() {
        let old = numbered();
        let m = set_image(&old, "other.png");
        assert_eq!(m.image, "other.png");
        assert_eq!(m.tiles, old.tiles);
    }

    #[test]
    fn selection_clamps_after_shrink() {
        let small = resized(&numbered(), 1, 1);
        let sel = CellSelection::new(1, 2).clamp_to(&small);
        assert_eq!(sel, CellSelection::new(0, 0));
        assert!(sel.tile(&small).is_some());
    }
}
