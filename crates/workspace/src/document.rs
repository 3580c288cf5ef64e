use rpgedit_author::{CellSelection, EditError, Resize, Selection, actor, map};
use rpgedit_host::{DocumentId, Host};
use rpgedit_schema::{
    ActorData, AnimationState, AssetKind, Direction, MapData, MapTileData, UvFuncPoint,
};
use rpgedit_session::{EditSession, SessionError};

/// An open map together with the cell selected in the inspector.
#[derive(Debug)]
pub struct MapDocument {
    pub session: EditSession<MapData>,
    pub selection: CellSelection,
}

impl MapDocument {
    pub fn new(session: EditSession<MapData>) -> Self {
        Self {
            session,
            selection: CellSelection::default(),
        }
    }

    pub fn data(&self) -> &MapData {
        self.session.data()
    }

    /// Resize the grid. Returns false when the size did not change.
    pub fn resize(
        &mut self,
        host: &mut impl Host,
        rows: usize,
        cols: usize,
    ) -> Result<bool, EditError> {
        match map::resize(self.session.data(), rows, cols)? {
            Resize::Unchanged => Ok(false),
            Resize::Resized(next) => {
                self.selection = self.selection.clamp_to(&next);
                self.session.mutate(host, next);
                Ok(true)
            }
        }
    }

    pub fn select_cell(&mut self, row: usize, col: usize) -> Result<(), EditError> {
        let data = self.session.data();
        if row >= data.rows() {
            return Err(EditError::IndexOutOfRange {
                target: "row",
                index: row,
                len: data.rows(),
            });
        }
        if col >= data.cols() {
            return Err(EditError::IndexOutOfRange {
                target: "column",
                index: col,
                len: data.cols(),
            });
        }
        self.selection = CellSelection::new(row, col);
        Ok(())
    }

    pub fn selected_tile(&self) -> Option<&MapTileData> {
        self.selection.tile(self.session.data())
    }

    pub fn update_selected_cell(
        &mut self,
        host: &mut impl Host,
        tile: MapTileData,
    ) -> Result<(), EditError> {
        let CellSelection { row, col } = self.selection;
        self.session
            .update(host, |data| map::update_cell(data, row, col, tile))
    }

    pub fn set_image(&mut self, host: &mut impl Host, image: &str) {
        let next = map::set_image(self.session.data(), image);
        self.session.mutate(host, next);
    }
}

/// An open actor together with the keyframe selected in the inspector.
#[derive(Debug)]
pub struct ActorDocument {
    pub session: EditSession<ActorData>,
    pub selection: Selection,
}

impl ActorDocument {
    pub fn new(session: EditSession<ActorData>) -> Self {
        Self {
            session,
            selection: Selection::default(),
        }
    }

    pub fn data(&self) -> &ActorData {
        self.session.data()
    }

    pub fn select(&mut self, state: AnimationState, direction: Direction) {
        self.selection = Selection::select(state, direction);
    }

    pub fn select_keyframe(&mut self, index: usize) -> Result<(), EditError> {
        let len = self
            .session
            .data()
            .keyframes(self.selection.state, self.selection.direction)
            .len();
        if index >= len {
            return Err(EditError::IndexOutOfRange {
                target: "keyframe",
                index,
                len,
            });
        }
        self.selection = self.selection.with_index(index);
        Ok(())
    }

    pub fn selected_point(&self) -> Option<&UvFuncPoint> {
        self.selection.point(self.session.data())
    }

    pub fn add_keyframe(
        &mut self,
        host: &mut impl Host,
        state: AnimationState,
        direction: Direction,
    ) {
        let next = actor::add_keyframe(self.session.data(), state, direction);
        self.session.mutate(host, next);
    }

    pub fn update_selected_keyframe(
        &mut self,
        host: &mut impl Host,
        point: UvFuncPoint,
    ) -> Result<(), EditError> {
        let Selection {
            state,
            direction,
            index,
        } = self.selection;
        self.session.update(host, |data| {
            actor::update_keyframe(data, state, direction, index, point)
        })
    }

    pub fn add_event(
        &mut self,
        host: &mut impl Host,
        name: &str,
        code: &str,
    ) -> Result<(), EditError> {
        self.session
            .update(host, |data| actor::add_event(data, name, code))
    }

    pub fn edit_event_code(
        &mut self,
        host: &mut impl Host,
        index: usize,
        code: &str,
    ) -> Result<(), EditError> {
        self.session
            .update(host, |data| actor::edit_event_code(data, index, code))
    }

    pub fn set_image(&mut self, host: &mut impl Host, image: &str) {
        let next = actor::set_image(self.session.data(), image);
        self.session.mutate(host, next);
    }

    pub fn set_frame_size(
        &mut self,
        host: &mut impl Host,
        width: f64,
        height: f64,
    ) -> Result<(), EditError> {
        self.session
            .update(host, |data| actor::set_frame_size(data, width, height))
    }
}

/// The document shown in the editing area.
#[derive(Debug)]
pub enum ActiveDocument {
    Map(MapDocument),
    Actor(ActorDocument),
}

impl ActiveDocument {
    pub fn kind(&self) -> AssetKind {
        match self {
            ActiveDocument::Map(_) => AssetKind::Map,
            ActiveDocument::Actor(_) => AssetKind::Actor,
        }
    }

    pub fn id(&self) -> DocumentId {
        match self {
            ActiveDocument::Map(d) => d.session.id(),
            ActiveDocument::Actor(d) => d.session.id(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ActiveDocument::Map(d) => d.session.path(),
            ActiveDocument::Actor(d) => d.session.path(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            ActiveDocument::Map(d) => d.session.title(),
            ActiveDocument::Actor(d) => d.session.title(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            ActiveDocument::Map(d) => d.session.is_dirty(),
            ActiveDocument::Actor(d) => d.session.is_dirty(),
        }
    }

    pub fn save(&mut self, host: &mut impl Host) -> Result<(), SessionError> {
        match self {
            ActiveDocument::Map(d) => d.session.save(host),
            ActiveDocument::Actor(d) => d.session.save(host),
        }
    }

    pub fn request_close(&self, host: &mut impl Host) -> bool {
        match self {
            ActiveDocument::Map(d) => d.session.request_close(host),
            ActiveDocument::Actor(d) => d.session.request_close(host),
        }
    }

    pub fn undo(&mut self, host: &mut impl Host) -> bool {
        match self {
            ActiveDocument::Map(d) => {
                let undone = d.session.undo(host);
                d.selection = d.selection.clamp_to(d.session.data());
                undone
            }
            ActiveDocument::Actor(d) => {
                let undone = d.session.undo(host);
                d.selection = Selection::select(d.selection.state, d.selection.direction);
                undone
            }
        }
    }

    pub fn redo(&mut self, host: &mut impl Host) -> bool {
        match self {
            ActiveDocument::Map(d) => {
                let redone = d.session.redo(host);
                d.selection = d.selection.clamp_to(d.session.data());
                redone
            }
            ActiveDocument::Actor(d) => {
                let redone = d.session.redo(host);
                d.selection = Selection::select(d.selection.state, d.selection.direction);
                redone
            }
        }
    }
}
