use rpgedit_host::{DocumentId, Host, HostError};
use rpgedit_schema::{Asset, SchemaError};
use std::collections::VecDeque;

/// Question asked before unsaved changes are thrown away.
pub const UNSAVED_PROMPT: &str = "The current file has unsaved changes. Discard them?";

/// Undo entries kept per session unless configured otherwise.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Encode(#[from] SchemaError),
    #[error("failed to save {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: HostError,
    },
}

/// Whether the held document has unsaved changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Clean,
    Dirty,
}

/// One loaded document with dirty tracking and undo/redo.
///
/// Mutations replace the whole value; the previous value goes onto a
/// bounded undo stack. Equality is never checked: replacing a value with an
/// identical one still counts as a change.
#[derive(Debug)]
pub struct EditSession<T: Asset> {
    id: DocumentId,
    path: String,
    data: T,
    dirty: bool,
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    history_depth: usize,
}

impl<T: Asset> EditSession<T> {
    /// Start a session over freshly loaded data.
    pub fn open(host: &mut impl Host, data: T, path: impl Into<String>) -> Self {
        let mut session = Self {
            id: DocumentId::new(),
            path: String::new(),
            data: T::default(),
            dirty: false,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        };
        session.load(host, data, path);
        session
    }

    /// Cap the undo stack. Zero disables undo.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        while self.undo_stack.len() > depth {
            self.undo_stack.pop_front();
        }
        self
    }

    /// Replace the held value with loaded data and start clean.
    pub fn load(&mut self, host: &mut impl Host, data: T, path: impl Into<String>) {
        self.id = DocumentId::new();
        self.path = path.into();
        self.data = data;
        self.dirty = false;
        self.undo_stack.clear();
        self.redo_stack.clear();
        host.set_window_title(&self.title());
        tracing::info!(
            kind = T::KIND.as_str(),
            path = %self.path,
            id = %self.id.short(),
            "document loaded"
        );
    }

    /// Replace the held value and mark the session dirty.
    pub fn mutate(&mut self, host: &mut impl Host, value: T) {
        let previous = std::mem::replace(&mut self.data, value);
        if self.history_depth > 0 {
            self.undo_stack.push_back(previous);
            while self.undo_stack.len() > self.history_depth {
                self.undo_stack.pop_front();
            }
        }
        self.redo_stack.clear();
        self.mark_dirty(host);
    }

    /// Apply a pure edit to the held value and commit the result.
    ///
    /// Nothing changes if `edit` fails.
    pub fn update<E>(
        &mut self,
        host: &mut impl Host,
        edit: impl FnOnce(&T) -> Result<T, E>,
    ) -> Result<(), E> {
        let next = edit(&self.data)?;
        self.mutate(host, next);
        Ok(())
    }

    /// Write the held value through the host.
    pub fn save(&mut self, host: &mut impl Host) -> Result<(), SessionError> {
        let body = rpgedit_schema::serialize(&self.data)?;
        if let Err(source) = host.write_file(&self.path, &body) {
            tracing::error!(path = %self.path, "save failed: {source}");
            host.notify(&format!("Failed to save {}.", self.path));
            return Err(SessionError::Io {
                path: self.path.clone(),
                source,
            });
        }
        self.dirty = false;
        host.set_window_title(&self.title());
        tracing::info!(path = %self.path, bytes = body.len(), "document saved");
        Ok(())
    }

    /// Whether the session may be discarded.
    ///
    /// A clean session answers immediately; a dirty one asks the host.
    pub fn request_close(&self, host: &mut impl Host) -> bool {
        if !self.dirty {
            return true;
        }
        let allowed = host.confirm(UNSAVED_PROMPT);
        if !allowed {
            tracing::info!(path = %self.path, "discard declined");
        }
        allowed
    }

    /// Restore the value before the last mutation. Returns true if one was undone.
    pub fn undo(&mut self, host: &mut impl Host) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.data, previous);
        self.redo_stack.push(current);
        self.mark_dirty(host);
        true
    }

    /// Re-apply the last undone mutation. Returns true if one was redone.
    pub fn redo(&mut self, host: &mut impl Host) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.data, next);
        self.undo_stack.push_back(current);
        self.mark_dirty(host);
        true
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn state(&self) -> SessionState {
        if self.dirty {
            SessionState::Dirty
        } else {
            SessionState::Clean
        }
    }

    /// Window title: the path, prefixed with `* ` while dirty.
    pub fn title(&self) -> String {
        if self.dirty {
            format!("* {}", self.path)
        } else {
            self.path.clone()
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    fn mark_dirty(&mut self, host: &mut impl Host) {
        if self.dirty {
            return;
        }
        self.dirty = true;
        host.set_window_title(&self.title());
        tracing::debug!(path = %self.path, "document dirty");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpgedit_host::MemoryHost;
    use rpgedit_schema::{ActorData, MapData};

    fn open_map(host: &mut MemoryHost) -> EditSession<MapData> {
        EditSession::open(host, MapData::default(), "/w/town.json")
    }

    #[test]
    fn load_is_clean_and_sets_title() {
        let mut host = MemoryHost::new();
        let session = open_map(&mut host);
        assert_eq!(session.state(), SessionState::Clean);
        assert_eq!(host.titles, vec!["/w/town.json"]);
    }

    #[test]
    fn mutate_with_equal_value_still_dirties() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host);
        session.mutate(&mut host, MapData::default());
        assert!(session.is_dirty());
        assert_eq!(host.last_title(), Some("* /w/town.json"));
    }

    #[test]
    fn title_signalled_once_per_dirty_period() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host);
        for _ in 0..3 {
            session.mutate(&mut host, MapData::default());
        }
        assert_eq!(host.titles, vec!["/w/town.json", "* /w/town.json"]);
    }

    #[test]
    fn save_writes_and_cleans() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host);
        let mut map = MapData::default();
        map.image = "tiles.png".into();
        session.mutate(&mut host, map.clone());
        session.save(&mut host).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(host.last_title(), Some("/w/town.json"));
        let written: MapData =
            rpgedit_schema::parse_str(host.file("/w/town.json").unwrap()).unwrap();
        assert_eq!(written, map);
    }

    #[test]
    fn failed_save_stays_dirty_and_notifies() {
        let mut host = MemoryHost::new();
        host.fail_writes = true;
        let mut session = open_map(&mut host);
        session.mutate(&mut host, MapData::default());
        let err = session.save(&mut host).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
        assert!(session.is_dirty());
        assert_eq!(host.notifications.len(), 1);
        assert_eq!(host.last_title(), Some("* /w/town.json"));
    }

    #[test]
    fn save_then_close_never_prompts() {
        let mut host = MemoryHost::new();
        host.confirm_answer = false;
        let mut session = open_map(&mut host);
        session.mutate(&mut host, MapData::default());
        session.save(&mut host).unwrap();
        assert!(session.request_close(&mut host));
        assert!(host.prompts.is_empty());
    }

    #[test]
    fn dirty_close_follows_confirmation() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host);
        session.mutate(&mut host, MapData::default());

        host.confirm_answer = false;
        assert!(!session.request_close(&mut host));
        host.confirm_answer = true;
        assert!(session.request_close(&mut host));
        assert_eq!(host.prompts, vec![UNSAVED_PROMPT, UNSAVED_PROMPT]);
        assert!(session.is_dirty());
    }

    #[test]
    fn reload_resets_dirty_and_identity() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host);
        let first = session.id();
        session.mutate(&mut host, MapData::default());
        session.load(&mut host, MapData::default(), "/w/cave.json");
        assert!(!session.is_dirty());
        assert!(!session.can_undo());
        assert_ne!(session.id(), first);
        assert_eq!(session.path(), "/w/cave.json");
    }

    #[test]
    fn update_commits_only_on_success() {
        let mut host = MemoryHost::new();
        let mut session: EditSession<ActorData> =
            EditSession::open(&mut host, ActorData::default(), "hero.json");
        let failed: Result<(), &str> = session.update(&mut host, |_| Err("nope"));
        assert!(failed.is_err());
        assert!(!session.is_dirty());

        session
            .update(&mut host, |a| {
                let mut next = a.clone();
                next.width = 32.0;
                Ok::<_, &str>(next)
            })
            .unwrap();
        assert!(session.is_dirty());
        assert_eq!(session.data().width, 32.0);
    }

    #[test]
    fn undo_redo_cycle() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host);
        let mut edited = MapData::default();
        edited.image = "a.png".into();
        session.mutate(&mut host, edited.clone());
        session.save(&mut host).unwrap();

        assert!(session.undo(&mut host));
        assert_eq!(session.data(), &MapData::default());
        assert!(session.is_dirty());

        assert!(session.redo(&mut host));
        assert_eq!(session.data(), &edited);
        assert!(!session.redo(&mut host));
    }

    #[test]
    fn new_mutation_clears_redo() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host);
        session.mutate(&mut host, MapData::default());
        session.undo(&mut host);
        assert!(session.can_redo());
        session.mutate(&mut host, MapData::default());
        assert!(!session.can_redo());
    }

    #[test]
    fn history_is_bounded() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host).with_history_depth(2);
        for _ in 0..5 {
            session.mutate(&mut host, MapData::default());
        }
        assert_eq!(session.undo_count(), 2);
    }

    #[test]
    fn undo_empty_returns_false() {
        let mut host = MemoryHost::new();
        let mut session = open_map(&mut host);
        assert!(!session.undo(&mut host));
        assert!(!session.is_dirty());
    }
}
