use crate::config::EditorConfig;
use crate::document::{ActiveDocument, ActorDocument, MapDocument};
use crate::event::{CloseDecision, EventOutcome, Exporter, HostEvent};
use rpgedit_author::EditError;
use rpgedit_host::{Host, HostError, join_path};
use rpgedit_project::{Manifest, ManifestError};
use rpgedit_schema::{ActorData, AssetKind, MapData, SchemaError};
use rpgedit_session::{EditSession, SessionError};

/// Errors from workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("no workspace is open")]
    NoWorkspace,
    #[error("no document is open")]
    NoDocument,
    #[error("the open document is a {found}, not a {expected}")]
    WrongKind {
        expected: AssetKind,
        found: AssetKind,
    },
    #[error("{0} is not listed in the workspace")]
    NotInManifest(String),
    #[error("{0} is already listed in the workspace")]
    DuplicateAsset(String),
    #[error("cancelled: unsaved changes were kept")]
    Cancelled,
    #[error("no exporter is configured")]
    NoExporter,
    #[error("export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Io(#[from] HostError),
}

/// An open workspace folder.
#[derive(Debug, Clone)]
struct Workspace {
    root: String,
    manifest: Manifest,
}

/// Top-level state of one editor window.
///
/// States: no workspace, workspace with no document, workspace with one
/// clean or dirty document. Everything that would drop a dirty document
/// first asks [`ActiveDocument::request_close`].
pub struct WorkspaceController<H: Host> {
    host: H,
    config: EditorConfig,
    workspace: Option<Workspace>,
    active: Option<ActiveDocument>,
    exporter: Option<Box<dyn Exporter>>,
}

impl<H: Host> WorkspaceController<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, EditorConfig::default())
    }

    pub fn with_config(host: H, config: EditorConfig) -> Self {
        Self {
            host,
            config,
            workspace: None,
            active: None,
            exporter: None,
        }
    }

    /// Attach the build step run on [`HostEvent::Export`].
    pub fn with_exporter(mut self, exporter: impl Exporter + 'static) -> Self {
        self.exporter = Some(Box::new(exporter));
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn root(&self) -> Option<&str> {
        self.workspace.as_ref().map(|w| w.root.as_str())
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.workspace.as_ref().map(|w| &w.manifest)
    }

    pub fn active(&self) -> Option<&ActiveDocument> {
        self.active.as_ref()
    }

    /// Title of the active document, if any.
    pub fn active_title(&self) -> Option<String> {
        self.active.as_ref().map(ActiveDocument::title)
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: HostEvent) -> Result<EventOutcome, WorkspaceError> {
        match event {
            HostEvent::OpenWorkspace { path, body } => {
                self.open_workspace(&path, Some(body.as_str()))?
            }
            HostEvent::OpenDocument { path, body } => self.open_document_body(&path, &body)?,
            HostEvent::Save => self.save()?,
            HostEvent::Export => self.export()?,
            HostEvent::WindowClosing => return Ok(EventOutcome::Close(self.window_closing())),
        }
        Ok(EventOutcome::Done)
    }

    /// Whether the active document may be discarded.
    pub fn request_close(&mut self) -> bool {
        match &self.active {
            Some(doc) => doc.request_close(&mut self.host),
            None => true,
        }
    }

    pub fn window_closing(&mut self) -> CloseDecision {
        let decision = CloseDecision::from(self.request_close());
        tracing::info!(?decision, "window closing");
        decision
    }

    /// Replace the open workspace with the folder at `root`.
    ///
    /// `body` is the manifest content; `None` means the folder has no
    /// manifest yet and starts empty.
    pub fn open_workspace(&mut self, root: &str, body: Option<&str>) -> Result<(), WorkspaceError> {
        let _span = tracing::info_span!("open_workspace", root).entered();
        self.gate()?;
        let manifest = match body {
            Some(body) => match Manifest::parse_str(body) {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!("rejected workspace: {e}");
                    self.host.notify(&format!("{root} is not a valid workspace."));
                    return Err(e.into());
                }
            },
            None => Manifest::default(),
        };
        tracing::info!(
            maps = manifest.maps.len(),
            actors = manifest.actors.len(),
            "workspace opened"
        );
        self.drop_active();
        self.workspace = Some(Workspace {
            root: root.to_string(),
            manifest,
        });
        Ok(())
    }

    /// Read the manifest under `root` through the host, then open it.
    pub fn load_workspace(&mut self, root: &str) -> Result<(), WorkspaceError> {
        let path = join_path(root, &self.config.manifest_file_name);
        match self.host.read_file(&path) {
            Ok(body) => self.open_workspace(root, Some(body.as_str())),
            Err(HostError::NotFound(_)) => self.open_workspace(root, None),
            Err(e) => {
                self.host.notify(&e.to_string());
                Err(e.into())
            }
        }
    }

    /// Open a listed asset, reading it through the host.
    pub fn open_document(&mut self, kind: AssetKind, relative: &str) -> Result<(), WorkspaceError> {
        let root = self.require_workspace()?.root.clone();
        self.gate()?;
        let path = join_path(&root, relative);
        let body = match self.host.read_file(&path) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%path, "read failed: {e}");
                self.host.notify(&e.to_string());
                return Err(e.into());
            }
        };
        self.load_document(kind, path, &body)
    }

    /// Open an asset whose content the host already read.
    pub fn open_document_body(&mut self, relative: &str, body: &str) -> Result<(), WorkspaceError> {
        let workspace = self.require_workspace()?;
        let kind = workspace
            .manifest
            .kind_of(relative)
            .ok_or_else(|| WorkspaceError::NotInManifest(relative.to_string()))?;
        let path = join_path(&workspace.root, relative);
        self.gate()?;
        self.load_document(kind, path, body)
    }

    /// Drop the active document, asking first if it is dirty.
    pub fn close_document(&mut self) -> Result<(), WorkspaceError> {
        self.gate()?;
        self.drop_active();
        Ok(())
    }

    /// Create a new asset file with default content and list it.
    pub fn new_asset(&mut self, kind: AssetKind, relative: &str) -> Result<(), WorkspaceError> {
        let Some(workspace) = self.workspace.as_ref() else {
            return Err(WorkspaceError::NoWorkspace);
        };
        if relative.is_empty() {
            self.host.notify("File name must not be empty.");
            return Err(EditError::InvalidName.into());
        }
        if workspace.manifest.contains(kind, relative) {
            return Err(WorkspaceError::DuplicateAsset(relative.to_string()));
        }
        let root = workspace.root.clone();
        let next = workspace.manifest.add_asset(kind, relative);

        let path = join_path(&root, relative);
        let body = kind.default_body()?;
        if let Err(e) = self.host.create_file(&path, &body) {
            tracing::error!(%path, "create failed: {e}");
            self.host.notify(&format!("Failed to create {path}."));
            return Err(e.into());
        }
        tracing::info!(%kind, %path, "asset created");

        let manifest_json = next.to_json()?;
        if let Some(workspace) = self.workspace.as_mut() {
            workspace.manifest = next;
        }
        let manifest_path = join_path(&root, &self.config.manifest_file_name);
        if let Err(e) = self.host.write_file(&manifest_path, &manifest_json) {
            tracing::error!(path = %manifest_path, "manifest write failed: {e}");
            self.host.notify("Failed to save the project.");
        }
        Ok(())
    }

    /// Save the active document.
    pub fn save(&mut self) -> Result<(), WorkspaceError> {
        let doc = self.active.as_mut().ok_or(WorkspaceError::NoDocument)?;
        doc.save(&mut self.host)?;
        Ok(())
    }

    /// Hand the workspace to the configured build step.
    pub fn export(&mut self) -> Result<(), WorkspaceError> {
        let Some(workspace) = self.workspace.as_ref() else {
            tracing::debug!("export ignored without a workspace");
            return Err(WorkspaceError::NoWorkspace);
        };
        let Some(exporter) = self.exporter.as_mut() else {
            self.host.notify("No build step is configured.");
            return Err(WorkspaceError::NoExporter);
        };
        let _span = tracing::info_span!("export", root = %workspace.root).entered();
        if let Err(e) = exporter.export(&workspace.root, &workspace.manifest) {
            tracing::error!("export failed: {e}");
            self.host.notify(&format!("Export failed: {e}"));
            return Err(WorkspaceError::Export(e.0));
        }
        tracing::info!("export finished");
        Ok(())
    }

    pub fn undo(&mut self) -> Result<bool, WorkspaceError> {
        let doc = self.active.as_mut().ok_or(WorkspaceError::NoDocument)?;
        Ok(doc.undo(&mut self.host))
    }

    pub fn redo(&mut self) -> Result<bool, WorkspaceError> {
        let doc = self.active.as_mut().ok_or(WorkspaceError::NoDocument)?;
        Ok(doc.redo(&mut self.host))
    }

    /// Run an edit against the active map.
    pub fn edit_map<R>(
        &mut self,
        edit: impl FnOnce(&mut MapDocument, &mut H) -> Result<R, EditError>,
    ) -> Result<R, WorkspaceError> {
        match self.active.as_mut() {
            Some(ActiveDocument::Map(doc)) => Ok(edit(doc, &mut self.host)?),
            Some(other) => Err(WorkspaceError::WrongKind {
                expected: AssetKind::Map,
                found: other.kind(),
            }),
            None => Err(WorkspaceError::NoDocument),
        }
    }

    /// Run an edit against the active actor.
    pub fn edit_actor<R>(
        &mut self,
        edit: impl FnOnce(&mut ActorDocument, &mut H) -> Result<R, EditError>,
    ) -> Result<R, WorkspaceError> {
        match self.active.as_mut() {
            Some(ActiveDocument::Actor(doc)) => Ok(edit(doc, &mut self.host)?),
            Some(other) => Err(WorkspaceError::WrongKind {
                expected: AssetKind::Actor,
                found: other.kind(),
            }),
            None => Err(WorkspaceError::NoDocument),
        }
    }

    fn require_workspace(&self) -> Result<&Workspace, WorkspaceError> {
        self.workspace.as_ref().ok_or(WorkspaceError::NoWorkspace)
    }

    /// Forget the active document and blank the title it owned.
    fn drop_active(&mut self) {
        if self.active.take().is_some() {
            self.host.set_window_title("");
        }
    }

    /// Unsaved-changes gate shared by every replacing action.
    fn gate(&mut self) -> Result<(), WorkspaceError> {
        if self.request_close() {
            Ok(())
        } else {
            Err(WorkspaceError::Cancelled)
        }
    }

    fn load_document(
        &mut self,
        kind: AssetKind,
        path: String,
        body: &str,
    ) -> Result<(), WorkspaceError> {
        let _span = tracing::info_span!("open_document", %kind, %path).entered();
        let doc = match kind {
            AssetKind::Map => rpgedit_schema::parse_str::<MapData>(body).map(|data| {
                let session = EditSession::open(&mut self.host, data, &path)
                    .with_history_depth(self.config.history_depth);
                ActiveDocument::Map(MapDocument::new(session))
            }),
            AssetKind::Actor => rpgedit_schema::parse_str::<ActorData>(body).map(|data| {
                let session = EditSession::open(&mut self.host, data, &path)
                    .with_history_depth(self.config.history_depth);
                ActiveDocument::Actor(ActorDocument::new(session))
            }),
        };
        match doc {
            Ok(doc) => {
                self.active = Some(doc);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("rejected document: {e}");
                self.host.notify(&format!("{path} is not valid {kind} data."));
                Err(e.into())
            }
        }
    }
}
