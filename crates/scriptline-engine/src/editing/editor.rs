use crate::editing::{
    Classification, Cmd, DEFAULT_PAGE_HEIGHT, Document, EditError, EditorKey, FocusController,
    Geometry, KeyOutcome, Line, PageBreakSet, PaginationError, Paginator, Patch, RenderSurface,
    Snapshot, commands,
};

/// Tunables supplied when an editor is mounted
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    /// Page budget in the same unit as the measured line heights
    pub page_height: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            page_height: DEFAULT_PAGE_HEIGHT,
        }
    }
}

/// The screenplay editing engine.
///
/// Owns the document, focus state and page breaks. Events are processed one
/// at a time, each running to completion:
///
/// 1. the command mutates the [`Document`]
/// 2. focus moves (queuing a caret request) and the class indicator is
///    notified if the active line's classification changed
/// 3. on the next [`Editor::paint`], page breaks are recomputed from fresh
///    geometry and the queued caret request is delivered
///
/// ```rust
/// use scriptline_engine::editing::{Classification, Cmd, Editor, EditorKey, EditorSettings};
///
/// let mut editor = Editor::new(Vec::new(), &EditorSettings::default(), ()).unwrap();
/// editor.handle_key(EditorKey::NewLine).unwrap();
/// editor
///     .apply(Cmd::MutateContent { index: 0, text: "INT. ROOM".to_string() })
///     .unwrap();
///
/// let snapshot = editor.snapshot();
/// assert_eq!(snapshot.lines[0].content, "INT. ROOM");
/// assert_eq!(snapshot.lines[1].classification, Classification::Action);
/// assert_eq!(editor.active_index(), 1);
/// ```
pub struct Editor<S: RenderSurface = ()> {
    document: Document,
    focus: FocusController,
    paginator: Paginator,
    surface: S,
    version: u64,
    /// Set by every document change, cleared when a paint recomputes pages
    layout_dirty: bool,
}

impl<S: RenderSurface> Editor<S> {
    /// Mount an editor on loaded lines (an empty load becomes one scene heading)
    pub fn new(
        lines: Vec<Line>,
        settings: &EditorSettings,
        surface: S,
    ) -> Result<Self, PaginationError> {
        let mut editor = Self {
            document: Document::from_lines(lines),
            focus: FocusController::new(),
            paginator: Paginator::new(settings.page_height)?,
            surface,
            version: 0,
            layout_dirty: true,
        };
        editor.sync_indicator();
        log::debug!(
            "Mounted editor with {} lines, page height {}",
            editor.document.len(),
            settings.page_height
        );
        Ok(editor)
    }

    /// Replace the whole screenplay, e.g. after opening another one
    pub fn load(&mut self, lines: Vec<Line>) {
        self.document.replace_all(lines);
        self.focus.reset();
        self.version += 1;
        self.layout_dirty = true;
        self.sync_indicator();
        log::debug!("Loaded {} lines", self.document.len());
    }

    /// Apply a command to the document.
    ///
    /// Defined no-ops return a patch for which [`Patch::is_noop`] is true.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let active = self.focus.active_index();
        let edit = match commands::execute(&mut self.document, active, &cmd) {
            Ok(Some(edit)) => edit,
            Ok(None) => {
                log::debug!("{cmd:?} left the screenplay unchanged");
                return Ok(Patch::unchanged(self.version));
            }
            Err(e) => {
                log::warn!("Rejected {cmd:?}: {e}");
                return Err(e);
            }
        };

        if edit.modified() {
            self.version += 1;
            self.layout_dirty = true;
        }
        if let Some(request) = edit.focus {
            self.focus.move_to(request);
        }
        if edit.structural {
            self.focus.clamp(self.document.len());
        }
        self.sync_indicator();

        log::debug!(
            "Applied {cmd:?}: version {}, active line {}",
            self.version,
            self.focus.active_index()
        );

        Ok(Patch {
            changed: edit.changed,
            structural: edit.structural,
            focus: edit.focus,
            version: self.version,
        })
    }

    /// Interpret a structural key against the active line
    pub fn handle_key(&mut self, key: EditorKey) -> Result<KeyOutcome, EditError> {
        let patch = self.apply(key.command(self.focus.active_index()))?;
        if patch.is_noop() {
            Ok(KeyOutcome::PassThrough)
        } else {
            Ok(KeyOutcome::Handled(patch))
        }
    }

    /// Class chosen on the external selector, applied to the active line
    pub fn select_class(&mut self, class: Classification) -> Result<Patch, EditError> {
        self.apply(Cmd::SetClassFromExternal { class })
    }

    /// Called by the rendering layer after it has painted.
    ///
    /// Recomputes page breaks if the document changed since the last paint,
    /// notifying the surface only when they differ, then delivers any pending
    /// caret request. Returns whether the breaks changed.
    pub fn paint(&mut self, geometry: &Geometry) -> bool {
        let mut changed = false;
        if self.layout_dirty {
            self.layout_dirty = false;
            changed = self.paginator.recompute(self.document.len(), geometry);
            if changed {
                log::debug!("Page breaks now {:?}", self.paginator.breaks().as_slice());
                self.surface.page_breaks_changed(self.paginator.breaks());
            }
        }
        if let Some(request) = self.focus.take_caret_request() {
            self.surface.place_caret(request);
        }
        changed
    }

    /// Force the next paint to repaginate, e.g. after the viewport was resized
    pub fn invalidate_layout(&mut self) {
        self.layout_dirty = true;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            lines: self.document.lines().to_vec(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn active_index(&self) -> usize {
        self.focus.active_index()
    }

    pub fn caret_at_end(&self) -> bool {
        self.focus.caret_at_end()
    }

    pub fn active_line(&self) -> &Line {
        &self.document.lines()[self.focus.active_index()]
    }

    pub fn page_breaks(&self) -> &PageBreakSet {
        self.paginator.breaks()
    }

    pub fn page_height(&self) -> f64 {
        self.paginator.page_height()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn sync_indicator(&mut self) {
        let class = self.active_line().classification;
        if let Some(class) = self.focus.sync_indicator(class) {
            self.surface.active_classification_changed(class);
        }
    }
}
