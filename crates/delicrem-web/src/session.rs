//! Modal edit sessions and the line item sub-editor

use delicrem_core::{LineDraft, LineField};
use tracing::debug;

/// Whether a session creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// New record
    #[default]
    Create,
    /// Existing record
    Edit,
}

/// Form dialog state: open flag, mode and the draft being edited
///
/// Opening for create always starts from a fresh draft; closing discards it.
#[derive(Debug, Clone, Default)]
pub struct EditSession<D> {
    mode: SessionMode,
    open: bool,
    draft: D,
}

impl<D: Default> EditSession<D> {
    /// Closed session with an empty draft
    pub fn new() -> Self {
        Self {
            mode: SessionMode::Create,
            open: false,
            draft: D::default(),
        }
    }

    /// Open with a blank draft
    pub fn open_create(&mut self) {
        debug!("opening create dialog");
        self.mode = SessionMode::Create;
        self.draft = D::default();
        self.open = true;
    }

    /// Open seeded with an existing record
    pub fn open_edit(&mut self, draft: D) {
        debug!("opening edit dialog");
        self.mode = SessionMode::Edit;
        self.draft = draft;
        self.open = true;
    }

    /// Close and discard the draft
    pub fn close(&mut self) {
        self.open = false;
        self.draft = D::default();
    }

    /// Whether the dialog is shown
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Create or edit
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Draft being edited
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    /// Mutable draft for field edits
    pub const fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }
}

/// Append a blank row
pub fn add_line<L: LineDraft>(lines: &mut Vec<L>) {
    lines.push(L::default());
}

/// Remove the row at `index`; out-of-range indexes are ignored
pub fn remove_line<L>(lines: &mut Vec<L>, index: usize) -> bool {
    if index < lines.len() {
        lines.remove(index);
        true
    } else {
        false
    }
}

/// Store `raw` in one cell, sanitized for its column
pub fn edit_line<L: LineDraft>(lines: &mut [L], index: usize, field: LineField, raw: &str) -> bool {
    lines.get_mut(index).map(|line| line.set_field(field, raw)).is_some()
}

/// Read-only detail dialog holding the selected record
#[derive(Debug, Clone)]
pub struct DetailDialog<T> {
    selected: Option<T>,
}

impl<T> Default for DetailDialog<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T> DetailDialog<T> {
    /// Show `item`
    pub fn open(&mut self, item: T) {
        self.selected = Some(item);
    }

    /// Hide the dialog
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Record being shown
    pub const fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }
}
