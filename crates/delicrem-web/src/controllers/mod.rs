//! Page controllers: the state and actions behind each dashboard page
//!
//! Controllers are plain Rust over a [`DashboardApi`](crate::api_client::DashboardApi)
//! and a [`Notifier`](crate::notify::Notifier), so every flow can run without a
//! browser. The Leptos pages render the snapshot returned by
//! [`PageController::view`].

pub mod orders;
pub mod products;
pub mod sales;
pub mod users;

pub use orders::OrdersController;
pub use products::ProductsController;
pub use sales::SalesController;
pub use users::{UserRow, UsersController, UsersView};

use crate::detail::DetailView;
use crate::list::{ListView, Searchable};
use crate::session::{DetailDialog, EditSession, SessionMode};

/// Alert shown when a form is submitted with required fields missing
pub const REQUIRED_FIELDS_MESSAGE: &str = "Por favor, complete todos los campos requeridos.";

/// Controller that can be rendered from an owned snapshot
pub trait PageController {
    /// Everything the page renders
    type View: Clone + PartialEq + Send + Sync + 'static;

    /// Current snapshot
    fn view(&self) -> Self::View;
}

/// Open form dialog
#[derive(Debug, Clone, PartialEq)]
pub struct EditorView<D> {
    /// Create or edit
    pub mode: SessionMode,
    /// Current draft
    pub draft: D,
}

/// Snapshot of a list page
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T, D> {
    /// Search box contents
    pub query: String,
    /// Rows on the current page
    pub rows: Vec<T>,
    /// 1-based current page
    pub current_page: usize,
    /// Page numbers to offer
    pub pages: Vec<usize>,
    /// Form dialog, when open
    pub editor: Option<EditorView<D>>,
    /// Detail dialog, when open
    pub details: Option<DetailView>,
}

impl<T, D> Default for PageView<T, D> {
    fn default() -> Self {
        Self {
            query: String::new(),
            rows: Vec::new(),
            current_page: 1,
            pages: Vec::new(),
            editor: None,
            details: None,
        }
    }
}

impl<T: Searchable + Clone, D: Clone + Default> PageView<T, D> {
    fn capture(list: &ListView<T>, editor: &EditSession<D>, details: Option<DetailView>) -> Self {
        Self {
            query: list.query().to_string(),
            rows: list.visible().to_vec(),
            current_page: list.current_page(),
            pages: list.page_numbers(),
            editor: editor.is_open().then(|| EditorView {
                mode: editor.mode(),
                draft: editor.draft().clone(),
            }),
            details,
        }
    }
}

fn describe_selected<T: crate::detail::Describe>(dialog: &DetailDialog<T>) -> Option<DetailView> {
    dialog.selected().map(crate::detail::Describe::describe)
}
