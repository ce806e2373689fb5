//! Reusable UI components

pub mod detail_modal;
pub mod form_field;
pub mod line_items;
pub mod pagination;
pub mod search_box;

pub use detail_modal::DetailModal;
pub use form_field::{CheckboxField, FormField, StatusSelect};
pub use line_items::LineItemsEditor;
pub use pagination::Pagination;
pub use search_box::SearchBox;
