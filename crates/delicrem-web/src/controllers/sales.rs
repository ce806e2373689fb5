//! Sales page: card grid, search by customer, create with line items, status updates

use super::{PageController, PageView, REQUIRED_FIELDS_MESSAGE, describe_selected};
use crate::api_client::DashboardApi;
use crate::list::ListView;
use crate::notify::{Notice, Notifier};
use crate::session::{self, DetailDialog, EditSession};
use delicrem_core::{Error, LineField, Result, Sale, SaleDraft, StatusPayload};
use tracing::{debug, error, info, warn};

/// State and actions of the sales page
///
/// Sales are never edited or deleted; only their status changes.
#[derive(Debug)]
pub struct SalesController<A, N> {
    api: A,
    notifier: N,
    list: ListView<Sale>,
    editor: EditSession<SaleDraft>,
    details: DetailDialog<Sale>,
}

impl<A: DashboardApi, N: Notifier> SalesController<A, N> {
    /// Empty page showing `page_size` sales per page
    pub fn new(api: A, notifier: N, page_size: usize) -> Self {
        Self {
            api,
            notifier,
            list: ListView::new(page_size),
            editor: EditSession::new(),
            details: DetailDialog::default(),
        }
    }

    /// Refetch every sale; on failure the previous list stays
    pub async fn reload(&mut self) {
        match self.api.list_sales().await {
            Ok(sales) => {
                debug!(count = sales.len(), "sales loaded");
                self.list.replace_items(sales);
            }
            Err(e) => error!("Error fetching ventas: {e}"),
        }
    }

    /// Loaded list with search and page state
    pub const fn list(&self) -> &ListView<Sale> {
        &self.list
    }

    /// Form dialog state
    pub const fn editor(&self) -> &EditSession<SaleDraft> {
        &self.editor
    }

    /// Filter by customer name
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.list.set_query(query);
    }

    /// Select a page
    pub fn go_to_page(&mut self, page: usize) {
        self.list.go_to_page(page);
    }

    /// Open the form with a blank sale
    pub fn open_create(&mut self) {
        self.editor.open_create();
    }

    /// Close the form, discarding the draft
    pub fn close_editor(&mut self) {
        self.editor.close();
    }

    /// Draft for direct field edits
    pub const fn draft_mut(&mut self) -> &mut SaleDraft {
        self.editor.draft_mut()
    }

    /// Append a blank line item
    pub fn add_line(&mut self) {
        session::add_line(&mut self.editor.draft_mut().lines);
    }

    /// Remove the line item at `index`
    pub fn remove_line(&mut self, index: usize) {
        session::remove_line(&mut self.editor.draft_mut().lines, index);
    }

    /// Edit one cell of a line item
    pub fn edit_line(&mut self, index: usize, field: LineField, raw: &str) {
        session::edit_line(&mut self.editor.draft_mut().lines, index, field, raw);
    }

    /// Show the detail dialog for `sale`
    pub fn view_details(&mut self, sale: &Sale) {
        self.details.open(sale.clone());
    }

    /// Hide the detail dialog
    pub fn close_details(&mut self) {
        self.details.close();
    }

    /// Submit the form as a new sale
    ///
    /// # Errors
    ///
    /// Returns the validation or request error after notifying the user.
    pub async fn save(&mut self) -> Result<()> {
        if !self.editor.is_open() {
            debug!("sale save ignored, dialog already closed");
            return Ok(());
        }
        let payload = match self.editor.draft().to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%e, "sale form rejected");
                self.notifier
                    .notify(Notice::error("Error", REQUIRED_FIELDS_MESSAGE));
                return Err(e);
            }
        };

        match self.api.create_sale(&payload).await {
            Ok(()) => {
                self.notifier.notify(Notice::success(
                    "¡Creación exitosa!",
                    "La venta ha sido creada correctamente.",
                ));
                self.reload().await;
                self.editor.close();
                Ok(())
            }
            Err(e) => {
                error!("Error saving venta: {e}");
                self.notifier.notify(Notice::error(
                    "Error",
                    "Hubo un problema al guardar la venta.",
                ));
                Err(e)
            }
        }
    }

    /// Ask for a new status and apply it; `Ok(false)` when cancelled
    ///
    /// # Errors
    ///
    /// Returns the request error after notifying the user.
    pub async fn update_status(&mut self, sale: &Sale) -> Result<bool> {
        let Some(id) = sale.id else {
            return Err(Error::NotFound {
                resource: "venta sin identificador".to_string(),
            });
        };
        let Some(estado) = self.notifier.select_status("Actualizar Estado") else {
            return Ok(false);
        };

        match self
            .api
            .update_sale_status(id, &StatusPayload { estado })
            .await
        {
            Ok(()) => {
                info!(id, %estado, "sale status updated");
                self.notifier.notify(Notice::success(
                    "¡Actualización exitosa!",
                    "El estado de la venta ha sido actualizado.",
                ));
                self.reload().await;
                Ok(true)
            }
            Err(e) => {
                error!("Error updating estado: {e}");
                self.notifier.notify(Notice::error(
                    "Error",
                    "Hubo un problema al actualizar el estado de la venta.",
                ));
                Err(e)
            }
        }
    }
}

impl<A, N> PageController for SalesController<A, N> {
    type View = PageView<Sale, SaleDraft>;

    fn view(&self) -> Self::View {
        PageView::capture(&self.list, &self.editor, describe_selected(&self.details))
    }
}
