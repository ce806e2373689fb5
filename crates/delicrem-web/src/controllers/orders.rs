//! Orders page: card grid, search by customer, create/edit with line items, delete

use super::{PageController, PageView, REQUIRED_FIELDS_MESSAGE, describe_selected};
use crate::api_client::DashboardApi;
use crate::list::ListView;
use crate::notify::{Notice, Notifier};
use crate::session::{self, DetailDialog, EditSession, SessionMode};
use delicrem_core::{Error, LineField, Order, OrderDraft, Result};
use tracing::{debug, error, warn};

/// State and actions of the orders page
#[derive(Debug)]
pub struct OrdersController<A, N> {
    api: A,
    notifier: N,
    list: ListView<Order>,
    editor: EditSession<OrderDraft>,
    details: DetailDialog<Order>,
}

impl<A: DashboardApi, N: Notifier> OrdersController<A, N> {
    /// Empty page showing `page_size` orders per page
    pub fn new(api: A, notifier: N, page_size: usize) -> Self {
        Self {
            api,
            notifier,
            list: ListView::new(page_size),
            editor: EditSession::new(),
            details: DetailDialog::default(),
        }
    }

    /// Refetch every order; on failure the previous list stays
    pub async fn reload(&mut self) {
        match self.api.list_orders().await {
            Ok(orders) => {
                debug!(count = orders.len(), "orders loaded");
                self.list.replace_items(orders);
            }
            Err(e) => error!("Error fetching pedidos: {e}"),
        }
    }

    /// Loaded list with search and page state
    pub const fn list(&self) -> &ListView<Order> {
        &self.list
    }

    /// Form dialog state
    pub const fn editor(&self) -> &EditSession<OrderDraft> {
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

    /// Open the form with a blank order
    pub fn open_create(&mut self) {
        self.editor.open_create();
    }

    /// Open the form seeded with `order`
    pub fn open_edit(&mut self, order: &Order) {
        self.editor.open_edit(OrderDraft::from(order));
    }

    /// Close the form, discarding the draft
    pub fn close_editor(&mut self) {
        self.editor.close();
    }

    /// Draft for direct field edits
    pub const fn draft_mut(&mut self) -> &mut OrderDraft {
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

    /// Show the detail dialog for `order`
    pub fn view_details(&mut self, order: &Order) {
        self.details.open(order.clone());
    }

    /// Hide the detail dialog
    pub fn close_details(&mut self) {
        self.details.close();
    }

    /// Submit the form
    ///
    /// Incomplete drafts are rejected locally with no request sent. On success
    /// the list is refetched and the dialog closes; on failure it stays open.
    /// A save queued behind one that already closed the dialog does nothing.
    ///
    /// # Errors
    ///
    /// Returns the validation or request error after notifying the user.
    pub async fn save(&mut self) -> Result<()> {
        if !self.editor.is_open() {
            debug!("order save ignored, dialog already closed");
            return Ok(());
        }
        let payload = match self.editor.draft().to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%e, "order form rejected");
                self.notifier
                    .notify(Notice::error("Error", REQUIRED_FIELDS_MESSAGE));
                return Err(e);
            }
        };

        let result = match (self.editor.mode(), self.editor.draft().id) {
            (SessionMode::Edit, Some(id)) => self.api.update_order(id, &payload).await.map(|()| {
                Notice::success(
                    "¡Actualización exitosa!",
                    "El pedido ha sido actualizado correctamente.",
                )
            }),
            (SessionMode::Edit, None) => Err(Error::NotFound {
                resource: "pedido sin identificador".to_string(),
            }),
            (SessionMode::Create, _) => self.api.create_order(&payload).await.map(|()| {
                Notice::success("¡Creación exitosa!", "El pedido ha sido creado correctamente.")
            }),
        };

        match result {
            Ok(notice) => {
                self.notifier.notify(notice);
                self.reload().await;
                self.editor.close();
                Ok(())
            }
            Err(e) => {
                error!("Error saving pedido: {e}");
                self.notifier
                    .notify(Notice::error("Error", "Hubo un problema al guardar el pedido."));
                Err(e)
            }
        }
    }

    /// Delete `order` after confirmation; `Ok(false)` when the user declines
    ///
    /// # Errors
    ///
    /// Returns the request error after notifying the user.
    pub async fn delete(&mut self, order: &Order) -> Result<bool> {
        let Some(id) = order.id else {
            return Err(Error::NotFound {
                resource: "pedido sin identificador".to_string(),
            });
        };
        let question = format!(
            "¿Estás seguro de que deseas eliminar el pedido de {}?",
            order.customer.name
        );
        if !self.notifier.confirm("¿Estás seguro?", &question) {
            return Ok(false);
        }

        match self.api.delete_order(id).await {
            Ok(()) => {
                self.reload().await;
                self.notifier
                    .notify(Notice::success("¡Eliminado!", "El pedido ha sido eliminado."));
                Ok(true)
            }
            Err(e) => {
                error!("Error deleting pedido: {e}");
                self.notifier.notify(Notice::error(
                    "Error",
                    "Hubo un problema al eliminar el pedido.",
                ));
                Err(e)
            }
        }
    }
}

impl<A, N> PageController for OrdersController<A, N> {
    type View = PageView<Order, OrderDraft>;

    fn view(&self) -> Self::View {
        PageView::capture(&self.list, &self.editor, describe_selected(&self.details))
    }
}
