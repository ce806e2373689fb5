//! Finished products page: table, search by name, create/edit, delete

use super::{PageController, PageView, describe_selected};
use crate::api_client::DashboardApi;
use crate::list::ListView;
use crate::notify::{Notice, Notifier};
use crate::session::{DetailDialog, EditSession, SessionMode};
use delicrem_core::utils::{decimal_only, digits_only};
use delicrem_core::{Error, Product, ProductDraft, Result};
use tracing::{debug, error, warn};

/// State and actions of the products page
#[derive(Debug)]
pub struct ProductsController<A, N> {
    api: A,
    notifier: N,
    list: ListView<Product>,
    editor: EditSession<ProductDraft>,
    details: DetailDialog<Product>,
}

impl<A: DashboardApi, N: Notifier> ProductsController<A, N> {
    /// Empty page showing `page_size` products per page
    pub fn new(api: A, notifier: N, page_size: usize) -> Self {
        Self {
            api,
            notifier,
            list: ListView::new(page_size),
            editor: EditSession::new(),
            details: DetailDialog::default(),
        }
    }

    /// Refetch every product; on failure the previous list stays
    pub async fn reload(&mut self) {
        match self.api.list_products().await {
            Ok(products) => {
                debug!(count = products.len(), "products loaded");
                self.list.replace_items(products);
            }
            Err(e) => error!("Error fetching productos: {e}"),
        }
    }

    /// Loaded list with search and page state
    pub const fn list(&self) -> &ListView<Product> {
        &self.list
    }

    /// Form dialog state
    pub const fn editor(&self) -> &EditSession<ProductDraft> {
        &self.editor
    }

    /// Filter by product name
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.list.set_query(query);
    }

    /// Select a page
    pub fn go_to_page(&mut self, page: usize) {
        self.list.go_to_page(page);
    }

    /// Open the form with a blank product
    pub fn open_create(&mut self) {
        self.editor.open_create();
    }

    /// Open the form seeded with `product`
    pub fn open_edit(&mut self, product: &Product) {
        self.editor.open_edit(ProductDraft::from(product));
    }

    /// Close the form, discarding the draft
    pub fn close_editor(&mut self) {
        self.editor.close();
    }

    /// Set the name field
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.editor.draft_mut().name = name.into();
    }

    /// Set the description field
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.editor.draft_mut().description = description.into();
    }

    /// Set the price field, keeping digits and one decimal point
    pub fn set_price(&mut self, raw: &str) {
        self.editor.draft_mut().price = decimal_only(raw);
    }

    /// Set the stock field, keeping digits only
    pub fn set_stock(&mut self, raw: &str) {
        self.editor.draft_mut().stock = digits_only(raw);
    }

    /// Show the detail dialog for `product`
    pub fn view_details(&mut self, product: &Product) {
        self.details.open(product.clone());
    }

    /// Hide the detail dialog
    pub fn close_details(&mut self) {
        self.details.close();
    }

    /// Submit the form
    ///
    /// # Errors
    ///
    /// Returns the validation or request error after notifying the user.
    pub async fn save(&mut self) -> Result<()> {
        if !self.editor.is_open() {
            debug!("product save ignored, dialog already closed");
            return Ok(());
        }
        let payload = match self.editor.draft().to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%e, "product form rejected");
                let message = match &e {
                    Error::Validation { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                self.notifier.notify(Notice::error("Error", message));
                return Err(e);
            }
        };

        let result = match (self.editor.mode(), self.editor.draft().id) {
            (SessionMode::Edit, Some(id)) => {
                self.api.update_product(id, &payload).await.map(|()| {
                    Notice::success(
                        "¡Actualización exitosa!",
                        "El producto ha sido actualizado correctamente.",
                    )
                })
            }
            (SessionMode::Edit, None) => Err(Error::NotFound {
                resource: "producto sin identificador".to_string(),
            }),
            (SessionMode::Create, _) => self.api.create_product(&payload).await.map(|()| {
                Notice::success(
                    "¡Creación exitosa!",
                    "El producto ha sido creado correctamente.",
                )
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
                error!("Error saving producto: {e}");
                self.notifier.notify(Notice::error(
                    "Error",
                    "Hubo un problema al guardar el producto.",
                ));
                Err(e)
            }
        }
    }

    /// Delete `product` after confirmation; `Ok(false)` when the user declines
    ///
    /// # Errors
    ///
    /// Returns the request error after notifying the user.
    pub async fn delete(&mut self, product: &Product) -> Result<bool> {
        let Some(id) = product.id else {
            return Err(Error::NotFound {
                resource: "producto sin identificador".to_string(),
            });
        };
        let question = format!(
            "¿Estás seguro de que deseas eliminar el producto {}?",
            product.name
        );
        if !self.notifier.confirm("¿Estás seguro?", &question) {
            return Ok(false);
        }

        match self.api.delete_product(id).await {
            Ok(()) => {
                self.reload().await;
                self.notifier.notify(Notice::success(
                    "¡Eliminado!",
                    "El producto ha sido eliminado.",
                ));
                Ok(true)
            }
            Err(e) => {
                error!("Error deleting producto: {e}");
                self.notifier.notify(Notice::error(
                    "Error",
                    "Hubo un problema al eliminar el producto.",
                ));
                Err(e)
            }
        }
    }
}

impl<A, N> PageController for ProductsController<A, N> {
    type View = PageView<Product, ProductDraft>;

    fn view(&self) -> Self::View {
        PageView::capture(&self.list, &self.editor, describe_selected(&self.details))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::mock::{MockDashboardApi, RecordingNotifier};
    use crate::notify::NoticeLevel;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: Some(id),
            name: name.to_string(),
            price: 3200.0,
            stock: 5,
            ..Product::default()
        }
    }

    fn seeded() -> (
        ProductsController<MockDashboardApi, RecordingNotifier>,
        MockDashboardApi,
        RecordingNotifier,
    ) {
        let api = MockDashboardApi::new().with_products(vec![
            product(1, "Kumis"),
            product(2, "Yogurt"),
            product(3, "Queso"),
            product(4, "Kéfir"),
        ]);
        let notifier = RecordingNotifier::new();
        (
            ProductsController::new(api.clone(), notifier.clone(), 3),
            api,
            notifier,
        )
    }

    #[tokio::test]
    async fn test_products_paginate_by_three() {
        let (mut page, _, _) = seeded();
        page.reload().await;
        assert_eq!(page.view().rows.len(), 3);
        assert_eq!(page.view().pages, vec![1, 2]);

        page.go_to_page(2);
        assert_eq!(page.view().rows[0].name, "Kéfir");
    }

    #[tokio::test]
    async fn test_numeric_fields_are_sanitized() {
        let (mut page, _, _) = seeded();
        page.open_create();
        page.set_price("$4.500,5");
        page.set_stock("12 unidades");

        let draft = page.view().editor.unwrap().draft;
        assert_eq!(draft.price, "4.5005");
        assert_eq!(draft.stock, "12");
    }

    #[tokio::test]
    async fn test_create_product() {
        let (mut page, api, notifier) = seeded();
        page.reload().await;
        page.open_create();
        page.set_name("Arequipe");
        page.set_description("Dulce de leche");
        page.set_price("8000");
        page.set_stock("10");

        page.save().await.unwrap();

        let writes = api.writes();
        assert_eq!(writes[0].path, "/api/productos");
        assert_eq!(
            writes[0].body,
            Some(json!({
                "nombre": "Arequipe",
                "descripcion": "Dulce de leche",
                "precio": 8000.0,
                "stock": 10
            }))
        );
        assert_eq!(page.list().items().len(), 5);
        assert_eq!(notifier.last_notice().unwrap().title, "¡Creación exitosa!");
    }

    #[tokio::test]
    async fn test_unnamed_product_rejected() {
        let (mut page, api, notifier) = seeded();
        page.open_create();
        page.set_price("10");

        assert!(page.save().await.is_err());
        assert!(api.writes().is_empty());
        assert_eq!(notifier.last_notice().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_delete_product_refetches() {
        let (mut page, api, notifier) = seeded();
        page.reload().await;
        let target = page.list().items()[0].clone();

        assert!(page.delete(&target).await.unwrap());
        assert_eq!(api.writes()[0].path, "/api/productos/1");
        assert_eq!(api.fetch_count("/api/productos"), 2);
        assert_eq!(page.list().items().len(), 3);
        assert_eq!(
            notifier.last_notice().unwrap(),
            Notice::success("¡Eliminado!", "El producto ha sido eliminado.")
        );
    }

    #[tokio::test]
    async fn test_failed_delete_notifies() {
        let (mut page, api, notifier) = seeded();
        page.reload().await;
        api.set_fail_writes(true);
        let target = page.list().items()[0].clone();

        assert!(page.delete(&target).await.is_err());
        assert_eq!(page.list().items().len(), 4);
        assert_eq!(
            notifier.last_notice().unwrap().message,
            "Hubo un problema al eliminar el producto."
        );
    }
}
