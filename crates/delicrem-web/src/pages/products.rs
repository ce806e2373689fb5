//! Finished products page

use super::PageHandle;
use crate::api_client::ApiClient;
use crate::app::DashboardContext;
use crate::components::{DetailModal, FormField, Pagination, SearchBox};
use crate::controllers::ProductsController;
use crate::notify::BrowserNotifier;
use crate::session::SessionMode;
use delicrem_core::{Product, ProductDraft};
use leptos::prelude::*;
use tracing::debug;

type Products = ProductsController<ApiClient, BrowserNotifier>;

fn product_row(page: PageHandle<Products>, product: Product) -> impl IntoView {
    let for_details = product.clone();
    let for_edit = product.clone();
    let for_delete = product.clone();

    view! {
        <tr>
            <td>{product.name}</td>
            <td>{product.description}</td>
            <td>{product.price}</td>
            <td>{product.stock}</td>
            <td class="table-actions">
                <button
                    class="btnvisualizar"
                    on:click=move |_| {
                        let product = for_details.clone();
                        page.update(move |c| c.view_details(&product));
                    }
                >
                    "Ver"
                </button>
                <button
                    class="btnedit"
                    on:click=move |_| {
                        let product = for_edit.clone();
                        page.update(move |c| c.open_edit(&product));
                    }
                >
                    "Editar"
                </button>
                <button
                    class="btncancelarinsumo"
                    on:click=move |_| {
                        let product = for_delete.clone();
                        page.run(move |c| Box::pin(async move {
                            if let Err(e) = c.delete(&product).await {
                                debug!(%e, "product delete not completed");
                            }
                        }));
                    }
                >
                    "Eliminar"
                </button>
            </td>
        </tr>
    }
}

/// Products page component
#[component]
pub fn ProductsPage() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let page = PageHandle::new(Products::new(
        ctx.api.clone(),
        ctx.notifier,
        ctx.pages.products,
    ));
    page.run(|c| Box::pin(c.reload()));
    let view = page.view();

    let rows = Memo::new(move |_| view.with(|v| v.rows.clone()));
    let editor_open = Memo::new(move |_| view.with(|v| v.editor.is_some()));
    let editing = Memo::new(move |_| {
        view.with(|v| v.editor.as_ref().is_some_and(|e| e.mode == SessionMode::Edit))
    });
    let draft = move |read: fn(&ProductDraft) -> String| {
        Signal::derive(move || {
            view.with(|v| v.editor.as_ref().map(|e| read(&e.draft)).unwrap_or_default())
        })
    };

    view! {
        <div class="page products-page">
            <button class="btnagregar" on:click=move |_| page.update(|c| c.open_create())>
                "Crear Producto"
            </button>
            <SearchBox
                placeholder="Buscar por nombre..."
                query=Signal::derive(move || view.with(|v| v.query.clone()))
                on_search=Callback::new(move |query: String| page.update(move |c| c.set_query(query)))
            />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Nombre"</th>
                        <th>"Descripción"</th>
                        <th>"Precio"</th>
                        <th>"Stock"</th>
                        <th>"Acciones"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows.get().into_iter().map(|product| product_row(page, product)).collect_view()}
                </tbody>
            </table>
            <Pagination
                pages=Signal::derive(move || view.with(|v| v.pages.clone()))
                current_page=Signal::derive(move || view.with(|v| v.current_page))
                on_page_change=Callback::new(move |number: usize| page.update(move |c| c.go_to_page(number)))
            />

            <Show when=move || editor_open.get()>
                <div class="modal-backdrop">
                    <div class="modal custom-modal">
                        <h3 class="modal-header">
                            {move || if editing.get() { "Editar Producto" } else { "Crear Producto" }}
                        </h3>
                        <div class="modal-body custom-modal-body">
                            <FormField
                                label="Nombre"
                                value=draft(|d| d.name.clone())
                                on_input=Callback::new(move |raw: String| page.update(move |c| c.set_name(raw)))
                            />
                            <FormField
                                label="Descripción"
                                value=draft(|d| d.description.clone())
                                on_input=Callback::new(move |raw: String| {
                                    page.update(move |c| c.set_description(raw));
                                })
                            />
                            <FormField
                                label="Precio"
                                value=draft(|d| d.price.clone())
                                on_input=Callback::new(move |raw: String| page.update(move |c| c.set_price(&raw)))
                            />
                            <FormField
                                label="Stock"
                                value=draft(|d| d.stock.clone())
                                on_input=Callback::new(move |raw: String| page.update(move |c| c.set_stock(&raw)))
                            />
                        </div>
                        <div class="modal-footer">
                            <button class="btn" on:click=move |_| page.update(|c| c.close_editor())>
                                "Cancelar"
                            </button>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| {
                                    page.run(|c| Box::pin(async move {
                                        if let Err(e) = c.save().await {
                                            debug!(%e, "product save not completed");
                                        }
                                    }));
                                }
                            >
                                {move || if editing.get() { "Guardar Cambios" } else { "Crear Producto" }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>

            <DetailModal
                detail=Signal::derive(move || view.with(|v| v.details.clone()))
                on_close=Callback::new(move |()| page.update(|c| c.close_details()))
            />
        </div>
    }
}
