//! Orders page

use super::PageHandle;
use crate::api_client::ApiClient;
use crate::app::DashboardContext;
use crate::components::{
    CheckboxField, DetailModal, FormField, LineItemsEditor, Pagination, SearchBox, StatusSelect,
};
use crate::controllers::OrdersController;
use crate::notify::BrowserNotifier;
use crate::session::SessionMode;
use delicrem_core::utils::{digits_only, format_date};
use delicrem_core::{LineDraft, LineField, Order, OrderDraft, OrderStatus};
use leptos::prelude::*;
use tracing::debug;

type Orders = OrdersController<ApiClient, BrowserNotifier>;

const LINE_COLUMNS: &[(LineField, &str)] = &[
    (LineField::ProductId, "ID Producto"),
    (LineField::Quantity, "Cantidad"),
];

fn order_card(page: PageHandle<Orders>, order: Order) -> impl IntoView {
    let for_details = order.clone();
    let for_edit = order.clone();
    let for_delete = order.clone();

    view! {
        <div class="card">
            <h6>"Cliente: " {order.customer.name}</h6>
            <p>"Fecha de Entrega: " {format_date(&order.delivery_date)}</p>
            <p>"Estado: " {order.status.as_str()}</p>
            <div class="card-actions">
                <button
                    class="btnvisualizar"
                    on:click=move |_| {
                        let order = for_details.clone();
                        page.update(move |c| c.view_details(&order));
                    }
                >
                    "Ver"
                </button>
                <button
                    class="btnedit"
                    on:click=move |_| {
                        let order = for_edit.clone();
                        page.update(move |c| c.open_edit(&order));
                    }
                >
                    "Editar"
                </button>
                <button
                    class="btncancelarinsumo"
                    on:click=move |_| {
                        let order = for_delete.clone();
                        page.run(move |c| Box::pin(async move {
                            if let Err(e) = c.delete(&order).await {
                                debug!(%e, "order delete not completed");
                            }
                        }));
                    }
                >
                    "Eliminar"
                </button>
            </div>
        </div>
    }
}

/// Orders page component
#[component]
pub fn OrdersPage() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let page = PageHandle::new(Orders::new(ctx.api.clone(), ctx.notifier, ctx.pages.orders));
    page.run(|c| Box::pin(c.reload()));
    let view = page.view();

    let rows = Memo::new(move |_| view.with(|v| v.rows.clone()));
    let editor_open = Memo::new(move |_| view.with(|v| v.editor.is_some()));
    let editing = Memo::new(move |_| {
        view.with(|v| v.editor.as_ref().is_some_and(|e| e.mode == SessionMode::Edit))
    });
    let line_count = Memo::new(move |_| {
        view.with(|v| v.editor.as_ref().map_or(0, |e| e.draft.lines.len()))
    });
    let draft = move |read: fn(&OrderDraft) -> String| {
        Signal::derive(move || {
            view.with(|v| v.editor.as_ref().map(|e| read(&e.draft)).unwrap_or_default())
        })
    };

    view! {
        <div class="page orders-page">
            <button class="btnagregar" on:click=move |_| page.update(|c| c.open_create())>
                "Crear Pedido"
            </button>
            <SearchBox
                placeholder="Buscar por cliente..."
                query=Signal::derive(move || view.with(|v| v.query.clone()))
                on_search=Callback::new(move |query: String| page.update(move |c| c.set_query(query)))
            />
            <h6>"Lista de Pedidos"</h6>
            <div class="card-grid">
                {move || rows.get().into_iter().map(|order| order_card(page, order)).collect_view()}
            </div>
            <Pagination
                pages=Signal::derive(move || view.with(|v| v.pages.clone()))
                current_page=Signal::derive(move || view.with(|v| v.current_page))
                on_page_change=Callback::new(move |number: usize| page.update(move |c| c.go_to_page(number)))
            />

            <Show when=move || editor_open.get()>
                <div class="modal-backdrop">
                    <div class="modal custom-modal">
                        <h3 class="modal-header">
                            {move || if editing.get() { "Editar Pedido" } else { "Crear Pedido" }}
                        </h3>
                        <div class="modal-body">
                            <FormField
                                label="ID Cliente"
                                value=draft(|d| d.customer_id.clone())
                                on_input=Callback::new(move |raw: String| {
                                    page.update(move |c| c.draft_mut().customer_id = digits_only(&raw));
                                })
                            />
                            <FormField
                                label="Fecha de Entrega"
                                input_type="date"
                                value=draft(|d| d.delivery_date.clone())
                                on_input=Callback::new(move |raw: String| {
                                    page.update(move |c| c.draft_mut().delivery_date = raw);
                                })
                            />
                            <StatusSelect
                                value=Signal::derive(move || {
                                    view.with(|v| v.editor.as_ref().map(|e| e.draft.status).unwrap_or_default())
                                })
                                on_change=Callback::new(move |status: OrderStatus| {
                                    page.update(move |c| c.draft_mut().status = status);
                                })
                            />
                            <CheckboxField
                                label="Pagado"
                                checked=Signal::derive(move || {
                                    view.with(|v| v.editor.as_ref().is_some_and(|e| e.draft.paid))
                                })
                                on_toggle=Callback::new(move |paid: bool| {
                                    page.update(move |c| c.draft_mut().paid = paid);
                                })
                            />
                            <LineItemsEditor
                                columns=LINE_COLUMNS
                                count=line_count
                                cell=Callback::new(move |(index, field): (usize, LineField)| {
                                    view.with(|v| {
                                        v.editor
                                            .as_ref()
                                            .and_then(|e| e.draft.lines.get(index))
                                            .and_then(|line| line.field(field))
                                            .unwrap_or_default()
                                            .to_string()
                                    })
                                })
                                on_edit=Callback::new(move |(index, field, raw): (usize, LineField, String)| {
                                    page.update(move |c| c.edit_line(index, field, &raw));
                                })
                                on_add=Callback::new(move |()| page.update(|c| c.add_line()))
                                on_remove=Callback::new(move |index: usize| {
                                    page.update(move |c| c.remove_line(index));
                                })
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
                                            debug!(%e, "order save not completed");
                                        }
                                    }));
                                }
                            >
                                {move || if editing.get() { "Guardar Cambios" } else { "Crear Pedido" }}
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
