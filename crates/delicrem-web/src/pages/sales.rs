//! Sales page

use super::PageHandle;
use crate::api_client::ApiClient;
use crate::app::DashboardContext;
use crate::components::{
    CheckboxField, DetailModal, FormField, LineItemsEditor, Pagination, SearchBox, StatusSelect,
};
use crate::controllers::SalesController;
use crate::notify::BrowserNotifier;
use delicrem_core::utils::{digits_only, format_date};
use delicrem_core::{LineDraft, LineField, OrderStatus, Sale, SaleDraft};
use leptos::prelude::*;
use tracing::debug;

type Sales = SalesController<ApiClient, BrowserNotifier>;

const LINE_COLUMNS: &[(LineField, &str)] = &[
    (LineField::ProductId, "ID Producto"),
    (LineField::Quantity, "Cantidad"),
    (LineField::UnitPrice, "Precio Unitario"),
];

fn sale_card(page: PageHandle<Sales>, sale: Sale) -> impl IntoView {
    let for_details = sale.clone();
    let for_status = sale.clone();

    view! {
        <div class="card">
            <h6>"Cliente: " {sale.customer.name}</h6>
            <p>"Fecha de Venta: " {format_date(&sale.sale_date)}</p>
            <p>"Estado: " {sale.status.as_str()}</p>
            <div class="card-actions">
                <button
                    class="btnvisualizar"
                    on:click=move |_| {
                        let sale = for_details.clone();
                        page.update(move |c| c.view_details(&sale));
                    }
                >
                    "Ver"
                </button>
                <button
                    class="btnedit"
                    on:click=move |_| {
                        let sale = for_status.clone();
                        page.run(move |c| Box::pin(async move {
                            if let Err(e) = c.update_status(&sale).await {
                                debug!(%e, "sale status update not completed");
                            }
                        }));
                    }
                >
                    "Actualizar Estado"
                </button>
            </div>
        </div>
    }
}

/// Sales page component
#[component]
pub fn SalesPage() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let page = PageHandle::new(Sales::new(ctx.api.clone(), ctx.notifier, ctx.pages.sales));
    page.run(|c| Box::pin(c.reload()));
    let view = page.view();

    let rows = Memo::new(move |_| view.with(|v| v.rows.clone()));
    let editor_open = Memo::new(move |_| view.with(|v| v.editor.is_some()));
    let line_count = Memo::new(move |_| {
        view.with(|v| v.editor.as_ref().map_or(0, |e| e.draft.lines.len()))
    });
    let draft = move |read: fn(&SaleDraft) -> String| {
        Signal::derive(move || {
            view.with(|v| v.editor.as_ref().map(|e| read(&e.draft)).unwrap_or_default())
        })
    };

    view! {
        <div class="page sales-page">
            <button class="btnagregar" on:click=move |_| page.update(|c| c.open_create())>
                "Crear Venta"
            </button>
            <SearchBox
                placeholder="Buscar por cliente..."
                query=Signal::derive(move || view.with(|v| v.query.clone()))
                on_search=Callback::new(move |query: String| page.update(move |c| c.set_query(query)))
            />
            <h6>"Lista de Ventas"</h6>
            <div class="card-grid">
                {move || rows.get().into_iter().map(|sale| sale_card(page, sale)).collect_view()}
            </div>
            <Pagination
                pages=Signal::derive(move || view.with(|v| v.pages.clone()))
                current_page=Signal::derive(move || view.with(|v| v.current_page))
                on_page_change=Callback::new(move |number: usize| page.update(move |c| c.go_to_page(number)))
            />

            <Show when=move || editor_open.get()>
                <div class="modal-backdrop">
                    <div class="modal custom-modal">
                        <h3 class="modal-header">"Crear Venta"</h3>
                        <div class="modal-body">
                            <FormField
                                label="ID Cliente"
                                value=draft(|d| d.customer_id.clone())
                                on_input=Callback::new(move |raw: String| {
                                    page.update(move |c| c.draft_mut().customer_id = digits_only(&raw));
                                })
                            />
                            <FormField
                                label="Fecha de Venta"
                                input_type="date"
                                value=draft(|d| d.sale_date.clone())
                                on_input=Callback::new(move |raw: String| {
                                    page.update(move |c| c.draft_mut().sale_date = raw);
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
                                            debug!(%e, "sale save not completed");
                                        }
                                    }));
                                }
                            >
                                "Crear Venta"
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
