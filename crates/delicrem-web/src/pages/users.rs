//! Users page

use super::PageHandle;
use crate::api_client::ApiClient;
use crate::app::DashboardContext;
use crate::components::{DetailModal, FormField, Pagination, SearchBox};
use crate::controllers::{UserRow, UsersController};
use crate::notify::BrowserNotifier;
use crate::session::SessionMode;
use delicrem_core::UserDraft;
use leptos::prelude::*;
use tracing::debug;

type Users = UsersController<ApiClient, BrowserNotifier>;

fn user_row(page: PageHandle<Users>, row: UserRow) -> impl IntoView {
    let for_details = row.clone();
    let for_edit = row.user.clone();
    let for_delete = row.user.clone();

    view! {
        <tr>
            <td>{row.user.name}</td>
            <td>{row.user.email}</td>
            <td>{row.role}</td>
            <td class="table-actions">
                <button
                    class="btnvisualizar"
                    on:click=move |_| {
                        let row = for_details.clone();
                        page.update(move |c| c.view_details(&row));
                    }
                >
                    "Ver"
                </button>
                <button
                    class="btnedit"
                    on:click=move |_| {
                        let user = for_edit.clone();
                        page.update(move |c| c.open_edit(&user));
                    }
                >
                    "Editar"
                </button>
                <button
                    class="btncancelarinsumo"
                    on:click=move |_| {
                        let user = for_delete.clone();
                        page.run(move |c| Box::pin(async move {
                            if let Err(e) = c.delete(&user).await {
                                debug!(%e, "user delete not completed");
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

/// Users page component
#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let page = PageHandle::new(Users::new(ctx.api.clone(), ctx.notifier, ctx.pages.users));
    page.run(|c| Box::pin(c.load()));
    let view = page.view();

    let rows = Memo::new(move |_| view.with(|v| v.rows.clone()));
    let roles = Memo::new(move |_| view.with(|v| v.roles.clone()));
    let editor_open = Memo::new(move |_| view.with(|v| v.editor.is_some()));
    let editing = Memo::new(move |_| {
        view.with(|v| v.editor.as_ref().is_some_and(|e| e.mode == SessionMode::Edit))
    });
    let selected_role = Memo::new(move |_| {
        view.with(|v| v.editor.as_ref().and_then(|e| e.draft.role_id))
    });
    let draft = move |read: fn(&UserDraft) -> String| {
        Signal::derive(move || {
            view.with(|v| v.editor.as_ref().map(|e| read(&e.draft)).unwrap_or_default())
        })
    };
    let field_error = move |field: &'static str| {
        Signal::derive(move || view.with(|v| v.form_errors.get(field).cloned()))
    };

    view! {
        <div class="page users-page">
            <button class="btnagregar" on:click=move |_| page.update(|c| c.open_create())>
                "Crear Usuario"
            </button>
            <SearchBox
                placeholder="Buscar por nombre de usuario..."
                query=Signal::derive(move || view.with(|v| v.query.clone()))
                on_search=Callback::new(move |query: String| page.update(move |c| c.set_query(query)))
            />
            <h6>"Lista de Usuarios"</h6>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Nombre"</th>
                        <th>"Correo Electrónico"</th>
                        <th>"Rol"</th>
                        <th>"Acciones"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows.get().into_iter().map(|row| user_row(page, row)).collect_view()}
                </tbody>
            </table>
            <Pagination
                pages=Signal::derive(move || view.with(|v| v.pages.clone()))
                current_page=Signal::derive(move || view.with(|v| v.current_page))
                on_page_change=Callback::new(move |number: usize| page.update(move |c| c.go_to_page(number)))
            />

            <Show when=move || editor_open.get()>
                <div class="modal-backdrop">
                    <div class="modal">
                        <h3 class="modal-header">
                            {move || if editing.get() { "Editar Usuario" } else { "Crear Usuario" }}
                        </h3>
                        <div class="modal-body">
                            <FormField
                                label="Nombre"
                                value=draft(|d| d.name.clone())
                                error=field_error("nombre")
                                on_input=Callback::new(move |raw: String| {
                                    page.update(move |c| c.draft_mut().name = raw);
                                })
                            />
                            <FormField
                                label="Correo Electrónico"
                                input_type="email"
                                value=draft(|d| d.email.clone())
                                error=field_error("email")
                                on_input=Callback::new(move |raw: String| {
                                    page.update(move |c| c.draft_mut().email = raw);
                                })
                            />
                            <FormField
                                label="Contraseña"
                                input_type="password"
                                value=draft(|d| d.password.clone())
                                error=field_error("password")
                                on_input=Callback::new(move |raw: String| {
                                    page.update(move |c| c.draft_mut().password = raw);
                                })
                            />
                            <label class="form-field">
                                <span class="form-label">"Rol"</span>
                                <select
                                    class="form-input"
                                    on:change=move |ev| {
                                        let role_id = event_target_value(&ev).parse::<i64>().ok();
                                        page.update(move |c| c.draft_mut().role_id = role_id);
                                    }
                                >
                                    <option value="" selected=move || selected_role.get().is_none()>
                                        "Seleccione un rol"
                                    </option>
                                    {move || {
                                        roles
                                            .get()
                                            .into_iter()
                                            .map(|role| {
                                                let id = role.id;
                                                view! {
                                                    <option
                                                        value=id.to_string()
                                                        selected=move || selected_role.get() == Some(id)
                                                    >
                                                        {role.name}
                                                    </option>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </select>
                            </label>
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
                                            debug!(%e, "user save not completed");
                                        }
                                    }));
                                }
                            >
                                {move || if editing.get() { "Guardar Cambios" } else { "Crear Usuario" }}
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
