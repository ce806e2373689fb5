//! Sub-editor for the line items of orders and sales

use delicrem_core::LineField;
use leptos::prelude::*;

/// One row per line item with a remove button, plus an add button
///
/// Rows are rebuilt only when the number of lines changes, so typing in a
/// cell keeps its focus.
#[component]
pub fn LineItemsEditor(
    /// Editable columns and their labels
    columns: &'static [(LineField, &'static str)],
    /// Number of lines
    #[prop(into)]
    count: Signal<usize>,
    /// Current text of a cell
    cell: Callback<(usize, LineField), String>,
    /// Callback with the raw input of a cell
    on_edit: Callback<(usize, LineField, String)>,
    /// Append a blank line
    on_add: Callback<()>,
    /// Remove a line
    on_remove: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="line-items">
            <h6>"Detalles"</h6>
            {move || {
                (0..count.get())
                    .map(|index| {
                        view! {
                            <div class="line-item">
                                {columns
                                    .iter()
                                    .map(|&(field, label)| {
                                        view! {
                                            <label class="form-field">
                                                <span class="form-label">{label}</span>
                                                <input
                                                    type="text"
                                                    inputmode="decimal"
                                                    class="form-input"
                                                    prop:value=move || cell.run((index, field))
                                                    on:input=move |ev| {
                                                        on_edit.run((index, field, event_target_value(&ev)));
                                                    }
                                                />
                                            </label>
                                        }
                                    })
                                    .collect_view()}
                                <button
                                    class="btn btn-danger"
                                    on:click=move |_| on_remove.run(index)
                                >
                                    "Eliminar"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <button class="btn" on:click=move |_| on_add.run(())>
                "Agregar Detalle"
            </button>
        </div>
    }
}
