//! Read-only dialog rendering a [`DetailView`]

use crate::detail::{DetailSection, DetailTable, DetailView};
use leptos::prelude::*;

fn section(section: DetailSection) -> impl IntoView {
    view! {
        <div class="detail-section">
            <h6>{section.title}</h6>
            <table class="detail-table">
                <tbody>
                    {section
                        .rows
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <tr>
                                    <td class="font-semibold">{label} ":"</td>
                                    <td>{value}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

fn table(table: DetailTable) -> impl IntoView {
    view! {
        <div class="detail-section">
            <h6>{table.title}</h6>
            <table class="detail-table">
                <thead>
                    <tr>
                        {table
                            .headers
                            .into_iter()
                            .map(|header| view! { <th class="font-semibold">{header}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {table
                        .rows
                        .into_iter()
                        .map(|cells| {
                            view! {
                                <tr>
                                    {cells
                                        .into_iter()
                                        .map(|cell| view! { <td>{cell}</td> })
                                        .collect_view()}
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

/// Modal shown while a record is selected
#[component]
pub fn DetailModal(
    /// Contents, `None` while closed
    #[prop(into)]
    detail: Signal<Option<DetailView>>,
    /// Close button
    on_close: Callback<()>,
) -> impl IntoView {
    move || {
        detail.get().map(|detail| {
            view! {
                <div class="modal-backdrop">
                    <div class="modal">
                        <h3 class="modal-header">{detail.heading}</h3>
                        <div class="modal-body">
                            {detail.sections.into_iter().map(section).collect_view()}
                            {detail.tables.into_iter().map(table).collect_view()}
                        </div>
                        <div class="modal-footer">
                            <button class="btn" on:click=move |_| on_close.run(())>
                                "Cerrar"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
