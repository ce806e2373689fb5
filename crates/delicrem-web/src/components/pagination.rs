//! Pagination component for navigating through list pages

use leptos::prelude::*;

/// Numbered page buttons with the current page highlighted
#[component]
pub fn Pagination(
    /// Page numbers to offer
    #[prop(into)]
    pages: Signal<Vec<usize>>,
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,
    /// Callback when page changes
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <ul class="pagination-list">
            {move || {
                pages
                    .get()
                    .into_iter()
                    .map(|number| {
                        let class = if number == current_page.get() {
                            "pagination active"
                        } else {
                            "pagination"
                        };
                        view! {
                            <li>
                                <button class=class on:click=move |_| on_page_change.run(number)>
                                    {number}
                                </button>
                            </li>
                        }
                    })
                    .collect_view()
            }}
        </ul>
    }
}
