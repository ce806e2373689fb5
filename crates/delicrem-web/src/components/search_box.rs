//! Search input shown above every list

use leptos::prelude::*;

/// Text box reporting every keystroke
#[component]
pub fn SearchBox(
    /// Hint shown while empty
    placeholder: &'static str,
    /// Current query
    #[prop(into)]
    query: Signal<String>,
    /// Callback with the new query
    on_search: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="search-box">
            <input
                type="text"
                class="search-input"
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=move |ev| on_search.run(event_target_value(&ev))
            />
        </div>
    }
}
