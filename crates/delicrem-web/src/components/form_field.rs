//! Labelled form inputs used by the edit dialogs

use delicrem_core::OrderStatus;
use leptos::prelude::*;
use tracing::warn;

/// Text input with label and optional error message
#[component]
pub fn FormField(
    /// Field label
    label: &'static str,
    /// HTML input type
    #[prop(default = "text")]
    input_type: &'static str,
    /// Current value
    #[prop(into)]
    value: Signal<String>,
    /// Callback with the raw input
    on_input: Callback<String>,
    /// Message shown under the input
    #[prop(optional)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                class="form-input"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || {
                error
                    .and_then(|error| error.get())
                    .map(|message| view! { <p class="form-error">{message}</p> })
            }}
        </label>
    }
}

/// Checkbox with label
#[component]
pub fn CheckboxField(
    /// Field label
    label: &'static str,
    /// Current state
    #[prop(into)]
    checked: Signal<bool>,
    /// Callback with the new state
    on_toggle: Callback<bool>,
) -> impl IntoView {
    view! {
        <label class="form-check">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_toggle.run(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
}

/// Status picker shared by orders and sales
#[component]
pub fn StatusSelect(
    /// Current status
    #[prop(into)]
    value: Signal<OrderStatus>,
    /// Callback with the chosen status
    on_change: Callback<OrderStatus>,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">"Estado"</span>
            <select
                class="form-input"
                on:change=move |ev| {
                    match event_target_value(&ev).parse::<OrderStatus>() {
                        Ok(status) => on_change.run(status),
                        Err(e) => warn!(%e, "unknown status selected"),
                    }
                }
            >
                {OrderStatus::ALL
                    .into_iter()
                    .map(|status| {
                        view! {
                            <option value=status.as_str() selected=move || value.get() == status>
                                {status.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}
