//! 404 Not Found page

use leptos::prelude::*;
use leptos_router::components::A;

/// 404 Not Found page component
#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>"Página no encontrada"</h2>
            <p>"La página que buscas no existe."</p>
            <A href="/">"Volver al inicio"</A>
        </div>
    }
}
