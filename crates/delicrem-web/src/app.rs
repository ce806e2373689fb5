//! Main Leptos application component with routing

use crate::api_client::ApiClient;
use crate::notify::BrowserNotifier;
use crate::pages::{
    home::Home, not_found::NotFound, orders::OrdersPage, products::ProductsPage,
    sales::SalesPage, users::UsersPage,
};
use delicrem_core::{Config, PageConfig};
use leptos::prelude::*;
use leptos_router::components::{A, Route, Router, Routes};
use leptos_router::path;

/// Shared services handed to every page through context
#[derive(Debug, Clone)]
pub struct DashboardContext {
    /// REST client for the backend
    pub api: ApiClient,
    /// Dialog and notice surface
    pub notifier: BrowserNotifier,
    /// Page sizes per list
    pub pages: PageConfig,
}

impl DashboardContext {
    /// Build the context from configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            api: ApiClient::from_config(&config.api),
            notifier: BrowserNotifier,
            pages: config.pages,
        }
    }
}

/// Main application component
#[component]
pub fn App(#[prop(optional)] config: Option<Config>) -> impl IntoView {
    let config = config.unwrap_or_default();
    provide_context(DashboardContext::from_config(&config));

    view! {
        <Router>
            <main class="app">
                <Header />
                <div class="content">
                    <Routes fallback=NotFound>
                        <Route path=path!("/") view=Home />
                        <Route path=path!("/pedidos") view=OrdersPage />
                        <Route path=path!("/productos") view=ProductsPage />
                        <Route path=path!("/usuarios") view=UsersPage />
                        <Route path=path!("/ventas") view=SalesPage />
                    </Routes>
                </div>
            </main>
        </Router>
    }
}

/// Application header with navigation
#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="header-content">
                <h1 class="logo">
                    <A href="/">"Delicrem"</A>
                </h1>
                <nav class="nav">
                    <A href="/" attr:class="nav-link">"Inicio"</A>
                    <A href="/pedidos" attr:class="nav-link">"Pedidos"</A>
                    <A href="/productos" attr:class="nav-link">"Productos"</A>
                    <A href="/usuarios" attr:class="nav-link">"Usuarios"</A>
                    <A href="/ventas" attr:class="nav-link">"Ventas"</A>
                </nav>
            </div>
        </header>
    }
}
