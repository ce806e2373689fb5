//! Delicrem Web Interface
//!
//! Administrative dashboard for the Delicrem orders, products, users and
//! sales backend, built with Leptos.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod app;
pub mod components;
pub mod controllers;
pub mod detail;
pub mod list;
pub mod mock;
pub mod notify;
pub mod pages;
pub mod session;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;

// Re-export the main entry points
pub use api_client::{ApiClient, DashboardApi};
pub use app::{App, DashboardContext};
pub use notify::{BrowserNotifier, Notice, NoticeLevel, Notifier};

#[cfg(not(target_arch = "wasm32"))]
pub use server::build_app;
