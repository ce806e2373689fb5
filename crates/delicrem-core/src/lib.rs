//! Core types and utilities for the Delicrem dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod drafts;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, LoggingConfig, PageConfig};
pub use drafts::{
    LineDraft, LineField, OrderDraft, OrderLineDraft, OrderPayload, ProductDraft,
    ProductPayload, SaleDraft, SaleLineDraft, SalePayload, StatusPayload, UserDraft, UserPayload,
};
pub use error::{Error, Result};
pub use types::{
    Customer, Order, OrderLine, OrderRecord, OrderStatus, Product, ProductRecord, Role,
    RoleRecord, Sale, SaleLine, SaleRecord, User, UserRecord, role_name,
};

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level when set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.level.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| Error::Configuration {
        message: format!("failed to install logger: {e}"),
    })
}
