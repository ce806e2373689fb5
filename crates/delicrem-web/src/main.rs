//! Delicrem dashboard entry point
//!
//! In the browser this mounts the Leptos application. Natively it serves
//! the compiled bundle over HTTP.
#![forbid(unsafe_code)]

#[cfg(target_arch = "wasm32")]
fn main() {
    use delicrem_core::Config;
    use delicrem_web::app::App;
    use leptos::prelude::*;

    console_error_panic_hook::set_once();

    let config = Config::default();
    let level = config
        .logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build(),
    );

    leptos::mount::mount_to_body(move || view! { <App config /> });
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use delicrem_web::server::build_app;
    use std::net::{IpAddr, SocketAddr};
    use tracing::info;

    let config = delicrem_core::Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        delicrem_core::Config::default()
    });

    delicrem_core::init_logging(&config.logging)?;

    let app = build_app(&config);

    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| format!("Invalid server host '{}': {}", config.server.host, e))?;
    let addr = SocketAddr::new(host, config.server.port);

    info!(
        "Serving Delicrem dashboard from {} on {}",
        config.server.static_dir.display(),
        addr
    );
    info!("Backend API at {}", config.api.base_url);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
