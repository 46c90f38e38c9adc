//! Libris application library
//!
//! Feature modules and the process lifecycle for the book catalog service.

pub mod modules;
pub mod utils;

use anyhow::Context;
use axum::Router;
use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build a registry holding every application module
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings).context("failed to register modules")?;
    Ok(registry)
}

/// Assemble the full HTTP application without binding a socket
pub fn build_app(settings: &Settings) -> anyhow::Result<Router> {
    let registry = build_registry(settings)?;
    Ok(libris_http::build_router(&registry, settings))
}

/// Run the service until a shutdown signal arrives
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = libris_http::start_server(&registry, &settings, libris_http::shutdown_signal()).await;

    // Modules are stopped even when the server failed, then the first error wins
    let stopped = registry.stop_modules().await;
    served?;
    stopped?;

    tracing::info!("libris-app shutdown complete");
    Ok(())
}
