pub mod books;
pub mod demo;
pub mod secure;

use libris_authz::StaticTokenVerifier;
use libris_kernel::{settings::Settings, ModuleRegistry};

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    registry.register(books::create_module())?;
    registry.register(secure::create_module(StaticTokenVerifier::shared(
        settings.auth.shared_secret.clone(),
    )))?;
    registry.register(demo::create_module())?;
    Ok(())
}
