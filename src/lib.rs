//! Bookshelf application library
//!
//! Hosts the application modules and the bootstrap shared by the binaries.

pub mod modules;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Build a registry with every application module registered and initialized.
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings)?;

    let ctx = InitCtx { settings };
    registry
        .init_all(&ctx)
        .await
        .context("failed to initialize modules")?;

    Ok(registry)
}

/// Start modules, serve HTTP until shutdown, then stop modules.
pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    let registry = bootstrap(settings).await?;
    let ctx = InitCtx { settings };

    registry
        .start_all(&ctx)
        .await
        .context("failed to start modules")?;

    let served = bookshelf_http::start_server(&registry, settings).await;

    registry
        .stop_all()
        .await
        .context("failed to stop modules")?;

    served
}
