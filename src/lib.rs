//! Bookshelf application library
//!
//! Wires the project modules into the kernel registry and runs the HTTP server.

pub mod modules;
pub mod utils;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Registry holding the core health module and every project module
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_core(bookshelf_http::health::create_module());
    modules::register_all(&mut registry);
    registry
}

/// Boot every module, serve until a shutdown signal, then stop the modules.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry();
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .boot(&ctx)
        .await
        .with_context(|| "failed to boot modules")?;

    let served =
        bookshelf_http::start_server(&registry, &settings, bookshelf_http::shutdown_signal())
            .await;

    registry
        .shutdown()
        .await
        .with_context(|| "failed to stop modules")?;

    served
}
