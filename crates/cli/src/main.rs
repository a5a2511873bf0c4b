use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "In-memory bookshelf service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document
    Openapi,
    /// List registered modules and where their routes are mounted
    Modules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            bookshelf_telemetry::init(&settings.telemetry)?;

            tracing::info!(
                env = ?settings.environment,
                address = %settings.bind_address(),
                "bookshelf serve"
            );

            let runtime = tokio::runtime::Runtime::new()
                .with_context(|| "failed to start tokio runtime")?;
            runtime.block_on(bookshelf_app::serve(settings))
        }
        Command::Openapi => {
            let registry = bookshelf_app::build_registry();
            let spec = bookshelf_http::openapi::merged_spec(&registry);
            let rendered = serde_json::to_string_pretty(&spec)
                .with_context(|| "failed to render OpenAPI document")?;
            println!("{}", rendered);
            Ok(())
        }
        Command::Modules => {
            let registry = bookshelf_app::build_registry();
            for module in registry.modules() {
                let mount = module.route_prefix().unwrap_or_else(|| "/".to_string());
                println!("{}\t{}", module.name(), mount);
            }
            Ok(())
        }
    }
}
