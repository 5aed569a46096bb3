use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use tower_lsp::{LspService, Server};

use tracing::{error, info};

use alloy_language_server::config::{Args, LoggingConfig};
use alloy_language_server::logging::init_logger;
use alloy_language_server::lsp::backend::AlloyBackend;
use alloy_language_server::schema::SchemaRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let logging = LoggingConfig::from_args_and_env(&args);
    let _guard = init_logger(&logging).context("Failed to initialize logging")?;

    info!(
        "Starting {} {} (stdio)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let registry = SchemaRegistry::builtin()
        .inspect_err(|e| error!("Invalid builtin schema catalog: {}", e))
        .context("Failed to build the builtin schema registry")?;
    let dangling = registry.unregistered_block_references();
    if !dangling.is_empty() {
        error!("Blocks without registry entries: {:?}", dangling);
    }
    info!(
        "Loaded {} top-level components and {} block schemas",
        registry.top_level_items().len(),
        registry.len()
    );
    let registry = Arc::new(registry);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let (service, socket) = LspService::new(|client| AlloyBackend::new(client, registry.clone()));
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("Language server exited");
    Ok(())
}
