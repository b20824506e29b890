//! paradigm language server binary

use tracing::info;

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the LSP protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("paradigm-lsp v{}", env!("CARGO_PKG_VERSION"));

    paradigm_lsp::run_server().await;
}
