//! paradigm CLI binary

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    paradigm_cli::run().await
}
