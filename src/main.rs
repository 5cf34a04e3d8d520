use anyhow::Result;
use metadeps::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run_cli().await
}
