use anyhow::Result;
use smartcs::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
