use jucha::cli;
use jucha::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::Cli::run().await
}
