//! Confab CLI binary entry point.

use confab::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("confab=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    if let Err(e) = cli::run(cli).await {
        if e.is_authentication() {
            eprintln!("Authentication failed, check OPENAI_API_KEY: {e}");
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}
