use anyhow::Result;
use clap::Parser;
use client_core::{ClientSettings, FetchLifecycleController};
use tokio::io::BufReader;

mod render;
mod session;

use render::render;
use session::{run_session, settled_outcome};

#[derive(Parser, Debug)]
#[command(about = "Fetches /api/info and /api/users from a backend and renders the result")]
struct Args {
    /// Overrides BACKEND_URL / APP__BACKEND_URL.
    #[arg(long)]
    backend_url: Option<String>,
    /// Refresh once, print the outcome and exit non-zero on failure.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = ClientSettings::from_env(args.backend_url)?;
    let controller = FetchLifecycleController::new(&settings);

    if args.once {
        let snapshot = controller.refresh().await;
        print!("{}", render(&snapshot, controller.backend_url()));
        return settled_outcome(&snapshot, controller.backend_url());
    }

    let stdin = BufReader::new(tokio::io::stdin());
    run_session(controller, stdin, |frame| print!("{frame}")).await
}
