//! orgcommits - commit counts per branch across a GitHub organization

use clap::Parser;
use indicatif::ProgressBar;

mod cli;
mod client;
mod config;
mod enumerate;
mod error;
mod logging;
mod output;
mod report;

use cli::Cli;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let progress = cli::report::spinner();

    if let Err(err) = logging::init(cli.debug, progress.clone()) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    let result = run(&cli, &progress).await;
    progress.finish_and_clear();

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, progress: &ProgressBar) -> Result<()> {
    cli::report::run(cli, progress).await
}
