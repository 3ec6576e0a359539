//! Report command implementation

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::{Cli, CommandContext};
use crate::error::Result;
use crate::report;

/// Generate the consolidated report and print the completion notice
pub async fn run(cli: &Cli, progress: &ProgressBar) -> Result<()> {
    let ctx = CommandContext::new(cli)?;
    let output = &ctx.config.output;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(output)?);
    debug!("Writing report to {}", output.display());

    progress.enable_steady_tick(Duration::from_millis(120));
    let result = report::generate(
        &ctx.client,
        &ctx.config.range,
        &ctx.config.org_prefix,
        file,
        progress,
    )
    .await;
    progress.finish_and_clear();
    result?;

    println!(
        "{} Consolidated report generated: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Stderr spinner; indicatif hides it when stderr is not a terminal.
///
/// It stays idle until [`run`] starts ticking it. Log records are written
/// through it (see `logging`) so they never interleave with a redraw.
pub fn spinner() -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        progress.set_style(style);
    }
    progress
}
