//! Log output that shares stderr with the progress spinner

use indicatif::ProgressBar;
use log::{Log, Metadata, Record, SetLoggerError};

/// Wraps a logger so every record is written with the spinner cleared,
/// then the spinner is redrawn below it.
pub struct ProgressLogger<L> {
    inner: L,
    progress: ProgressBar,
}

impl<L: Log> ProgressLogger<L> {
    pub fn new(inner: L, progress: ProgressBar) -> Self {
        Self { inner, progress }
    }
}

impl<L: Log> Log for ProgressLogger<L> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        if self.inner.enabled(record.metadata()) {
            self.progress.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install env_logger behind `progress`.
///
/// `RUST_LOG` wins; otherwise warnings, or everything from this crate with `--debug`.
pub fn init(debug: bool, progress: ProgressBar) -> Result<(), SetLoggerError> {
    let default_filter = if debug { "orgcommits=debug" } else { "warn" };
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .format_timestamp(None)
            .build();

    log::set_max_level(logger.filter());
    log::set_boxed_logger(Box::new(ProgressLogger::new(logger, progress)))
}
