//! Command execution context
//!
//! Loads configuration once, applies invocation overrides, validates it and
//! builds the API client.

use crate::cli::Cli;
use crate::client::GitHubClient;
use crate::config::{Config, ReportConfig};
use crate::error::Result;

/// Context for command execution containing config and client.
pub struct CommandContext {
    /// Resolved and validated configuration
    pub config: ReportConfig,
    /// Authenticated API client
    pub client: GitHubClient,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// # Errors
    /// Returns error if the config file cannot be loaded, the token is
    /// missing or the date range is invalid.
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::load_at(cli.config_ref())?
            .apply(cli.overrides())
            .resolve()?;

        log::debug!(
            "Reporting {} for organizations prefixed {:?} via {}",
            config.range,
            config.org_prefix,
            config.api_host
        );

        let client = GitHubClient::with_host(config.token.clone(), config.api_host.clone())?;

        Ok(Self { config, client })
    }
}
