//! CLI definition and handlers

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

pub mod context;
pub mod report;

pub use context::CommandContext;

/// Count commits per branch across an organization's repositories and
/// write a consolidated Markdown report
#[derive(Parser, Debug)]
#[command(name = "orgcommits")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// GitHub token used as the bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Start of the reporting window (RFC 3339 or YYYY-MM-DD)
    #[arg(long, env = "ORGCOMMITS_SINCE", hide_env = true)]
    pub since: Option<String>,

    /// End of the reporting window (RFC 3339 or YYYY-MM-DD)
    #[arg(long, env = "ORGCOMMITS_UNTIL", hide_env = true)]
    pub until: Option<String>,

    /// Report file to write (overwritten on every run)
    #[arg(short, long, env = "ORGCOMMITS_OUTPUT", hide_env = true)]
    pub output: Option<PathBuf>,

    /// Only report organizations whose login starts with this prefix
    #[arg(long, env = "ORGCOMMITS_ORG_PREFIX", hide_env = true)]
    pub org_prefix: Option<String>,

    /// API base URL, for GitHub Enterprise installs
    #[arg(long, env = "ORGCOMMITS_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Override config file location
    #[arg(long, env = "ORGCOMMITS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, env = "ORGCOMMITS_DEBUG", hide_env = true)]
    pub debug: bool,
}

impl Cli {
    /// Get config path as Option<&str>
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Values given on the command line or in the environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            token: self.token.clone(),
            since: self.since.clone(),
            until: self.until.clone(),
            output: self.output.clone(),
            org_prefix: self.org_prefix.clone(),
            api_host: self.api_host.clone(),
        }
    }
}
