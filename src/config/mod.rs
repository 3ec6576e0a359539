//! Configuration management for orgcommits
//!
//! Values are layered once at startup: built-in defaults, then the optional
//! YAML file, then environment variables and flags. The resolved
//! [`ReportConfig`] is passed explicitly to every component.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

mod range;

pub use range::DateRange;

/// GitHub REST API base URL
pub const DEFAULT_API_HOST: &str = "https://api.github.com";

/// Default start of the reporting window
pub const DEFAULT_SINCE: &str = "2023-01-01T00:00:00Z";

/// Default end of the reporting window
pub const DEFAULT_UNTIL: &str = "2023-01-31T23:59:59Z";

/// Default report file name, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "github_org_commit_report.md";

/// Default organization login prefix
pub const DEFAULT_ORG_PREFIX: &str = "TFE-";

/// Opaque bearer credential.
///
/// `Debug` never prints the secret so the token cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Configuration as read from the YAML file. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,

    /// Start of the reporting window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,

    /// End of the reporting window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,

    /// Report file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Only organizations whose login starts with this prefix are reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_prefix: Option<String>,

    /// API base URL (GitHub Enterprise installs use their own host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,
}

/// Values supplied at invocation time that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub output: Option<PathBuf>,
    pub org_prefix: Option<String>,
    pub api_host: Option<String>,
}

/// Fully resolved configuration for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub token: Token,
    pub range: DateRange,
    pub output: PathBuf,
    pub org_prefix: String,
    pub api_host: String,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".orgcommits").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or the default location.
    ///
    /// An explicit path must exist. A missing default file yields an empty
    /// configuration since every value can come from flags instead.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config file at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        log::debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Apply invocation-time overrides on top of the file values
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(token) = overrides.token {
            self.token = Some(Token::new(token));
        }
        if overrides.since.is_some() {
            self.since = overrides.since;
        }
        if overrides.until.is_some() {
            self.until = overrides.until;
        }
        if overrides.output.is_some() {
            self.output = overrides.output;
        }
        if overrides.org_prefix.is_some() {
            self.org_prefix = overrides.org_prefix;
        }
        if overrides.api_host.is_some() {
            self.api_host = overrides.api_host;
        }
        self
    }

    /// Fill in defaults and validate, producing the configuration for a run
    pub fn resolve(self) -> Result<ReportConfig> {
        let token = self
            .token
            .filter(|t| !t.is_blank())
            .ok_or(ConfigError::MissingToken)?;

        let range = DateRange::parse(
            self.since.as_deref().unwrap_or(DEFAULT_SINCE),
            self.until.as_deref().unwrap_or(DEFAULT_UNTIL),
        )?;

        let api_host = self
            .api_host
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
            .trim_end_matches('/')
            .to_string();
        if !api_host.starts_with("http://") && !api_host.starts_with("https://") {
            return Err(
                ConfigError::Invalid(format!("api_host must be an http(s) URL: {api_host}")).into(),
            );
        }

        Ok(ReportConfig {
            token,
            range,
            output: self
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            org_prefix: self
                .org_prefix
                .unwrap_or_else(|| DEFAULT_ORG_PREFIX.to_string()),
            api_host,
        })
    }
}
