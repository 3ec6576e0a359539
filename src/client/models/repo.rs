//! Repository models

use serde::Deserialize;

/// Repository from `GET /orgs/{org}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Repository name, unique within the organization
    pub name: String,
}

#[cfg(test)]
impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
