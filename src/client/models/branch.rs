//! Branch models

use serde::Deserialize;

/// Branch from `GET /repos/{org}/{repo}/branches`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Branch {
    pub name: String,
}

#[cfg(test)]
impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
