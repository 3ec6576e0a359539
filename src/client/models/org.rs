//! Organization models

use serde::Deserialize;

/// Organization membership entry from `GET /user/orgs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    /// Organization login, unique on the host
    pub login: String,
}

#[cfg(test)]
impl Organization {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}
