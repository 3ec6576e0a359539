//! Commit models

use serde::Deserialize;

/// Commit entry from `GET /repos/{org}/{repo}/commits`.
///
/// Commits are only counted, so the SHA is all that is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

#[cfg(test)]
impl CommitRef {
    pub fn new(sha: impl Into<String>) -> Self {
        Self { sha: sha.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let body = r#"[{
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "commit": { "message": "Fix all the bugs" },
            "author": { "login": "octocat" }
        }]"#;

        let commits: Vec<CommitRef> = serde_json::from_str(body).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].sha, "6dcb09b5b57875f334f61aebed695e2e4193db5e");
    }
}
