//! GitHub API data models
//!
//! Only the fields the report needs are modelled; serde ignores the rest of
//! each payload.

mod branch;
mod commit;
mod org;
mod repo;

pub use branch::Branch;
pub use commit::CommitRef;
pub use org::Organization;
pub use repo::Repository;
