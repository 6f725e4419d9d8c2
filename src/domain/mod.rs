//! Domain logic - pure naming and commit types independent of the remote API

pub mod commit;
pub mod tag;

pub use commit::CommitSummary;
pub use tag::TagName;
