//! Command-line surface and the publish workflow it drives

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{Publication, PublishFailure, PublishOutcome, TagPublisher};
