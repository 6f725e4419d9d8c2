pub mod changelog;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod git_ops;
pub mod outputs;
pub mod release;
pub mod remote;
pub mod strategy;
pub mod tag_index;
pub mod ui;
pub mod warning;

pub use error::{AutotagError, Result};
