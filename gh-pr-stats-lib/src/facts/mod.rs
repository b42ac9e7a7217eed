//! Pull request retrieval from GitHub
//!
//! This module is responsible for gathering the raw pull request records of a repository.
//!
//! # Implementation Model
//!
//! A [`RepoSpec`] names the repository to analyze, either parsed from user input or
//! discovered for the current directory through the `gh` CLI.
//!
//! The [`Provider`] pages through the repository's issues endpoint using a [`Client`],
//! keeping only entries that are pull requests. Every request goes through retry and
//! timeout middleware that masks transient network and server failures. Rate limit
//! exhaustion is reported without waiting for the limit to reset.
//!
//! Long-running retrieval reports its advancement through the [`Progress`] trait.

mod client;
pub(crate) mod progress;
mod provider;
mod repo_spec;
mod resilient_http;

pub use client::Client;
pub use progress::Progress;
pub use provider::Provider;
pub use repo_spec::RepoSpec;
