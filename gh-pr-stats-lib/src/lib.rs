#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for gh-pr-stats
//!
//! This library consolidates all functionality for the gh-pr-stats tool, which reports
//! pull request statistics for a GitHub repository, broken down by label.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: Pull request retrieval from the GitHub API
//! - [`stats`]: Aggregation of pull requests into statistics
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod facts;
#[cfg(not(any(debug_assertions, test)))]
mod facts;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub mod stats;

mod failure;

pub use crate::commands::{Host, run};
pub use crate::failure::Failure;
