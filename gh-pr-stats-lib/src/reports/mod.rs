//! Report generation for pull request statistics
//!
//! This module renders a [`Statistics`](crate::stats::Statistics) value for human
//! consumption and programmatic processing.
//!
//! # Implementation Model
//!
//! Three report generators are provided, each accessed through a `generate` function:
//! - **Console**: Terminal table with Unicode box drawing and an optionally bold header
//! - **Delimited**: CSV or TSV rows produced by the `csv` crate
//! - **JSON**: Machine-readable structured data with full floating point precision
//!
//! The console and delimited generators share their column layout and number
//! formatting through the `common` module: percentages use two decimals, with a `%`
//! suffix in the console table only, and day counts are rounded to whole days. Each table ends with a `Total` row carrying
//! the overall statistics.

mod common;
mod console;
mod delimited;
mod json;

pub use console::generate as generate_table;
pub use delimited::generate as generate_delimited;
pub use json::generate as generate_json;
