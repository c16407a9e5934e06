//! solvereview Core - shared types for solver result review
//!
//! This crate provides the fundamental pieces every other solvereview crate
//! builds on:
//! - The error taxonomy for malformed reports and baseline failures
//! - Run modes and solver link modes
//! - The fixed model-status lookup table
//! - Instance identity and on-disk output conventions
//! - Rounding and number formatting that baselines depend on
//! - A small Markdown table renderer

pub mod error;
pub mod instance;
pub mod mode;
pub mod numeric;
pub mod status;
pub mod table;

#[cfg(test)]
mod tests;

pub use error::{Result, ReviewError};
pub use instance::{Instance, InstanceKey};
pub use mode::{LinkMode, RunMode};
pub use status::StatusCodes;
pub use table::{Align, Cell, MarkdownTable};
