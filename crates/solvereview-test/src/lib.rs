//! Shared test fixtures for solvereview crates.
//!
//! This crate renders realistic solver text reports so parser and pipeline
//! tests do not need checked-in sample files.
//!
//! - [`log`] - Run log with link mode and highwater memory lines
//! - [`listing`] - Solve listing with model statistics, solve summaries
//!   and the trailing step summary
//! - [`profile`] - Per-statement profiling trace
//! - [`instance`] - All three reports written into an instance directory
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! solvereview-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use solvereview_test::{InstanceFixture, ListingFixture, LogFixture, ProfileFixture};
//! ```

pub mod instance;
pub mod listing;
pub mod log;
pub mod profile;

pub use instance::InstanceFixture;
pub use listing::ListingFixture;
pub use log::LogFixture;
pub use profile::{ProfileFixture, ProfileLine};
