//! Parsers for the three text reports a solver run leaves behind.
//!
//! - [`LogParser`] reads the run log: link mode and peak memory.
//! - [`ListingParser`] reads the solve listing: timings, model status and
//!   problem size.
//! - [`ProfileParser`] reads the per-statement profiling trace.
//!
//! Each parser applies a fixed set of named [`ExtractionRule`]s line by
//! line, collecting values into a partial record that is validated only
//! once the whole file has been read.
//!
//! # Example
//!
//! ```
//! use solvereview_core::RunMode;
//! use solvereview_parse::LogParser;
//! use std::path::Path;
//!
//! let log = "\
//! --- Executing CPLEX (Solvelink=5): elapsed 0:00:12.500
//! --- Memory statistics: highwater RSS 2451.23 MB
//! --- Memory statistics: highwater VSS 3.10 GB
//! ";
//!
//! let record = LogParser::new(RunMode::FullSolve)
//!     .parse_str(log, Path::new("out.log"))
//!     .unwrap();
//! assert_eq!(record.link_mode.map(|l| l.code()), Some(5));
//! assert_eq!(record.highwater_rss_gb, 2.45);
//! assert_eq!(record.highwater_vss_gb, 3.1);
//! ```

mod listing;
mod log;
mod profile;
mod rule;


pub use listing::{
    corrected_execution, ListingParser, ListingRecord, ModelStatusRecord, ProblemShapeRecord,
    TimingRecord, ValueRange,
};
pub use log::{LogParser, ResourceRecord};
pub use profile::{ProfileEntry, ProfileParser, ProfileRow, ProfileTable};
pub use rule::{ExtractionRule, FieldError, Line, RuleFailure};
