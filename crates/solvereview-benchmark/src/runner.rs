//! Batch aggregation.

use std::fs;
use std::path::{Path, PathBuf};

use solvereview_config::{ReviewConfig, DEFAULT_PROFILE_TOP};
use solvereview_core::{Instance, InstanceKey, Result, ReviewError, RunMode, StatusCodes};
use solvereview_parse::{ListingParser, LogParser, ProfileParser, ProfileTable};
use tracing::info;

use crate::profile::ProfileSummary;
use crate::report::{create_parent, CsvExporter};
use crate::result::{InstanceRow, InstanceTable};

/// Output of one aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub table: InstanceTable,
    pub profile: ProfileSummary,
}

/// Runs the three parsers over every instance of a batch and merges the
/// results.
///
/// Instances are processed one at a time in the order given. Within an
/// instance the log is parsed first (its link mode decides the execution
/// correction), then the listing (its execution time normalizes the
/// profile), then the profile.
///
/// # Example
///
/// ```
/// use solvereview_benchmark::Aggregator;
/// use solvereview_core::RunMode;
///
/// let aggregator = Aggregator::new(RunMode::FullSolve)
///     .with_result_csv("out/result_overview.csv")
///     .with_profile_top(10);
///
/// assert_eq!(aggregator.mode(), RunMode::FullSolve);
/// assert_eq!(aggregator.profile_top(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator {
    mode: RunMode,
    codes: StatusCodes,
    result_csv: PathBuf,
    profile_summary: PathBuf,
    profile_top: usize,
}

impl Aggregator {
    /// Creates an aggregator writing to the default `code_review/` paths.
    pub fn new(mode: RunMode) -> Self {
        let defaults = ReviewConfig::default();
        Self {
            mode,
            codes: StatusCodes::standard(),
            result_csv: defaults.result_csv,
            profile_summary: defaults.profile_summary,
            profile_top: DEFAULT_PROFILE_TOP,
        }
    }

    /// Creates an aggregator from a batch configuration.
    pub fn from_config(config: &ReviewConfig) -> Self {
        Self::new(config.solve_mode)
            .with_result_csv(config.result_csv.clone())
            .with_profile_summary(config.profile_summary.clone())
            .with_profile_top(config.profile_top)
    }

    pub fn with_status_codes(mut self, codes: StatusCodes) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_result_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.result_csv = path.into();
        self
    }

    pub fn with_profile_summary(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile_summary = path.into();
        self
    }

    pub fn with_profile_top(mut self, top: usize) -> Self {
        self.profile_top = top;
        self
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn profile_top(&self) -> usize {
        self.profile_top
    }

    pub fn result_csv(&self) -> &Path {
        &self.result_csv
    }

    pub fn profile_summary(&self) -> &Path {
        &self.profile_summary
    }

    /// Aggregates `instances`, persisting the instance table, every
    /// per-instance profile table and the cross-instance profile summary.
    ///
    /// The first failing instance aborts the batch; its key is attached to
    /// the error.
    pub fn aggregate(&self, instances: &[Instance]) -> Result<Aggregation> {
        info!(
            event = "batch_start",
            instance_count = instances.len(),
            mode = %self.mode,
        );

        let mut table = InstanceTable::new();
        let mut profiles: Vec<(InstanceKey, ProfileTable)> = Vec::with_capacity(instances.len());

        for instance in instances {
            let (row, profile) = self
                .collect(instance)
                .map_err(|err| err.for_instance(&instance.key))?;
            table.push(row);
            profiles.push((instance.key.clone(), profile));
        }

        CsvExporter::to_file(&table, &self.result_csv)?;

        let profile = ProfileSummary::from_tables(&profiles);
        create_parent(&self.profile_summary)?;
        fs::write(&self.profile_summary, profile.to_markdown(self.profile_top))
            .map_err(|err| ReviewError::io(&self.profile_summary, err))?;
        info!(
            event = "profile_summary",
            descriptions = profile.len(),
            rendered = profile.top(self.profile_top).len(),
        );

        info!(event = "batch_end", instance_count = table.len());
        Ok(Aggregation { table, profile })
    }

    fn collect(&self, instance: &Instance) -> Result<(InstanceRow, ProfileTable)> {
        info!(event = "instance_start", instance = %instance.key);

        let resources = LogParser::new(self.mode).parse(&instance.log_path())?;
        let listing = ListingParser::new(&self.codes, self.mode).parse(
            &instance.listing_path(),
            &instance.key,
            resources.link_mode,
        )?;
        let profile = ProfileParser::new().process(
            &instance.profile_path(),
            listing.timing.execution,
            &instance.profile_report_path(),
        )?;

        let row = InstanceRow::from_records(instance.key.clone(), &resources, &listing);
        info!(
            event = "instance_end",
            instance = %row.instance,
            elapsed = row.elapsed,
            execution = row.execution,
            solver = ?row.solver,
            non_zeros = row.non_zeros,
        );
        Ok((row, profile))
    }
}
