//! Solve listing parsing.

use std::fmt;
use std::path::Path;

use solvereview_core::{InstanceKey, LinkMode, Result, ReviewError, RunMode, StatusCodes};
use tracing::warn;

use crate::rule::{
    apply_first, parse_count, parse_f64, read_report, ExtractionRule, FieldError, Line,
};

/// Number of trailing lines holding the step summary.
const STEP_SUMMARY_LINES: usize = 10;

/// Marker the solver prints instead of a resource usage when none applies.
const NOT_APPLICABLE: &str = "NA";

/// Wall-clock breakdown of one run, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRecord {
    pub startup: f64,
    pub compilation: f64,
    /// Execution time with solver time removed where the link mode
    /// double-counts it.
    pub execution: f64,
    pub generation: f64,
    /// Accumulated solver time; absent when the run loaded a solution.
    pub solver: Option<f64>,
    pub closedown: f64,
    pub total_seconds: f64,
    pub elapsed: f64,
}

/// Model status code and its resolved label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStatusRecord {
    pub code: i64,
    pub label: &'static str,
}

/// A `[min, max]` range kept as the solver printed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRange {
    pub min: String,
    pub max: String,
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.min, self.max)
    }
}

/// Problem size and coefficient ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemShapeRecord {
    pub rows: u64,
    pub columns: u64,
    pub non_zeros: u64,
    pub rhs: ValueRange,
    pub bound: ValueRange,
    pub matrix: ValueRange,
}

/// Everything extracted from one solve listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub timing: TimingRecord,
    pub status: ModelStatusRecord,
    pub shape: ProblemShapeRecord,
}

/// Removes solver time from the reported execution time when the link mode
/// makes the solver run inside the execution phase.
///
/// # Example
///
/// ```
/// use solvereview_core::LinkMode;
/// use solvereview_parse::corrected_execution;
///
/// assert_eq!(corrected_execution(100.0, 12.5, Some(LinkMode::new(5))), 87.5);
/// assert_eq!(corrected_execution(100.0, 12.5, Some(LinkMode::new(3))), 100.0);
/// assert_eq!(corrected_execution(100.0, 12.5, None), 100.0);
/// ```
pub fn corrected_execution(
    raw_execution: f64,
    solver_seconds: f64,
    link_mode: Option<LinkMode>,
) -> f64 {
    match link_mode {
        Some(link) if link.includes_solver_time() => raw_execution - solver_seconds,
        _ => raw_execution,
    }
}

#[derive(Debug, Default)]
struct ListingBuilder {
    startup: Option<f64>,
    compilation: Option<f64>,
    execution: Option<f64>,
    closedown: Option<f64>,
    total_seconds: Option<f64>,
    elapsed: Option<f64>,
    generation: Option<f64>,
    status_code: Option<i64>,
    solver_seconds: f64,
    resource_usage_seen: bool,
    rows: Option<u64>,
    columns: Option<u64>,
    non_zeros: Option<u64>,
    rhs: Option<ValueRange>,
    bound: Option<ValueRange>,
    matrix: Option<ValueRange>,
}

// Step summary lines end in `<step> <cumulative> KEYWORD`; the two
// multi-word keywords push the cumulative value one token further back.
const STEP_SUMMARY_RULES: [ExtractionRule<ListingBuilder>; 6] = [
    ExtractionRule {
        name: "startup",
        tag: "STARTUP",
        apply: |b, l| {
            b.startup = Some(parse_f64(l.token_from_end(2)?)?);
            Ok(())
        },
    },
    ExtractionRule {
        name: "compilation",
        tag: "COMPILATION",
        apply: |b, l| {
            b.compilation = Some(parse_f64(l.token_from_end(2)?)?);
            Ok(())
        },
    },
    ExtractionRule {
        name: "execution",
        tag: "EXECUTION",
        apply: |b, l| {
            b.execution = Some(parse_f64(l.token_from_end(2)?)?);
            Ok(())
        },
    },
    ExtractionRule {
        name: "closedown",
        tag: "CLOSEDOWN",
        apply: |b, l| {
            b.closedown = Some(parse_f64(l.token_from_end(2)?)?);
            Ok(())
        },
    },
    ExtractionRule {
        name: "total seconds",
        tag: "TOTAL SECONDS",
        apply: |b, l| {
            b.total_seconds = Some(parse_f64(l.token_from_end(3)?)?);
            Ok(())
        },
    },
    ExtractionRule {
        name: "elapsed seconds",
        tag: "ELAPSED SECONDS",
        apply: |b, l| {
            b.elapsed = Some(parse_f64(l.token_from_end(3)?)?);
            Ok(())
        },
    },
];

const BODY_RULES: [ExtractionRule<ListingBuilder>; 7] = [
    ExtractionRule {
        name: "generation time",
        tag: "GENERATION TIME",
        apply: |b, l| {
            b.generation = Some(parse_f64(l.token(3)?)?);
            Ok(())
        },
    },
    ExtractionRule {
        name: "model status",
        tag: "MODEL STATUS",
        apply: |b, l| {
            let token = l.token(3)?;
            let code = token.parse::<i64>().map_err(|_| FieldError::Invalid {
                token: token.to_string(),
                expected: "status code",
            })?;
            b.status_code = Some(code);
            Ok(())
        },
    },
    ExtractionRule {
        name: "resource usage",
        tag: "RESOURCE USAGE",
        apply: |b, l| {
            let token = l.token(3)?;
            if token != NOT_APPLICABLE {
                b.solver_seconds += parse_f64(token)?;
                b.resource_usage_seen = true;
            }
            Ok(())
        },
    },
    ExtractionRule {
        name: "single equations",
        tag: "SINGLE EQUATIONS",
        apply: |b, l| {
            b.rows = Some(parse_count(l.token_from_end(1)?)?);
            Ok(())
        },
    },
    ExtractionRule {
        name: "single variables",
        tag: "SINGLE VARIABLES",
        apply: extract_columns,
    },
    ExtractionRule {
        name: "non zero elements",
        tag: "NON ZERO ELEMENT",
        apply: |b, l| {
            b.non_zeros = Some(parse_count(l.token_from_end(1)?)?);
            Ok(())
        },
    },
    ExtractionRule {
        name: "range statistics",
        tag: "[min, max] :",
        apply: extract_range,
    },
];

// Two layouts exist: `... SINGLE VARIABLES 2,000` and the same line with a
// trailing `<n> projected` field.
fn extract_columns(b: &mut ListingBuilder, line: &Line<'_>) -> std::result::Result<(), FieldError> {
    let token = match line.tokens().len() {
        7 => line.token_from_end(1)?,
        9 => line.token_from_end(3)?,
        n => {
            return Err(FieldError::Layout(format!(
                "unrecognized SINGLE VARIABLES layout with {n} tokens"
            )))
        }
    };
    b.columns = Some(parse_count(token)?);
    Ok(())
}

const RANGE_KEYWORDS: [&str; 3] = ["RHS", "Bound", "Matrix"];

// `RHS       [min, max] : [ 1.000E+00, 5.000E+03] - Zero values observed as well`
fn extract_range(b: &mut ListingBuilder, line: &Line<'_>) -> std::result::Result<(), FieldError> {
    let keyword = RANGE_KEYWORDS
        .iter()
        .filter_map(|k| line.text().find(k).map(|pos| (pos, *k)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, k)| k);

    let Some(keyword) = keyword else {
        warn!(line = line.number(), "range statistics line without RHS/Bound/Matrix");
        return Ok(());
    };

    let range = ValueRange {
        min: line.token(5)?.replace(',', ""),
        max: line.token(6)?.replace(']', ""),
    };
    match keyword {
        "RHS" => b.rhs = Some(range),
        "Bound" => b.bound = Some(range),
        _ => b.matrix = Some(range),
    }
    Ok(())
}

/// Extracts timings, model status and problem shape from a solve listing.
///
/// The step summary is read from the last ten lines; every other tag from
/// the whole file. Resource usage is summed over all solves and becomes the
/// solver time of a full solve.
///
/// # Example
///
/// ```
/// use solvereview_core::{InstanceKey, RunMode, StatusCodes};
/// use solvereview_parse::ListingParser;
/// use std::path::Path;
///
/// let listing = "\
/// **** MODEL STATUS      16 Solved
/// BLOCKS OF EQUATIONS     2     SINGLE EQUATIONS       1,000
/// BLOCKS OF VARIABLES     3     SINGLE VARIABLES       2,000
/// NON ZERO ELEMENTS      50,000
/// GENERATION TIME      =       10.000 SECONDS     45 MB
/// RHS       [min, max] : [ 1.000E+00, 5.000E+03]
/// Bound     [min, max] : [ 2.000E-01, 1.000E+04]
/// Matrix    [min, max] : [ 1.000E-03, 8.760E+03]
/// STEP SUMMARY:        0.016         0.016 STARTUP
///                      1.250         1.250 COMPILATION
///                     95.500        95.500 EXECUTION
///                      0.031         0.031 CLOSEDOWN
///                     96.797        96.797 TOTAL SECONDS
///                     97.120        97.120 ELAPSED SECONDS
/// ";
///
/// let codes = StatusCodes::standard();
/// let record = ListingParser::new(&codes, RunMode::LoadOnly)
///     .parse_str(listing, Path::new("out.lst"), &InstanceKey::from("Instance_1"), None)
///     .unwrap();
///
/// assert_eq!(record.status.label, "SOLVED");
/// assert_eq!(record.shape.non_zeros, 50_000);
/// assert_eq!(record.timing.solver, None);
/// assert_eq!(record.shape.rhs.to_string(), "1.000E+00, 5.000E+03");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ListingParser<'c> {
    codes: &'c StatusCodes,
    mode: RunMode,
}

impl<'c> ListingParser<'c> {
    pub fn new(codes: &'c StatusCodes, mode: RunMode) -> Self {
        Self { codes, mode }
    }

    /// Reads and parses the listing at `path`.
    ///
    /// `link_mode` comes from the run log and decides whether the execution
    /// time is corrected.
    pub fn parse(
        &self,
        path: &Path,
        instance: &InstanceKey,
        link_mode: Option<LinkMode>,
    ) -> Result<ListingRecord> {
        let text = read_report(path)?;
        self.parse_str(&text, path, instance, link_mode)
    }

    /// Parses listing text; `path` and `instance` are only used in errors.
    pub fn parse_str(
        &self,
        text: &str,
        path: &Path,
        instance: &InstanceKey,
        link_mode: Option<LinkMode>,
    ) -> Result<ListingRecord> {
        let malformed = |reason: String, line: Option<&str>| ReviewError::MalformedListing {
            path: path.to_path_buf(),
            instance: instance.clone(),
            reason,
            line: line.map(str::to_string),
        };

        let lines: Vec<&str> = text.lines().collect();
        let mut builder = ListingBuilder::default();

        let summary_start = lines.len().saturating_sub(STEP_SUMMARY_LINES);
        for (index, raw) in lines.iter().copied().enumerate().skip(summary_start) {
            let line = Line::new(index + 1, raw);
            apply_first(&STEP_SUMMARY_RULES, &mut builder, &line)
                .map_err(|failure| failure.into_review(|reason| malformed(reason, Some(raw))))?;
        }

        for (index, raw) in lines.iter().copied().enumerate() {
            let line = Line::new(index + 1, raw);
            apply_first(&BODY_RULES, &mut builder, &line)
                .map_err(|failure| failure.into_review(|reason| malformed(reason, Some(raw))))?;
        }

        let missing = |tag: &str| malformed(format!("missing `{tag}` tag"), None);
        let b = builder;

        let status_code = b.status_code.ok_or_else(|| missing("MODEL STATUS"))?;
        let status = ModelStatusRecord {
            code: status_code,
            label: self.codes.resolve(status_code)?,
        };

        if let Some(link) = link_mode.filter(|l| l.includes_solver_time()) {
            if !b.resource_usage_seen {
                return Err(ReviewError::InconsistentLinkMode {
                    path: path.to_path_buf(),
                    instance: instance.clone(),
                    link_mode: link,
                });
            }
        }

        let raw_execution = b.execution.ok_or_else(|| missing("EXECUTION"))?;
        let timing = TimingRecord {
            startup: b.startup.ok_or_else(|| missing("STARTUP"))?,
            compilation: b.compilation.ok_or_else(|| missing("COMPILATION"))?,
            execution: corrected_execution(raw_execution, b.solver_seconds, link_mode),
            generation: b.generation.unwrap_or(0.0),
            solver: self.mode.solves().then_some(b.solver_seconds),
            closedown: b.closedown.ok_or_else(|| missing("CLOSEDOWN"))?,
            total_seconds: b.total_seconds.ok_or_else(|| missing("TOTAL SECONDS"))?,
            elapsed: b.elapsed.ok_or_else(|| missing("ELAPSED SECONDS"))?,
        };

        let shape = ProblemShapeRecord {
            rows: b.rows.ok_or_else(|| missing("SINGLE EQUATIONS"))?,
            columns: b.columns.ok_or_else(|| missing("SINGLE VARIABLES"))?,
            non_zeros: b.non_zeros.ok_or_else(|| missing("NON ZERO ELEMENT"))?,
            rhs: b.rhs.ok_or_else(|| missing("RHS [min, max]"))?,
            bound: b.bound.ok_or_else(|| missing("Bound [min, max]"))?,
            matrix: b.matrix.ok_or_else(|| missing("Matrix [min, max]"))?,
        };

        Ok(ListingRecord {
            timing,
            status,
            shape,
        })
    }
}
