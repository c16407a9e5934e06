//! Colorful console output for review batches.
//!
//! Provides a custom `tracing` layer that formats pipeline events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (batch, instance, comparison, report)
//! - **WARN**: Suspicious input lines skipped by the parsers
//! - **DEBUG**: Rule matches and per-instance files written

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use solvereview_core::numeric::format_grouped_float;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static BATCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "solvereview=info";

/// Initializes the console output with the default filter.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with(DEFAULT_DIRECTIVE, true);
}

/// Initializes the console output with a fallback filter directive.
///
/// `RUST_LOG` takes precedence over `default_directive`. The banner is
/// skipped when `banner` is false.
pub fn init_with(default_directive: &str, banner: bool) {
    INIT.get_or_init(|| {
        if banner {
            print_banner();
        }

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ReviewConsoleLayer)
            .try_init();
    });
}

// Marks the start of a batch for elapsed time tracking.
fn mark_batch_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    BATCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since batch start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = BATCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let version_line = format!("solvereview v{} - solver result review", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", version_line.bright_cyan().bold());
    let _ = writeln!(stdout);
    let _ = stdout.flush();
}

/// A tracing layer that formats review events with colors.
pub struct ReviewConsoleLayer;

impl<S: Subscriber> Layer<S> for ReviewConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("solvereview") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if output.is_empty() {
            return;
        }
        if *metadata.level() <= Level::WARN {
            let _ = writeln!(io::stderr(), "{}", output);
        } else {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    instance: Option<String>,
    mode: Option<String>,
    path: Option<String>,
    baseline: Option<String>,
    solver: Option<String>,
    instance_count: Option<u64>,
    descriptions: Option<u64>,
    rendered: Option<u64>,
    rows: Option<u64>,
    non_zeros: Option<u64>,
    line: Option<u64>,
    elapsed: Option<f64>,
    execution: Option<f64>,
}

impl EventVisitor {
    fn set_text(&mut self, field: &str, value: String) {
        match field {
            "event" => self.event = Some(value),
            "message" => self.message = Some(value),
            "instance" => self.instance = Some(value),
            "mode" => self.mode = Some(value),
            "path" => self.path = Some(value),
            "baseline" => self.baseline = Some(value),
            "solver" => self.solver = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "instance_count" => self.instance_count = Some(value),
            "descriptions" => self.descriptions = Some(value),
            "rendered" => self.rendered = Some(value),
            "rows" => self.rows = Some(value),
            "non_zeros" => self.non_zeros = Some(value),
            "line" => self.line = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "elapsed" => self.elapsed = Some(value),
            "execution" => self.execution = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "batch_start" => format_batch_start(v),
        "instance_start" => format_instance_start(v),
        "instance_end" => format_instance_end(v),
        "profile_summary" => format_profile_summary(v),
        "batch_end" => format_batch_end(v),
        "compare_end" => format_compare_end(v),
        "report_written" => format_report_written(v),
        _ if level <= Level::WARN => format_problem(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_batch_start(v: &EventVisitor) -> String {
    mark_batch_start();
    let count = v.instance_count.unwrap_or(0);
    let mode = v.mode.as_deref().unwrap_or("?");

    format!(
        "{} {} Reviewing │ {} instances │ mode {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count.to_formatted_string(&Locale::en).bright_yellow(),
        mode.bright_magenta()
    )
}

fn format_instance_start(v: &EventVisitor) -> String {
    let instance = v.instance.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {}",
        format_elapsed(),
        "▶".bright_blue(),
        instance.white().bold()
    )
}

fn format_instance_end(v: &EventVisitor) -> String {
    let instance = v.instance.as_deref().unwrap_or("Unknown");
    let elapsed = v.elapsed.unwrap_or(0.0);
    let execution = v.execution.unwrap_or(0.0);
    let non_zeros = v.non_zeros.unwrap_or(0);

    let mut output = format!(
        "{} {} {} │ {} elapsed │ {} execution",
        format_elapsed(),
        "◀".bright_blue(),
        instance.white().bold(),
        format_seconds(elapsed).yellow(),
        format_seconds(execution).yellow(),
    );

    if let Some(solver) = v.solver.as_deref().and_then(unwrap_some) {
        output.push_str(&format!(" │ {}s solver", solver.yellow()));
    }

    output.push_str(&format!(
        " │ {} non zeros",
        non_zeros
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold()
    ));

    output
}

fn format_profile_summary(v: &EventVisitor) -> String {
    let descriptions = v.descriptions.unwrap_or(0);
    let rendered = v.rendered.unwrap_or(0);

    format!(
        "{} {} Profile summary │ {} of {} descriptions",
        format_elapsed(),
        "≡".bright_cyan(),
        rendered.to_formatted_string(&Locale::en).bright_yellow(),
        descriptions.to_formatted_string(&Locale::en).white()
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    let count = v.instance_count.unwrap_or(0);

    format!(
        "{} {} Review complete │ {} instances",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count.to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_compare_end(v: &EventVisitor) -> String {
    let rows = v.rows.unwrap_or(0);
    let baseline = v.baseline.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Compared │ {} delta rows │ {}",
        format_elapsed(),
        "Δ".bright_green().bold(),
        rows.to_formatted_string(&Locale::en).bright_yellow(),
        baseline.bright_black()
    )
}

fn format_report_written(v: &EventVisitor) -> String {
    let path = v.path.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Report │ {}",
        format_elapsed(),
        "✔".bright_green().bold(),
        path.white().bold()
    )
}

fn format_problem(v: &EventVisitor, level: Level) -> String {
    let message = v.message.as_deref().unwrap_or("");
    let tag = if level == Level::ERROR {
        "error".bright_red().bold().to_string()
    } else {
        "warn".yellow().bold().to_string()
    };

    let mut output = format!("{} {} {}", format_elapsed(), tag, message);
    if let Some(instance) = v.instance.as_deref() {
        output.push_str(&format!(" │ {}", instance.white()));
    }
    if let Some(path) = v.path.as_deref() {
        output.push_str(&format!(" │ {}", path.bright_black()));
    }
    if let Some(line) = v.line {
        output.push_str(&format!(" │ line {}", line));
    }
    output
}

/// Formats seconds with thousands separators and 2 decimals.
fn format_seconds(secs: f64) -> String {
    format!("{}s", format_grouped_float(secs))
}

// Strips the `Some(..)` wrapper of a debug-recorded option.
fn unwrap_some(s: &str) -> Option<&str> {
    s.strip_prefix("Some(")?.strip_suffix(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "0.00s");
        assert_eq!(format_seconds(95.5), "95.50s");
        assert_eq!(format_seconds(12_345.678), "12,345.68s");
        assert_eq!(format_seconds(1.999), "2.00s");
        assert_eq!(format_seconds(0.996), "1.00s");
        assert_eq!(format_seconds(999.999), "1,000.00s");
    }

    #[test]
    fn test_unwrap_some() {
        assert_eq!(unwrap_some("Some(12.5)"), Some("12.5"));
        assert_eq!(unwrap_some("None"), None);
    }

    #[test]
    fn test_instance_end_skips_missing_solver() {
        let visitor = EventVisitor {
            event: Some("instance_end".to_string()),
            instance: Some("Instance_1".to_string()),
            elapsed: Some(110.0),
            execution: Some(95.5),
            solver: Some("None".to_string()),
            non_zeros: Some(1_250_000),
            ..Default::default()
        };

        let output = format_event(&visitor, Level::INFO);
        assert!(output.contains("Instance_1"));
        assert!(output.contains("1,250,000"));
        assert!(output.contains("95.50s"));
        assert!(!output.contains("solver"));
    }

    #[test]
    fn test_instance_end_shows_solver() {
        let visitor = EventVisitor {
            event: Some("instance_end".to_string()),
            instance: Some("Instance_1".to_string()),
            solver: Some("Some(12.5)".to_string()),
            ..Default::default()
        };

        let output = format_event(&visitor, Level::INFO);
        assert!(output.contains("12.5"));
        assert!(output.contains("solver"));
    }

    #[test]
    fn test_unknown_info_event_is_silent() {
        let visitor = EventVisitor {
            message: Some("profile table written".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
    }

    #[test]
    fn test_warning_keeps_message() {
        let visitor = EventVisitor {
            message: Some("range line without keyword".to_string()),
            path: Some("output/Instance_1/out.lst".to_string()),
            line: Some(412),
            ..Default::default()
        };

        let output = format_event(&visitor, Level::WARN);
        assert!(output.contains("range line without keyword"));
        assert!(output.contains("out.lst"));
        assert!(output.contains("line 412"));
    }

    #[test]
    fn test_report_written() {
        let visitor = EventVisitor {
            event: Some("report_written".to_string()),
            path: Some("code_review/results.md".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).contains("code_review/results.md"));
    }
}
