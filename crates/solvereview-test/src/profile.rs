//! Profiling trace fixtures.

use std::fmt;

/// One statement line of a profiling trace.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileLine {
    pub line: u32,
    pub calls: u64,
    pub seconds: f64,
    pub memory: f64,
    pub description: String,
}

impl fmt::Display for ProfileLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>7} {:>7} {:>10.3} {:>9.1}  {}",
            self.line, self.calls, self.seconds, self.memory, self.description
        )
    }
}

/// A profiling trace with a header line followed by statement lines.
///
/// # Example
///
/// ```
/// use solvereview_test::ProfileFixture;
///
/// let trace = ProfileFixture::new()
///     .with_entry(120, 4.0, "Assignment cost_act(r,t)")
///     .render();
/// assert!(trace.lines().nth(1).unwrap().ends_with("Assignment cost_act(r,t)"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileFixture {
    pub entries: Vec<ProfileLine>,
    extra_lines: Vec<String>,
}

impl ProfileFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A trace with four statements totalling 30 seconds.
    pub fn typical() -> Self {
        Self::new()
            .with_entry(120, 4.0, "Assignment cost_act(r,t)")
            .with_entry(88, 12.0, "Solve TIMES using LP")
            .with_entry(451, 9.5, "Loop over regions")
            .with_entry(77, 4.5, "Assignment cost_act(r,t)")
    }

    pub fn with_entry(mut self, line: u32, seconds: f64, description: &str) -> Self {
        self.entries.push(ProfileLine {
            line,
            calls: 1,
            seconds,
            memory: 12.5,
            description: description.to_string(),
        });
        self
    }

    /// Appends a verbatim line after the statement lines.
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.extra_lines.push(line.to_string());
        self
    }

    /// Renders the trace text.
    pub fn render(&self) -> String {
        let mut text = String::from("   Line   Calls   Time [s]  Mem [MB]  Statement\n");
        for entry in &self.entries {
            text.push_str(&entry.to_string());
            text.push('\n');
        }
        for line in &self.extra_lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}
