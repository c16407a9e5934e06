//! Run log fixtures.
//!
//! # Example
//!
//! ```
//! use solvereview_test::log::LogFixture;
//!
//! let log = LogFixture::new().with_link_mode(2).with_rss(1800.0, "MB").render();
//! assert!(log.contains("(Solvelink=2):"));
//! assert!(log.contains("highwater RSS 1800 MB"));
//! ```

/// A run log with configurable link mode and memory lines.
#[derive(Clone, Debug, PartialEq)]
pub struct LogFixture {
    pub link_mode: Option<u8>,
    pub rss: Option<(f64, String)>,
    pub vss: Option<(f64, String)>,
}

impl LogFixture {
    /// Creates a full-solve log: link mode 5, 2451.23 MB RSS, 3.1 GB VSS.
    pub fn new() -> Self {
        Self {
            link_mode: Some(5),
            rss: Some((2451.23, "MB".to_string())),
            vss: Some((3.1, "GB".to_string())),
        }
    }

    /// Creates a log of a run that loaded a solution and never linked a solver.
    pub fn load_only() -> Self {
        Self {
            link_mode: None,
            ..Self::new()
        }
    }

    pub fn with_link_mode(mut self, link_mode: u8) -> Self {
        self.link_mode = Some(link_mode);
        self
    }

    pub fn with_rss(mut self, value: f64, unit: &str) -> Self {
        self.rss = Some((value, unit.to_string()));
        self
    }

    pub fn with_vss(mut self, value: f64, unit: &str) -> Self {
        self.vss = Some((value, unit.to_string()));
        self
    }

    pub fn without_rss(mut self) -> Self {
        self.rss = None;
        self
    }

    pub fn without_vss(mut self) -> Self {
        self.vss = None;
        self
    }

    /// Renders the log text.
    pub fn render(&self) -> String {
        let mut lines = vec![
            "--- Job Instance.RUN Start 10/16/26 10:00:00 47.6.0 r2b1c3d4 LEX-LEG x86 64bit/Linux"
                .to_string(),
            "--- Applying:".to_string(),
            "    /opt/gams/gmsprmun.txt".to_string(),
            "--- GAMS Parameters defined".to_string(),
            "--- Starting compilation".to_string(),
            "--- Starting execution: elapsed 0:00:01.250".to_string(),
            "--- Generating LP model TIMES".to_string(),
        ];
        if let Some(link) = self.link_mode {
            lines.push(format!(
                "--- Executing CPLEX (Solvelink={link}): elapsed 0:01:23.456"
            ));
            lines.push("--- Executing after solve: elapsed 0:01:40.000".to_string());
        } else {
            lines.push("--- Loading solution from savepoint TIMES_p.gdx".to_string());
        }
        lines.push("*** Status: Normal completion".to_string());
        lines.push("--- Job Instance.RUN Stop 10/16/26 10:05:00 elapsed 0:05:00.123".to_string());
        if let Some((value, unit)) = &self.rss {
            lines.push(format!("--- Process tree highwater RSS {value} {unit}"));
        }
        if let Some((value, unit)) = &self.vss {
            lines.push(format!("--- Process tree highwater VSS {value} {unit}"));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

impl Default for LogFixture {
    fn default() -> Self {
        Self::new()
    }
}
