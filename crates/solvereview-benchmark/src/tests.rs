//! Tests for tables, comparison and reports.

use std::path::Path;

use solvereview_core::{InstanceKey, ReviewError};
use solvereview_parse::{ProfileEntry, ProfileTable};

use super::*;

fn row(name: &str, elapsed: f64) -> InstanceRow {
    InstanceRow {
        instance: InstanceKey::from(name),
        model_status: "OPTIMAL".to_string(),
        elapsed,
        total_seconds: 96.797,
        compilation: 1.25,
        execution: 83.0,
        generation: 10.0,
        solver: Some(12.5),
        startup: 0.016,
        closedown: 0.031,
        highwater_rss_gb: 2.45,
        highwater_vss_gb: 3.1,
        rows: 1000,
        columns: 2000,
        non_zeros: 50_000,
        non_zeros_per_second: Some(5000.0),
        rhs: "1.000E+00, 5.000E+03".to_string(),
        bound: "2.000E-01, 1.000E+04".to_string(),
        matrix: "1.000E-03, 8.760E+03".to_string(),
    }
}

fn comparator() -> BaselineComparator {
    BaselineComparator::new("ground_truth.csv")
}

mod metrics {
    use super::*;

    #[test]
    fn test_delta_columns_follow_metric_order() {
        assert_eq!(Metric::ALL.len(), METRIC_COUNT);

        let mut deltas = [None; METRIC_COUNT];
        for (i, slot) in deltas.iter_mut().enumerate() {
            *slot = Some(i as f64);
        }
        let row = DeltaRow {
            label: "Instance_1".to_string(),
            deltas,
        };
        for (i, metric) in Metric::ALL.into_iter().enumerate() {
            assert_eq!(row.delta(metric), Some(i as f64), "{metric:?}");
        }
    }

    #[test]
    fn test_headers() {
        let headers: Vec<String> = Metric::ALL.iter().map(|m| m.header()).collect();
        assert_eq!(headers[0], "Elapsed Time [s]");
        assert_eq!(headers[8], "Highwater RSS [GB]");
        assert_eq!(headers[10], "# Rows");
        assert_eq!(headers[13], "# Non Zeros per s");

        let deltas: Vec<String> = Metric::ALL.iter().map(|m| m.delta_header()).collect();
        assert_eq!(deltas[5], "Solver Time [%]");
        assert_eq!(deltas[9], "Highwater VSS [%]");
        assert_eq!(deltas[13], "# Non Zeros per s [%]");
    }

    #[test]
    fn test_row_metrics() {
        let mut r = row("Instance_1", 110.0);
        assert_eq!(r.metric(Metric::Elapsed), Some(110.0));
        assert_eq!(r.metric(Metric::NonZeros), Some(50_000.0));
        r.solver = None;
        assert_eq!(r.metric(Metric::Solver), None);
    }

    #[test]
    fn test_non_zeros_per_second() {
        assert_eq!(non_zeros_per_second(50_000, 10.0), Some(5000.0));
        assert_eq!(non_zeros_per_second(50_000, 0.0), None);
        assert_eq!(non_zeros_per_second(0, 4.0), Some(0.0));
    }
}

mod deltas {
    use super::*;

    #[test]
    fn test_percentage_delta() {
        assert_eq!(percentage_delta(Some(110.0), Some(100.0)), Some(10.0));
        assert_eq!(percentage_delta(Some(90.0), Some(100.0)), Some(-10.0));
        assert_eq!(percentage_delta(Some(1.0), Some(3.0)), Some(-66.67));
        assert_eq!(percentage_delta(Some(5.0), Some(0.0)), Some(f64::INFINITY));
        assert_eq!(percentage_delta(Some(0.0), Some(0.0)), None);
        assert_eq!(percentage_delta(Some(1.0), None), None);
    }

    #[test]
    fn test_elapsed_delta_and_mean() {
        let new = InstanceTable::from_rows(vec![row("Instance_1", 110.0), row("Instance_2", 120.0)]);
        let baseline =
            InstanceTable::from_rows(vec![row("Instance_1", 100.0), row("Instance_2", 100.0)]);

        let delta = comparator().delta(&new, &baseline).unwrap();
        assert_eq!(delta.len(), 3);

        let first = delta.get("Instance_1").unwrap();
        assert_eq!(first.delta(Metric::Elapsed), Some(10.0));
        assert_eq!(first.delta(Metric::Rows), Some(0.0));

        let mean = delta.mean().unwrap();
        assert_eq!(mean.label, "mean");
        assert_eq!(mean.delta(Metric::Elapsed), Some(15.0));
        assert_eq!(delta.rows().last().unwrap().label, MEAN_ROW);
    }

    #[test]
    fn test_self_comparison_is_all_zero() {
        let table = InstanceTable::from_rows(vec![row("Instance_1", 110.0), row("Instance_2", 97.5)]);
        let delta = comparator().delta(&table, &table).unwrap();

        for delta_row in delta.rows() {
            for value in delta_row.deltas {
                assert_eq!(value, Some(0.0), "row {}", delta_row.label);
            }
        }
    }

    #[test]
    fn test_missing_solver_time_stays_undefined() {
        let mut new_row = row("Instance_1", 110.0);
        new_row.solver = None;
        let mut base_row = row("Instance_1", 100.0);
        base_row.solver = None;

        let delta = comparator()
            .delta(
                &InstanceTable::from_rows(vec![new_row]),
                &InstanceTable::from_rows(vec![base_row]),
            )
            .unwrap();
        assert_eq!(delta.get("Instance_1").unwrap().delta(Metric::Solver), None);
        assert_eq!(delta.mean().unwrap().delta(Metric::Solver), None);
    }

    #[test]
    fn test_instance_without_baseline_is_dropped() {
        let new = InstanceTable::from_rows(vec![row("Instance_1", 110.0), row("Instance_3", 50.0)]);
        let baseline = InstanceTable::from_rows(vec![row("Instance_1", 100.0)]);

        let delta = comparator().delta(&new, &baseline).unwrap();
        let labels: Vec<&str> = delta.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Instance_1", "mean"]);
    }

    #[test]
    fn test_disjoint_tables_are_a_schema_mismatch() {
        let new = InstanceTable::from_rows(vec![row("Instance_1", 110.0)]);
        let baseline = InstanceTable::from_rows(vec![row("Other", 100.0)]);

        let err = comparator().delta(&new, &baseline).unwrap_err();
        assert!(matches!(err, ReviewError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_missing_baseline_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ground_truth.csv");
        let new = InstanceTable::from_rows(vec![row("Instance_1", 110.0)]);

        match BaselineComparator::new(&path).compare(&new) {
            Err(ReviewError::MissingBaseline(missing)) => assert_eq!(missing, path),
            other => panic!("expected MissingBaseline, got {other:?}"),
        }
    }

    #[test]
    fn test_delta_markdown() {
        let new = InstanceTable::from_rows(vec![row("Instance_1", 110.0)]);
        let baseline = InstanceTable::from_rows(vec![row("Instance_1", 100.0)]);
        let markdown = comparator().delta(&new, &baseline).unwrap().to_markdown();

        let header = markdown.lines().next().unwrap();
        assert!(header.starts_with("| Instance   | Elapsed Time [%] |"), "{header}");
        assert!(markdown.contains("10.00"));
        assert!(markdown.lines().last().unwrap().starts_with("| mean"));
    }
}

mod csv_tables {
    use super::*;

    #[test]
    fn test_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("result_overview.csv");
        let mut second = row("Instance_2", 97.5);
        second.solver = None;
        second.non_zeros_per_second = None;
        let table = InstanceTable::from_rows(vec![row("Instance_1", 110.0), second]);

        CsvExporter::to_file(&table, &path).unwrap();
        let loaded = CsvExporter::read(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_csv_layout() {
        let mut r = row("Instance_1", 110.0);
        r.solver = None;
        let csv = CsvExporter::to_string(&InstanceTable::from_rows(vec![r])).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Instance,Model Status,Elapsed Time [s],Total Seconds [s],Compilation Time [s],\
             Execution Time [s],Generation Time [s],Solver Time [s],Startup Time [s],\
             Closedown Time [s],Highwater RSS [GB],Highwater VSS [GB],# Rows,# Columns,\
             # Non Zeros,# Non Zeros per s,RHS [min, max],Bound [min, max],Matrix [min, max]"
        );
        let data = lines.next().unwrap();
        assert!(data.starts_with("Instance_1,OPTIMAL,110.0,"), "{data}");
        assert!(data.contains(",10.0,,0.016,"), "{data}");
        assert!(data.ends_with("\"1.000E-03, 8.760E+03\""), "{data}");
    }

    #[test]
    fn test_missing_column_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("baseline.csv");
        std::fs::write(&path, "Instance,Model Status\nInstance_1,OPTIMAL\n").unwrap();

        let err = CsvExporter::read(&path).unwrap_err();
        assert!(matches!(err, ReviewError::SchemaMismatch { .. }), "{err}");
    }

    #[test]
    fn test_missing_instance_column_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("baseline.csv");
        std::fs::write(&path, "Name,Elapsed Time [s]\nInstance_1,100.0\n").unwrap();

        match CsvExporter::read(&path) {
            Err(ReviewError::SchemaMismatch { reason, .. }) => {
                assert!(reason.contains("Instance"), "{reason}")
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }
}

mod profiles {
    use super::*;

    fn entry(line: u32, seconds: f64, description: &str) -> ProfileEntry {
        ProfileEntry {
            line,
            calls: 1,
            cumulative_seconds: seconds,
            memory: 0.0,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_totals_sum_across_instances() {
        let first = ProfileTable::new(
            vec![entry(1, 2.0, "Loop"), entry(2, 1.5, "Solve"), entry(9, 0.5, "Solve")],
            10.0,
        );
        let second = ProfileTable::new(vec![entry(4, 3.0, "Solve"), entry(5, 1.0, "Put")], 20.0);

        let summary = ProfileSummary::from_tables(&[
            (InstanceKey::from("Instance_1"), first),
            (InstanceKey::from("Instance_2"), second),
        ]);

        let solve = &summary.rows()[0];
        assert_eq!(solve.description, "Solve");
        assert_eq!(solve.total_seconds, 5.0);
        assert_eq!(solve.share_by_instance, vec![Some(20.0), Some(15.0)]);
        assert_eq!(summary.rows()[1].description, "Loop");
        assert_eq!(summary.rows()[2].description, "Put");
    }

    #[test]
    fn test_ties_keep_description_order() {
        let table = ProfileTable::new(
            vec![entry(1, 1.0, "b"), entry(2, 1.0, "a"), entry(3, 1.0, "c")],
            10.0,
        );
        let summary = ProfileSummary::from_tables(&[(InstanceKey::from("I"), table)]);
        let order: Vec<&str> = summary.rows().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_top_rows_rendered() {
        let entries = (0..20)
            .map(|i| entry(i, f64::from(i), &format!("statement {i:02}")))
            .collect();
        let summary = ProfileSummary::from_tables(&[(
            InstanceKey::from("Instance_1"),
            ProfileTable::new(entries, 100.0),
        )]);

        assert_eq!(summary.len(), 20);
        assert_eq!(summary.top(15).len(), 15);
        assert_eq!(summary.top(50).len(), 20);

        let markdown = summary.to_markdown(15);
        assert_eq!(markdown.lines().count(), 2 + 15);
        assert!(markdown.contains("statement 19"));
        assert!(!markdown.contains("statement 04"));
        assert!(markdown.lines().next().unwrap().contains("Instance_1 [%]"));
    }
}

mod reports {
    use super::*;

    #[test]
    fn test_section_order() {
        let new = InstanceTable::from_rows(vec![row("Instance_1", 110.0)]);
        let baseline = InstanceTable::from_rows(vec![row("Instance_1", 100.0)]);
        let delta = comparator().delta(&new, &baseline).unwrap();

        let report = MarkdownReport::to_string(&baseline, &new, &delta);
        let improvement = report.find("## Improvement").unwrap();
        let new_section = report.find("## New").unwrap();
        let truth = report.find("## Ground Truth").unwrap();
        assert!(report.starts_with("# Results\n\n"));
        assert!(improvement < new_section && new_section < truth);
        assert!(report[improvement..new_section].contains("Elapsed Time [%]"));
        assert!(report[new_section..truth].contains("110.00"));
        assert!(report[truth..].contains("100.00"));
    }

    #[test]
    fn test_instance_table_formatting() {
        let mut r = row("Instance_1", 1234.5);
        r.solver = None;
        let markdown = InstanceTable::from_rows(vec![r]).to_markdown();

        assert!(markdown.contains("1,234.50"));
        assert!(markdown.contains("50,000"));
        assert!(markdown.contains("5,000.00"));
        assert!(markdown.contains(" nan "));
        assert!(markdown.contains("1.000E+00, 5.000E+03"));
    }

    #[test]
    fn test_writer_replaces_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.md");
        std::fs::write(&path, "stale").unwrap();

        let table = InstanceTable::from_rows(vec![row("Instance_1", 110.0)]);
        let delta = comparator().delta(&table, &table).unwrap();
        let writer = ReportWriter::new(&path);
        writer.write(&table, &table, &delta).unwrap();

        let report = std::fs::read_to_string(&path).unwrap();
        assert!(report.starts_with("# Results"));
        assert!(!report.contains("stale"));
        assert_eq!(writer.path(), Path::new(&path));
    }
}
