//! Tests for core types.

use super::*;
use crate::numeric::*;

mod status_codes {
    use super::*;

    #[test]
    fn test_all_nineteen_codes_resolve() {
        let codes = StatusCodes::standard();
        assert_eq!(codes.len(), 19);
        for code in 1..=19 {
            assert!(codes.resolve(code).is_ok(), "code {code} should resolve");
        }
        assert_eq!(codes.resolve(1).unwrap(), "OPTIMAL");
        assert_eq!(codes.resolve(19).unwrap(), "INFEASIBLE - NO SOLUTION");
    }

    #[test]
    fn test_unknown_code_is_error() {
        let codes = StatusCodes::standard();
        for code in [0, 20, -1] {
            match codes.resolve(code) {
                Err(ReviewError::UnknownStatusCode(c)) => assert_eq!(c, code),
                other => panic!("expected UnknownStatusCode, got {other:?}"),
            }
        }
    }
}

mod modes {
    use super::*;

    #[test]
    fn test_run_mode_parsing() {
        assert_eq!("SOLVE".parse::<RunMode>().unwrap(), RunMode::FullSolve);
        assert_eq!("full_solve".parse::<RunMode>().unwrap(), RunMode::FullSolve);
        assert_eq!("load_only".parse::<RunMode>().unwrap(), RunMode::LoadOnly);
        assert!(matches!(
            "CONTINUE".parse::<RunMode>(),
            Err(ReviewError::UnsupportedRunMode(_))
        ));
    }

    #[test]
    fn test_run_mode_display_uses_solver_spelling() {
        assert_eq!(RunMode::FullSolve.to_string(), "SOLVE");
        assert_eq!(RunMode::LoadOnly.to_string(), "LOADSOLUTION");
    }

    #[test]
    fn test_link_modes_with_solver_time() {
        let correcting: Vec<u8> = (0..=7)
            .filter(|&c| LinkMode::new(c).includes_solver_time())
            .collect();
        assert_eq!(correcting, vec![1, 2, 5]);
    }
}

mod numbers {
    use super::*;

    #[test]
    fn test_round_decimal2() {
        assert_eq!(round_decimal2(3.14159), 3.14);
        assert_eq!(round_decimal2(12.0), 12.0);
        assert_eq!(round_decimal2(812.117 / 1000.0), 0.81);
    }

    #[test]
    fn test_round_half_even2() {
        assert_eq!(round_half_even2(12.345678), 12.35);
        assert_eq!(round_half_even2(0.0), 0.0);
        assert!(round_half_even2(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_grouped_parsing() {
        assert_eq!(parse_grouped_u64("50,000"), Some(50_000));
        assert_eq!(parse_grouped_u64("7"), Some(7));
        assert_eq!(parse_grouped_u64(""), None);
        assert_eq!(parse_grouped_u64("-5"), None);
    }

    #[test]
    fn test_grouped_formatting() {
        assert_eq!(format_grouped_int(1_000_000), "1,000,000");
        assert_eq!(format_grouped_int(999), "999");
        assert_eq!(format_grouped_float(5000.0), "5,000.00");
        assert_eq!(format_grouped_float(0.004), "0.00");
        assert_eq!(format_grouped_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_optional_float(None), "nan");
    }
}

mod tables {
    use super::*;

    #[test]
    fn test_render_alignment_and_missing() {
        let mut table = MarkdownTable::new()
            .column("Name", Align::Left)
            .column("Value", Align::Right);
        table.push_row(vec![Cell::text("a"), Cell::Float(1.5)]);
        table.push_row(vec![Cell::text("bb"), Cell::Missing]);

        let md = table.render();
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "| Name | Value |");
        assert_eq!(lines[1], "|:-----|------:|");
        assert_eq!(lines[2], "| a    |  1.50 |");
        assert_eq!(lines[3], "| bb   |   nan |");
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = MarkdownTable::new()
            .column("A", Align::Left)
            .column("B", Align::Left);
        table.push_row(vec![Cell::text("x")]);
        assert!(table.render().contains("| x | "));
    }
}

mod errors {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_instance_context_wraps_once() {
        let key = InstanceKey::from("Instance_1");
        let err = ReviewError::UnknownStatusCode(99)
            .for_instance(&key)
            .for_instance(&key);

        assert!(matches!(err.root(), ReviewError::UnknownStatusCode(99)));
        let message = err.to_string();
        assert!(message.starts_with("instance `Instance_1`"));
        assert_eq!(message.matches("Instance_1").count(), 1);
    }

    #[test]
    fn test_malformed_message_includes_line() {
        let err = ReviewError::MalformedLog {
            path: PathBuf::from("out/out.log"),
            reason: "unrecognized memory unit `KB`".to_string(),
            line: Some("--- highwater RSS 12 KB\n".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("out/out.log"));
        assert!(message.contains("(line: `--- highwater RSS 12 KB`)"));
    }
}
