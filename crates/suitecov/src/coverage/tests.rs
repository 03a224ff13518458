//! Tests for coverage collection: data model, filter, probe and engine.

#![allow(clippy::float_cmp)]

use super::*;
use crate::result::CoverageError;
use std::path::{Path, PathBuf};

// ============================================================================
// Collection result
// ============================================================================

mod coverage_data_tests {
    use super::*;

    #[test]
    fn test_new_data_is_empty() {
        let data = CoverageData::new();
        assert!(data.is_empty());
        assert!(data.units().is_empty());
        assert_eq!(data.summary(), CoverageSummary::default());
    }

    #[test]
    fn test_declared_line_counts_as_uncovered() {
        let mut data = CoverageData::new();
        data.declare_line("src/lib.rs", 7);
        let summary = data.summary();
        assert_eq!(summary.total_lines, 1);
        assert_eq!(summary.covered_lines, 0);
        assert_eq!(summary.coverage_percent(), 0.0);
    }

    #[test]
    fn test_declare_does_not_reset_hits() {
        let mut data = CoverageData::new();
        data.record_hits("src/lib.rs", 7, 2, None);
        data.declare_line("src/lib.rs", 7);
        assert_eq!(data.hit_count("src/lib.rs", 7), 2);
    }

    #[test]
    fn test_record_hits_accumulates_and_attributes() {
        let mut data = CoverageData::new();
        data.record_hits("src/lib.rs", 3, 1, Some("A"));
        data.record_hits("src/lib.rs", 3, 4, Some("B"));
        let line = data.file("src/lib.rs").unwrap().line(3).unwrap();
        assert_eq!(line.hits, 5);
        assert_eq!(
            line.covered_by.iter().cloned().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_zero_count_does_not_attribute() {
        let mut data = CoverageData::new();
        data.record_hits("src/lib.rs", 3, 0, Some("A"));
        assert!(data.file("src/lib.rs").unwrap().line(3).unwrap().covered_by.is_empty());
    }

    #[test]
    fn test_hit_count_for_untracked_line() {
        assert_eq!(CoverageData::new().hit_count("nope.rs", 1), 0);
    }

    #[test]
    fn test_summary_percent() {
        let mut data = CoverageData::new();
        data.record_hits("a.rs", 1, 1, None);
        data.record_hits("a.rs", 2, 1, None);
        data.declare_line("b.rs", 1);
        let summary = data.summary();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.total_lines, 3);
        assert_eq!(summary.covered_lines, 2);
        assert!((summary.coverage_percent() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_summary_is_vacuously_full() {
        assert_eq!(CoverageSummary::default().coverage_percent(), 100.0);
        assert_eq!(CoverageSummary::default().line_rate(), 1.0);
    }

    #[test]
    fn test_merge() {
        let mut left = CoverageData::new();
        left.add_unit("A");
        left.record_hits("a.rs", 1, 1, Some("A"));

        let mut right = CoverageData::new();
        right.add_unit("A");
        right.add_unit("B");
        right.record_hits("a.rs", 1, 2, Some("B"));
        right.declare_line("b.rs", 9);

        left.merge(&right);

        assert_eq!(left.hit_count("a.rs", 1), 3);
        assert_eq!(left.file("a.rs").unwrap().line(1).unwrap().covered_by.len(), 2);
        assert!(left.file("b.rs").is_some());
        assert_eq!(left.units(), &["A".to_string(), "B".to_string()]);
    }
}

// ============================================================================
// Path filter
// ============================================================================

mod path_filter_tests {
    use super::*;

    #[test]
    fn test_default_includes_everything() {
        let filter = PathFilter::new();
        assert!(filter.includes(Path::new("src/lib.rs")));
        assert!(!filter.has_whitelist());
        assert!(!filter.has_blacklist());
    }

    #[test]
    fn test_whitelist_directory() {
        let mut filter = PathFilter::new();
        filter.add_directory_to_whitelist(Path::new("src")).unwrap();
        assert!(filter.includes(Path::new("src/lib.rs")));
        assert!(filter.includes(Path::new("src/deep/mod.rs")));
        assert!(!filter.includes(Path::new("tests/it.rs")));
    }

    #[test]
    fn test_directory_match_is_component_wise() {
        let mut filter = PathFilter::new();
        filter.add_directory_to_whitelist(Path::new("src")).unwrap();
        assert!(!filter.includes(Path::new("src2/lib.rs")));
    }

    #[test]
    fn test_trailing_slash_directory() {
        let mut filter = PathFilter::new();
        filter.add_directory_to_whitelist(Path::new("src/")).unwrap();
        assert!(filter.includes(Path::new("src/lib.rs")));
    }

    #[test]
    fn test_whitelist_files() {
        let mut filter = PathFilter::new();
        filter
            .add_files_to_whitelist(&[PathBuf::from("lib/a.rs")])
            .unwrap();
        assert!(filter.includes(Path::new("lib/a.rs")));
        assert!(!filter.includes(Path::new("lib/b.rs")));
    }

    #[test]
    fn test_blacklist_without_whitelist() {
        let mut filter = PathFilter::new();
        filter.add_directory_to_blacklist(Path::new("vendor")).unwrap();
        filter
            .add_files_to_blacklist(&[PathBuf::from("src/generated.rs")])
            .unwrap();
        assert!(!filter.includes(Path::new("vendor/x.rs")));
        assert!(!filter.includes(Path::new("src/generated.rs")));
        assert!(filter.includes(Path::new("src/lib.rs")));
    }

    #[test]
    fn test_whitelist_wins_over_blacklist() {
        let mut filter = PathFilter::new();
        filter.add_directory_to_whitelist(Path::new("src")).unwrap();
        filter.add_directory_to_blacklist(Path::new("src")).unwrap();
        assert!(filter.includes(Path::new("src/lib.rs")));
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut filter = PathFilter::new();
        assert!(matches!(
            filter.add_directory_to_whitelist(Path::new("")),
            Err(CoverageError::Config { .. })
        ));
        assert!(filter.add_files_to_blacklist(&[PathBuf::new()]).is_err());
    }
}

// ============================================================================
// Probe and recording engine
// ============================================================================

mod recording_engine_tests {
    use super::*;

    #[test]
    fn test_new_engine_is_idle() {
        let engine = RecordingEngine::new();
        assert!(!engine.is_collecting());
        assert_eq!(engine.current_window(), None);
        assert_eq!(engine.windows_closed(), 0);
    }

    #[test]
    fn test_start_stop_records_hits_for_window() {
        let mut engine = RecordingEngine::new();
        let probe = engine.probe();

        engine.start("Login").unwrap();
        assert_eq!(engine.current_window(), Some("Login"));
        probe.hit("src/auth.rs", 10);
        probe.hit("src/auth.rs", 10);
        probe.hit_n("src/auth.rs", 11, 3);
        assert!(probe.has_pending());
        engine.stop().unwrap();

        assert!(!probe.has_pending());
        let data = engine.data();
        assert_eq!(data.hit_count("src/auth.rs", 10), 2);
        assert_eq!(data.hit_count("src/auth.rs", 11), 3);
        assert!(data
            .file("src/auth.rs")
            .unwrap()
            .line(10)
            .unwrap()
            .covered_by
            .contains("Login"));
        assert_eq!(data.units(), &["Login".to_string()]);
    }

    #[test]
    fn test_start_while_open_fails() {
        let mut engine = RecordingEngine::new();
        engine.start("A").unwrap();
        let err = engine.start("B").unwrap_err();
        assert!(matches!(err, CoverageError::WindowAlreadyOpen { .. }));
        assert_eq!(engine.current_window(), Some("A"));
    }

    #[test]
    fn test_stop_without_start_fails() {
        let mut engine = RecordingEngine::new();
        assert!(matches!(engine.stop(), Err(CoverageError::NoOpenWindow)));
    }

    #[test]
    fn test_hits_outside_window_are_discarded() {
        let mut engine = RecordingEngine::new();
        let probe = engine.probe();

        probe.hit("src/setup.rs", 1);
        engine.start("A").unwrap();
        probe.hit("src/a.rs", 1);
        engine.stop().unwrap();

        let data = engine.data();
        assert_eq!(data.hit_count("src/setup.rs", 1), 0);
        assert!(data.file("src/setup.rs").is_none());
        assert_eq!(data.hit_count("src/a.rs", 1), 1);
    }

    #[test]
    fn test_hits_attributed_to_their_own_window() {
        let mut engine = RecordingEngine::new();
        let probe = engine.probe();

        engine.start("A").unwrap();
        probe.hit("x.rs", 1);
        engine.stop().unwrap();
        engine.start("B").unwrap();
        probe.hit("x.rs", 2);
        engine.stop().unwrap();

        let data = engine.data();
        let file = data.file("x.rs").unwrap();
        assert!(file.line(1).unwrap().covered_by.contains("A"));
        assert!(!file.line(1).unwrap().covered_by.contains("B"));
        assert!(file.line(2).unwrap().covered_by.contains("B"));
        assert_eq!(engine.windows_closed(), 2);
        assert_eq!(engine.flush_count(), 2);
    }

    #[test]
    fn test_declared_lines_visible_without_windows() {
        let mut engine = RecordingEngine::new();
        engine.probe().declare("src/lib.rs", [1, 2, 3]);

        let summary = engine.data().summary();
        assert_eq!(summary.total_lines, 3);
        assert_eq!(summary.covered_lines, 0);
    }

    #[test]
    fn test_filter_excludes_hits_and_declarations() {
        let mut engine = RecordingEngine::new();
        engine
            .filter()
            .add_directory_to_whitelist(Path::new("src"))
            .unwrap();
        let probe = engine.probe();
        probe.declare("tests/it.rs", [1]);

        engine.start("A").unwrap();
        probe.hit("src/lib.rs", 1);
        probe.hit("tests/it.rs", 1);
        engine.stop().unwrap();

        let data = engine.data();
        assert!(data.file("src/lib.rs").is_some());
        assert!(data.file("tests/it.rs").is_none());
        assert!(engine.path_filter().has_whitelist());
    }

    #[test]
    fn test_open_window_hits_not_in_data() {
        let mut engine = RecordingEngine::new();
        let probe = engine.probe();
        engine.start("A").unwrap();
        probe.hit("x.rs", 1);
        assert!(engine.data().is_empty());
    }

    #[test]
    fn test_attached_engine_shares_probe() {
        let probe = Probe::default();
        probe.declare("src/lib.rs", [1, 2]);
        probe.hit("src/lib.rs", 1);

        let mut engine = RecordingEngine::attached(&probe);
        engine.start("A").unwrap();
        probe.hit("src/lib.rs", 2);
        engine.stop().unwrap();

        let data = engine.data();
        assert_eq!(data.hit_count("src/lib.rs", 1), 0);
        assert_eq!(data.hit_count("src/lib.rs", 2), 1);
        assert_eq!(data.summary().total_lines, 2);
    }

    #[test]
    fn test_boxed_engine_delegates() {
        let mut engine: Box<dyn InstrumentationEngine> = Box::new(RecordingEngine::new());
        engine.start("A").unwrap();
        engine.stop().unwrap();
        assert_eq!(engine.data().units(), &["A".to_string()]);
    }
}
