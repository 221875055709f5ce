//! End-to-end beam scenarios through the row processor and batch runner.

use calc_core::calculations::beam_analysis::InternalForces;
use calc_core::calculations::{calculate, solve, BeamSpec};
use calc_core::file_io::{load_report, read_rows, save_report, write_summary};
use calc_core::processor::{BatchProcessor, BeamOutcome, BeamProcessor, BeamRecord};
use calc_core::report::ProcessorSettings;
use calc_core::rows::BeamRow;
use calc_core::supports::{classify_labels, BeamType, Support};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn process(pairs: &[(&str, &str)], settings: ProcessorSettings) -> BeamOutcome {
    let row = BeamRow::from_pairs(pairs.iter().copied());
    BeamProcessor::new(settings).unwrap().process(&row).unwrap()
}

fn solved(pairs: &[(&str, &str)]) -> BeamRecord {
    match process(pairs, ProcessorSettings::default()) {
        BeamOutcome::Solved { record } => *record,
        other => panic!("expected solved, got {:?}", other),
    }
}

#[test]
fn scenario_a_simply_supported_midspan_point_load() {
    let pairs = [
        ("Length", "10"),
        ("Left Support", "pin"),
        ("Right Support", "roller"),
        ("Point Load", "10"),
        ("Point Location", "5"),
    ];
    let record = solved(&pairs);

    assert_eq!(record.beam_type, BeamType::SimplySupported);
    assert_eq!(record.left_reaction, 5.0);
    assert_eq!(record.right_reaction, 5.0);
    assert_eq!(record.fixed_moment, 0.0);
    // 100 samples straddle midspan: PL/4 = 25 within one step
    assert!(approx_eq(record.max_moment, 25.0, 0.3));

    // With a sample exactly at midspan the peak is exact
    let settings = ProcessorSettings {
        num_points: 101,
        ..ProcessorSettings::default()
    };
    let record = match process(&pairs, settings) {
        BeamOutcome::Solved { record } => record,
        other => panic!("expected solved, got {:?}", other),
    };
    assert_eq!(record.max_moment, 25.0);
    assert_eq!(record.max_moment_position, 5.0);
}

#[test]
fn scenario_b_cantilever_tip_load() {
    let record = solved(&[
        ("Length", "4"),
        ("Left Support", "fixed"),
        ("Right Support", "free"),
        ("Point Load", "8"),
        ("Point Location", "4"),
    ]);

    assert_eq!(record.beam_type, BeamType::Cantilever);
    assert_eq!(record.left_reaction, 8.0);
    assert_eq!(record.fixed_moment, 32.0);
    assert_eq!(record.right_reaction, 0.0);

    let spec = BeamSpec::new(4.0, Support::Fixed, Support::Free).with_point_load(8.0, 4.0);
    let reactions = solve(&spec, BeamType::Cantilever).unwrap();
    assert_eq!(reactions.left_moment_knm, 32.0);
    assert_eq!(reactions.right_moment_knm, 0.0);
}

#[test]
fn scenario_c_full_span_udl() {
    let record = solved(&[
        ("Length", "6"),
        ("Left Support", "pin"),
        ("Right Support", "roller"),
        ("Distributed Load", "2"),
        ("Distributed Extent", "6"),
        ("Distributed Start", "0"),
    ]);

    assert_eq!(record.left_reaction, 6.0);
    assert_eq!(record.right_reaction, 6.0);
    // wL²/8 = 9 at midspan; 100 samples miss midspan by half a step
    assert!(approx_eq(record.max_moment, 9.0, 0.01));
    assert!(approx_eq(record.max_moment_position, 3.0, 0.07));
    assert_eq!(record.max_shear, 6.0);
}

#[test]
fn scenario_d_roller_roller_defaults_to_simply_supported() {
    let classification = classify_labels("roller", "roller");
    assert_eq!(classification.beam_type, BeamType::SimplySupported);
    assert!(classification.fallback);

    let record = solved(&[
        ("Length", "5"),
        ("Left Support", "roller"),
        ("Right Support", "roller"),
        ("Point Load", "4"),
        ("Point Location", "1"),
    ]);
    assert_eq!(record.beam_type, BeamType::SimplySupported);
    assert_eq!(record.warnings.len(), 1);
    assert_eq!(record.left_reaction, 3.2);
    assert_eq!(record.right_reaction, 0.8);
}

#[test]
fn scenario_e_free_roller_is_unclassified_and_batch_continues() {
    let csv = "\
Length,Left Support,Right Support,Point Load,Point Location
5,free,roller,2,1
10,pin,roller,10,5
";
    let rows = read_rows(csv.as_bytes()).unwrap();
    let items = BatchProcessor::new(ProcessorSettings::default()).unwrap().run(&rows);

    assert_eq!(items.len(), 2);
    match &items[0].outcome {
        BeamOutcome::Unclassified { error } => assert_eq!(error.error_code(), "UNRESOLVED_SUPPORTS"),
        other => panic!("expected unclassified, got {:?}", other),
    }
    assert_eq!(items[1].row_index, 1);
    assert_eq!(items[1].outcome.record().unwrap().left_reaction, 5.0);
}

#[test]
fn simply_supported_reactions_balance_total_load() {
    let cases = [
        BeamSpec::new(8.0, Support::Pin, Support::Roller).with_point_load(12.5, 1.7),
        BeamSpec::new(8.0, Support::Roller, Support::Pin).with_distributed_load(3.3, 2.1, 4.4),
        BeamSpec::new(11.0, Support::Pin, Support::Roller)
            .with_point_load(7.0, 9.9)
            .with_distributed_load(1.25, 0.0, 11.0),
    ];

    for spec in &cases {
        let r = solve(spec, BeamType::SimplySupported).unwrap();
        assert!(approx_eq(r.left_kn + r.right_kn, spec.total_vertical_load_kn(), 0.002));
        assert_eq!(r.left_moment_knm, 0.0);
        assert_eq!(r.right_moment_knm, 0.0);
    }
}

#[test]
fn cantilever_reaction_equals_total_load() {
    let left = BeamSpec::new(5.0, Support::Fixed, Support::Free)
        .with_point_load(3.0, 2.0)
        .with_distributed_load(1.5, 1.0, 2.0);
    let r = solve(&left, BeamType::Cantilever).unwrap();
    assert_eq!(r.left_kn, 6.0);
    assert_eq!(r.right_kn, 0.0);

    let right = BeamSpec::new(5.0, Support::Free, Support::Fixed).with_point_load(3.0, 2.0);
    let r = solve(&right, BeamType::Cantilever).unwrap();
    assert_eq!(r.right_kn, 3.0);
    assert_eq!(r.left_kn, 0.0);
}

#[test]
fn positions_span_the_beam() {
    for (length, points) in [(10.0, 100), (3.7, 25), (0.5, 2)] {
        let spec = BeamSpec::new(length, Support::Pin, Support::Roller).with_point_load(1.0, length / 2.0);
        let result = calculate(&spec, points).unwrap();
        let xs = result.positions();

        assert_eq!(xs.len(), points);
        assert_eq!(xs[0], 0.0);
        assert_eq!(*xs.last().unwrap(), length);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }
}

#[test]
fn forces_at_left_end_match_reactions() {
    let specs = [
        BeamSpec::new(6.0, Support::Pin, Support::Roller).with_distributed_load(2.0, 1.0, 3.0),
        BeamSpec::new(4.0, Support::Fixed, Support::Free).with_point_load(8.0, 4.0),
        BeamSpec::new(4.0, Support::Free, Support::Fixed).with_point_load(8.0, 2.0),
    ];

    for spec in &specs {
        let beam_type = classify_labels(spec.left_support.label(), spec.right_support.label()).beam_type;
        let r = solve(spec, beam_type).unwrap();
        let forces = InternalForces::new(spec, &r);
        assert_eq!(forces.shear_at(0.0), r.left_kn);
        assert_eq!(forces.moment_at(0.0), r.left_moment_knm);
    }
}

#[test]
fn applied_moment_only_when_enabled() {
    let pairs = [
        ("Length", "4"),
        ("Left Support", "pin"),
        ("Applied Moment", "8"),
        ("Applied Moment Location", "1"),
    ];

    let off = match process(&pairs, ProcessorSettings::default()) {
        BeamOutcome::Solved { record } => record,
        other => panic!("expected solved, got {:?}", other),
    };
    assert_eq!(off.left_reaction, 0.0);
    assert_eq!(off.max_moment, 0.0);

    let settings = ProcessorSettings {
        apply_moment_loads: true,
        ..ProcessorSettings::default()
    };
    let on = match process(&pairs, settings) {
        BeamOutcome::Solved { record } => record,
        other => panic!("expected solved, got {:?}", other),
    };
    assert_eq!(on.left_reaction, -2.0);
    assert_eq!(on.right_reaction, 2.0);
    // Peak just right of the moment: -2·1 + 8 = 6
    assert!(approx_eq(on.max_moment, 6.0, 0.1));
}

#[test]
fn report_round_trip_through_files() {
    let csv = "\
Length,Left Support,Right Support,Point Load,Point Location,Distributed Load,Distributed Extent
10,pin,roller,10,5,,
0,pin,roller,,,,
6,Fixed,,,,2,6
4,free,pin,,,,
";
    let rows = read_rows(csv.as_bytes()).unwrap();
    let report = BatchProcessor::new(ProcessorSettings::default())
        .unwrap()
        .run_report("inline.csv", &rows);

    let summary = report.summary();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.solved, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.unclassified, 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    save_report(&report, &path).unwrap();
    let loaded = load_report(&path).unwrap();
    assert_eq!(loaded.items, report.items);

    let mut out = Vec::new();
    write_summary(&loaded, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.contains("1,failed,"));
    assert!(text.contains("3,unclassified,"));
}
