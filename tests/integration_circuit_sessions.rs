use chrono::NaiveTime;

use rondo::catalog::Catalog;
use rondo::runner::{SessionRunner, SessionStatus};
use rondo::schedule;
use rondo::sequence::{total_secs, PhaseKind, SequenceBuilder};
use rondo::session::{
    SessionConfig, WarmUpStep, DEFAULT_COOL_DOWN_SECS, DEFAULT_REST_SECS, DEFAULT_WORK_SECS,
};

// Integration tests for whole-session workflows.
// These tests verify end-to-end behavior of plan building, tick-driven
// execution, and wall-clock projection.

#[test]
fn circuit_session_integration_full_strength_plan() {
    let catalog = Catalog::new("strength");
    let config = SessionConfig {
        exercises: catalog.exercise_names(),
        ..SessionConfig::default()
    };

    let sequence = SequenceBuilder::new(config).build().unwrap();

    // five exercises x three rounds: 15 work phases with 14 rests between
    assert_eq!(sequence.len(), 4 + 15 + 14 + 1);
    let expected_total =
        300 + 15 * DEFAULT_WORK_SECS + 14 * DEFAULT_REST_SECS + DEFAULT_COOL_DOWN_SECS;
    assert_eq!(total_secs(&sequence), expected_total);

    let mut runner = SessionRunner::new(sequence).unwrap();
    runner.start().unwrap();

    // walk the whole session one second at a time, logging phase entries
    let mut seen_kinds = vec![runner.current_phase().unwrap().kind];
    let mut last_index = runner.phase_index();
    while !runner.is_finished() {
        runner.tick().unwrap();
        if runner.is_finished() {
            break;
        }
        if runner.phase_index() != last_index {
            last_index = runner.phase_index();
            seen_kinds.push(runner.current_phase().unwrap().kind);
        }
    }

    // every phase was entered exactly once, in order
    assert_eq!(seen_kinds.len(), runner.sequence().len());
    assert_eq!(seen_kinds.first(), Some(&PhaseKind::WarmUp));
    assert_eq!(seen_kinds.last(), Some(&PhaseKind::CoolDown));

    // a rest only ever sits between two work phases
    for (i, kind) in seen_kinds.iter().enumerate() {
        if *kind == PhaseKind::Rest {
            assert_eq!(seen_kinds[i - 1], PhaseKind::Work, "rest at entry {i}");
            assert_eq!(seen_kinds[i + 1], PhaseKind::Work, "rest at entry {i}");
        }
    }

    assert_eq!(runner.elapsed_secs(), expected_total);
    assert_eq!(runner.status(), SessionStatus::Finished);
}

#[test]
fn circuit_session_integration_every_category_builds() {
    for name in ["strength", "core", "mobility"] {
        let catalog = Catalog::new(name);
        let config = SessionConfig {
            exercises: catalog.exercise_names(),
            ..SessionConfig::default()
        };

        let sequence = SequenceBuilder::new(config).build().unwrap();
        let work_phases = sequence
            .iter()
            .filter(|p| p.kind == PhaseKind::Work)
            .count();
        assert_eq!(work_phases, 15, "category {name}");

        // every work phase carries a catalog detail to show on screen
        for phase in sequence.iter().filter(|p| p.kind == PhaseKind::Work) {
            assert!(
                catalog.detail_for(&phase.label).is_some(),
                "{name} catalog is missing a detail for {}",
                phase.label
            );
        }
    }
}

#[test]
fn circuit_session_integration_progress_is_monotonic() {
    let config = SessionConfig {
        exercises: vec!["A".to_string(), "B".to_string()],
        work_secs: 3,
        rest_secs: 2,
        rounds: 2,
        warm_up: vec![WarmUpStep::new("W", 2)],
        cool_down_secs: 2,
    };
    let sequence = SequenceBuilder::new(config).build().unwrap();
    let mut runner = SessionRunner::new(sequence).unwrap();

    runner.start().unwrap();
    assert_eq!(runner.session_progress(), 0.0);

    let mut last = 0.0;
    while !runner.is_finished() {
        let in_phase = runner.progress_in_phase();
        assert!(
            (0.0..1.0).contains(&in_phase),
            "in-phase progress out of range: {in_phase}"
        );

        runner.tick().unwrap();

        let overall = runner.session_progress();
        assert!(overall >= last, "session progress went backwards");
        last = overall;
    }

    assert_eq!(runner.session_progress(), 1.0);
    assert_eq!(runner.progress_in_phase(), 1.0);
}

#[test]
fn circuit_session_integration_skipped_warm_up_starts_on_work() {
    let config = SessionConfig {
        exercises: vec!["Plank".to_string()],
        work_secs: 45,
        rest_secs: 90,
        rounds: 1,
        warm_up: Vec::new(),
        cool_down_secs: 300,
    };
    let sequence = SequenceBuilder::new(config).build().unwrap();

    assert_eq!(sequence.len(), 2);
    let mut runner = SessionRunner::new(sequence).unwrap();
    runner.start().unwrap();

    let first = runner.current_phase().unwrap();
    assert_eq!(first.kind, PhaseKind::Work);
    assert_eq!(first.label, "Plank");
}

#[test]
fn circuit_session_integration_plan_projection_matches_run() {
    let config = SessionConfig {
        exercises: vec!["Squats".to_string(), "Lunges".to_string()],
        work_secs: 30,
        rest_secs: 15,
        rounds: 2,
        warm_up: vec![WarmUpStep::new("Jumping Jacks", 60)],
        cool_down_secs: 120,
    };
    let sequence = SequenceBuilder::new(config).build().unwrap();
    let start = NaiveTime::from_hms_opt(6, 30, 0).unwrap();

    let rows = schedule::project(&sequence, start);
    assert_eq!(rows.len(), sequence.len());

    // the plan describes exactly what the runner will walk through
    for (row, phase) in rows.iter().zip(sequence.iter()) {
        assert_eq!(row.activity, phase.label);
        assert_eq!(row.kind, phase.kind);
        assert_eq!(row.duration_secs, phase.duration_secs);
    }

    // 60 warm-up + 4x30 work + 3x15 rest + 120 cool-down = 345s
    assert_eq!(total_secs(&sequence), 345);
    assert_eq!(
        schedule::finish_time(&sequence, start),
        NaiveTime::from_hms_opt(6, 35, 45).unwrap()
    );

    let table = schedule::render_table(&sequence, start);
    assert!(table.contains("06:30:00"));
    assert!(table.contains("Squats"));
    assert!(table.contains("Lunges"));
    assert!(table.contains("ends at 06:35:45"));
}

#[test]
fn circuit_session_integration_restart_after_finish() {
    let config = SessionConfig {
        exercises: vec!["A".to_string()],
        work_secs: 1,
        rest_secs: 1,
        rounds: 1,
        warm_up: Vec::new(),
        cool_down_secs: 1,
    };
    let sequence = SequenceBuilder::new(config.clone()).build().unwrap();

    let mut runner = SessionRunner::new(sequence).unwrap();
    runner.start().unwrap();
    while !runner.is_finished() {
        runner.tick().unwrap();
    }

    // a fresh runner over the same plan behaves like the first one
    let again = SequenceBuilder::new(config).build().unwrap();
    let mut second = SessionRunner::new(again).unwrap();
    assert_eq!(second.status(), SessionStatus::NotStarted);
    second.start().unwrap();
    second.tick().unwrap();
    second.tick().unwrap();
    assert!(second.is_finished());
}
