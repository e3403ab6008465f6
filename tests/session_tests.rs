//! Host-side integration tests: session controls, cycle detection, runner.

use markov_engine::host::{Cycle, RunConfig, RunOutcome, Runner, Session, StepEvent};
use markov_engine::programs::{self, BINARY_TO_UNARY, GROW, PING_PONG};

// =============================================================================
// Session Tests
// =============================================================================

/// An editor-style flow: type rules, type input, play until done.
#[test]
fn test_session_editor_flow() {
    let mut session = Session::new();

    // A half-typed program is rejected and the old (empty) rule set stays.
    assert!(session.set_rules("|0:0||\n1:0|:").is_err());
    assert!(session.markov().rules().is_empty());
    assert!(session.error().is_some());

    session.set_rules(BINARY_TO_UNARY.source).unwrap();
    session.set_initial_state("110");
    assert!(session.play());

    let mut events = Vec::new();
    while let Some(event) = session.tick() {
        events.push(event);
    }

    assert_eq!(events.last(), Some(&StepEvent::Halted));
    assert_eq!(session.markov().state(), "||||||");
    assert!(!session.is_running());
    assert_eq!(session.log().get(0), Some("110"));
    assert_eq!(session.log().last(), Some("||||||"));
}

#[test]
fn test_session_cycle_message() {
    let mut session = Session::new();
    session.set_rules(PING_PONG.source).unwrap();
    session.set_initial_state("aabb");

    let event = loop {
        let event = session.step();
        if !event.is_continuing() {
            break event;
        }
    };

    let StepEvent::Cycle(cycle) = &event else {
        panic!("expected a cycle, got {event:?}");
    };
    assert_eq!(session.error(), Some(cycle.to_string().as_str()));
    assert_eq!(session.log().first_occurrence(&cycle.state), Some(cycle.previous_step));
    assert_eq!(session.log().len(), cycle.step + 1);
}

#[test]
fn test_session_reset_after_cycle_allows_rerun() {
    let mut session = Session::new();
    session.set_rules("a:a").unwrap();
    session.set_initial_state("a");

    assert!(matches!(session.step(), StepEvent::Cycle(_)));
    session.reset();
    assert_eq!(session.error(), None);
    assert!(matches!(session.step(), StepEvent::Cycle(_)));
}

#[test]
fn test_session_rules_change_midway() {
    let mut session = Session::new();
    session.set_rules("a:b").unwrap();
    session.set_initial_state("aaa");
    session.step();

    // New rules continue from the current state, no reset.
    session.set_rules("a::c").unwrap();
    assert_eq!(session.step(), StepEvent::Terminated);
    assert_eq!(session.markov().state(), "bca");
    assert_eq!(session.log().len(), 3);
}

// =============================================================================
// Runner Tests
// =============================================================================

#[test]
fn test_runner_reports_cycle() {
    let report = Runner::default().run(PING_PONG.load("ab").unwrap());
    assert_eq!(
        report.outcome,
        RunOutcome::Cycle(Cycle {
            state: "ab".to_string(),
            step: 2,
            previous_step: 0,
        })
    );
    assert_eq!(report.steps, 2);
}

#[test]
fn test_runner_without_cycle_detection_hits_limit() {
    let config = RunConfig::default()
        .with_cycle_detection(false)
        .with_max_steps(Some(7));
    let report = Runner::new(config).run(PING_PONG.load("ab").unwrap());

    assert_eq!(report.outcome, RunOutcome::StepLimit(7));
    assert_eq!(report.markov.state(), "ba");
}

#[test]
fn test_runner_grow_needs_step_limit() {
    let config = RunConfig::default().with_max_steps(Some(100));
    let report = Runner::new(config).run(GROW.load("").unwrap());

    assert_eq!(report.outcome, RunOutcome::StepLimit(100));
    assert_eq!(report.log.len(), 101);
}

#[test]
fn test_runner_all_finite_programs_finish() {
    for program in programs::all() {
        if program.name == PING_PONG.name || program.name == GROW.name {
            continue;
        }
        let report = Runner::default().run(program.load(program.sample_input).unwrap());
        assert!(report.outcome.is_finished(), "{}: {}", program.name, report.outcome);
    }
}

#[test]
fn test_outcome_serialization() {
    let outcome = RunOutcome::Cycle(Cycle {
        state: "ab".to_string(),
        step: 2,
        previous_step: 0,
    });
    let json = serde_json::to_string(&outcome).unwrap();
    let restored: RunOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, outcome);
}
