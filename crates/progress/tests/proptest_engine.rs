//! Property-based tests for the progress engine.
//!
//! Random sequences of toggles, finalizations and resets against the
//! built-in curriculum must keep the snapshot consistent.

use gradplan_core::{catalog, SubjectStatus};
use gradplan_progress::{derive_status, ProgressEngine};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Command {
    Toggle(usize),
    Finalize(usize),
    Reset,
}

// Subject indexes run past the catalog so unknown names are exercised too
fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        8 => (0usize..55).prop_map(Command::Toggle),
        2 => (0usize..10).prop_map(Command::Finalize),
        1 => Just(Command::Reset),
    ]
}

fn subject_name(engine: &ProgressEngine, index: usize) -> String {
    engine
        .curriculum()
        .subjects()
        .nth(index)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("Unknown {}", index))
}

fn apply(engine: &mut ProgressEngine, command: &Command) -> bool {
    match command {
        Command::Toggle(i) => {
            let name = subject_name(engine, *i);
            engine.toggle(&name).is_ok()
        }
        Command::Finalize(i) => engine.finalize_period(*i).is_ok(),
        Command::Reset => {
            engine.reset();
            true
        }
    }
}

proptest! {
    #[test]
    fn snapshot_stays_consistent(commands in prop::collection::vec(arb_command(), 0..80)) {
        let mut engine = ProgressEngine::new(catalog::builtin().unwrap());

        for command in &commands {
            apply(&mut engine, command);

            let snapshot = engine.snapshot();
            prop_assert!(snapshot.is_disjoint());
            for name in snapshot.completed.iter().chain(&snapshot.in_progress).chain(&snapshot.planned) {
                prop_assert!(engine.curriculum().contains(name));
            }
            for period in &snapshot.finalized_periods {
                prop_assert!(*period < engine.curriculum().periods().len());
            }
        }
    }

    #[test]
    fn rejected_commands_change_nothing(commands in prop::collection::vec(arb_command(), 0..80)) {
        let mut engine = ProgressEngine::new(catalog::builtin().unwrap());

        for command in &commands {
            let before = engine.snapshot().clone();
            if !apply(&mut engine, command) {
                prop_assert_eq!(engine.snapshot(), &before);
            }
        }
    }

    #[test]
    fn locked_iff_untracked_with_missing_prerequisite(commands in prop::collection::vec(arb_command(), 0..80)) {
        let mut engine = ProgressEngine::new(catalog::builtin().unwrap());
        for command in &commands {
            apply(&mut engine, command);
        }

        let snapshot = engine.snapshot();
        for subject in engine.curriculum().subjects() {
            let locked = derive_status(subject, snapshot) == SubjectStatus::Locked;
            let expected = !snapshot.is_tracked(&subject.name) && !subject.prerequisites_met(snapshot);
            prop_assert_eq!(locked, expected, "subject {}", subject.name);
        }
    }

    #[test]
    fn aggregate_matches_snapshot(commands in prop::collection::vec(arb_command(), 0..80)) {
        let mut engine = ProgressEngine::new(catalog::builtin().unwrap());
        for command in &commands {
            apply(&mut engine, command);
        }

        let aggregate = engine.aggregate();
        let snapshot = engine.snapshot();
        prop_assert_eq!(aggregate.total, engine.curriculum().subject_count());
        prop_assert_eq!(aggregate.completed, snapshot.completed.len());
        prop_assert_eq!(aggregate.in_progress, snapshot.in_progress.len());
        prop_assert_eq!(aggregate.planned, snapshot.planned.len());
        prop_assert!(aggregate.percentage <= 100);
    }

    #[test]
    fn finalized_period_is_fully_completed(index in 0usize..8, warmup in prop::collection::vec(0usize..49, 0..20)) {
        let mut engine = ProgressEngine::new(catalog::builtin().unwrap());
        for i in warmup {
            let name = subject_name(&engine, i);
            let _ = engine.toggle(&name);
        }

        if engine.finalize_period(index).is_ok() {
            let period = engine.curriculum().period(index).unwrap();
            for subject in &period.subjects {
                prop_assert_eq!(engine.status(&subject.name), Some(SubjectStatus::Completed));
            }
            prop_assert!(engine.snapshot().finalized_periods.contains(&index));
            prop_assert!(engine.finalize_period(index).is_err());
        }
    }
}
