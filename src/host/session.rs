//! Interactive session: a machine, its log, and the controls around them.
//!
//! A session is what an editor-style host keeps between user actions:
//! the current snapshot, the states visited since the last reset, the
//! last error message, and whether auto-stepping is on. The host owns the
//! timer; it calls [`Session::tick`] at its own cadence.
//!
//! ## Cycle Detection
//!
//! The engine happily loops forever. After every step that moves, the
//! session checks the log: if the new state was visited before (and the
//! machine has not just terminated), the session stops and reports the
//! repeat instead of continuing.
//!
//! ```
//! use markov_engine::host::{Session, StepEvent};
//!
//! let mut session = Session::new();
//! session.set_rules("ab:ba\nba:ab").unwrap();
//! session.set_initial_state("ab");
//!
//! assert_eq!(session.step(), StepEvent::Moved);
//! assert!(matches!(session.step(), StepEvent::Cycle(_)));
//! assert_eq!(
//!     session.error(),
//!     Some("Repeating state ab on step 2, previous occurred on step 0"),
//! );
//! ```

use serde::{Deserialize, Serialize};

use super::log::StateLog;
use crate::core::{Markov, ParseError};

/// A repeated state found while stepping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// The state that came back.
    pub state: String,

    /// Step that produced it again.
    pub step: usize,

    /// Step at which it first occurred.
    pub previous_step: usize,
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repeating state {} on step {}, previous occurred on step {}",
            self.state, self.step, self.previous_step
        )
    }
}

/// What a single session step did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEvent {
    /// An ordinary rule fired; the machine keeps going.
    Moved,

    /// A terminating rule fired. The state may have changed.
    Terminated,

    /// No rule applied; the machine halted with its state unchanged.
    Halted,

    /// The machine was already terminated. Nothing happened.
    Idle,

    /// The step revisited an earlier state.
    Cycle(Cycle),
}

impl StepEvent {
    /// True if the session can keep stepping after this event.
    #[must_use]
    pub fn is_continuing(&self) -> bool {
        matches!(self, StepEvent::Moved)
    }
}

/// An interactive Markov session.
#[derive(Clone, Debug)]
pub struct Session {
    markov: Markov,
    log: StateLog,
    error: Option<String>,
    running: bool,
    detect_cycles: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            markov: Markov::new(),
            log: StateLog::starting_at(""),
            error: None,
            running: false,
            detect_cycles: true,
        }
    }
}

impl Session {
    /// Create a session with an empty machine.
    ///
    /// The log starts at the empty initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session around an existing snapshot.
    ///
    /// The log starts at the snapshot's current state.
    #[must_use]
    pub fn from_markov(markov: Markov) -> Self {
        Self {
            log: StateLog::starting_at(markov.state()),
            markov,
            ..Self::default()
        }
    }

    /// Turn repeated-state detection on or off.
    #[must_use]
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    // === Observation ===

    /// Current snapshot.
    #[must_use]
    pub fn markov(&self) -> &Markov {
        &self.markov
    }

    /// States visited since the last reset.
    #[must_use]
    pub fn log(&self) -> &StateLog {
        &self.log
    }

    /// Last error message (syntax error or repeated state).
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while auto-stepping is on.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Consume the session, returning its snapshot and log.
    #[must_use]
    pub fn into_parts(self) -> (Markov, StateLog) {
        (self.markov, self.log)
    }

    // === Controls ===

    /// Replace the rule set from program text.
    ///
    /// On a syntax error the previous rules stay in effect and the error
    /// message is kept for display. State and log are not touched either way.
    ///
    /// # Errors
    ///
    /// The [`ParseError`] for the first malformed line.
    pub fn set_rules(&mut self, source: &str) -> Result<(), ParseError> {
        self.running = false;
        match self.markov.parse_source(source) {
            Ok(markov) => {
                self.markov = markov;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "keeping previous rules");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Start over from a new input string.
    pub fn set_initial_state(&mut self, initial_state: impl Into<String>) {
        self.running = false;
        self.markov = self.markov.set_initial_state(initial_state);
        self.log = StateLog::starting_at(self.markov.state());
        self.error = None;
    }

    /// Return to the initial state and clear the log and error.
    pub fn reset(&mut self) {
        self.running = false;
        self.markov = self.markov.reset();
        self.log = StateLog::starting_at(self.markov.initial_state());
        self.error = None;
    }

    /// Turn auto-stepping on.
    ///
    /// Returns false (and stays paused) if the machine is terminated.
    pub fn play(&mut self) -> bool {
        self.running = !self.markov.is_terminated();
        self.running
    }

    /// Turn auto-stepping off.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Step once if auto-stepping is on.
    pub fn tick(&mut self) -> Option<StepEvent> {
        if self.running {
            Some(self.step())
        } else {
            None
        }
    }

    /// Advance the machine one step and record the result.
    ///
    /// A repeat produced by a terminating rule (`a::a` on `a`) is reported
    /// as [`StepEvent::Terminated`], not as a cycle: the machine has
    /// stopped, so it cannot loop.
    pub fn step(&mut self) -> StepEvent {
        if self.markov.is_terminated() {
            self.running = false;
            return StepEvent::Idle;
        }

        let (moved, next) = self.markov.step();
        if !moved {
            self.running = false;
            self.markov = next;
            return StepEvent::Halted;
        }

        let previous = if self.detect_cycles && !next.is_terminated() {
            self.log.first_occurrence(next.state())
        } else {
            None
        };

        let step = self.log.push(next.state());
        self.markov = next;

        if let Some(previous_step) = previous {
            let cycle = Cycle {
                state: self.markov.state().to_string(),
                step,
                previous_step,
            };
            tracing::debug!(step, previous_step, "repeated state");
            self.running = false;
            self.error = Some(cycle.to_string());
            return StepEvent::Cycle(cycle);
        }

        if self.markov.is_terminated() {
            self.running = false;
            StepEvent::Terminated
        } else {
            StepEvent::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rules: &str, input: &str) -> Session {
        let mut session = Session::new();
        session.set_rules(rules).unwrap();
        session.set_initial_state(input);
        session
    }

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().get(0), Some(""));
        assert_eq!(session.error(), None);
        assert!(!session.is_running());
    }

    #[test]
    fn test_fresh_session_logs_initial_state() {
        let mut session = Session::new();
        session.set_rules(":").unwrap();

        assert_eq!(
            session.step(),
            StepEvent::Cycle(Cycle {
                state: String::new(),
                step: 1,
                previous_step: 0,
            })
        );
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn test_fresh_session_step_numbers() {
        let mut session = Session::new();
        session.set_rules(":a").unwrap();

        assert_eq!(session.step(), StepEvent::Moved);
        assert_eq!(session.log().first_occurrence("a"), Some(1));
    }

    #[test]
    fn test_set_rules_error_keeps_previous() {
        let mut session = session("a:b", "a");

        let err = session.set_rules("a:b:c").unwrap_err();
        assert_eq!(err.line(), "a:b:c");
        assert_eq!(session.error(), Some("Syntax error in line a:b:c"));
        assert_eq!(session.markov().rules().len(), 1);

        session.set_rules("a::c").unwrap();
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_step_records_log() {
        let mut session = session("a:b", "aa");
        assert_eq!(session.step(), StepEvent::Moved);
        assert_eq!(session.step(), StepEvent::Moved);
        assert_eq!(session.step(), StepEvent::Halted);
        assert_eq!(session.step(), StepEvent::Idle);

        let states: Vec<&str> = session.log().iter().collect();
        assert_eq!(states, ["aa", "ba", "bb"]);
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let mut session = session("a:a", "a");
        let event = session.step();
        assert_eq!(
            event,
            StepEvent::Cycle(Cycle {
                state: "a".to_string(),
                step: 1,
                previous_step: 0,
            })
        );
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn test_terminating_repeat_is_not_cycle() {
        let mut session = session("a::a", "a");
        assert_eq!(session.step(), StepEvent::Terminated);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_cycle_detection_off() {
        let mut session = session("a:a", "a").with_cycle_detection(false);
        assert_eq!(session.step(), StepEvent::Moved);
        assert_eq!(session.step(), StepEvent::Moved);
    }

    #[test]
    fn test_play_tick_pause() {
        let mut session = session("a:b", "a");
        assert_eq!(session.tick(), None);

        assert!(session.play());
        assert_eq!(session.tick(), Some(StepEvent::Moved));
        assert_eq!(session.tick(), Some(StepEvent::Halted));
        assert!(!session.is_running());
        assert!(!session.play());
    }

    #[test]
    fn test_reset_clears_log_and_error() {
        let mut session = session("a:a", "a");
        session.step();
        assert!(session.error().is_some());

        session.reset();
        assert_eq!(session.error(), None);
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.markov().state(), "a");
        assert!(!session.markov().is_terminated());
    }

    #[test]
    fn test_set_rules_stops_running() {
        let mut session = session("a:b", "aaa");
        session.play();
        session.set_rules("a:c").unwrap();
        assert!(!session.is_running());
        assert_eq!(session.markov().state(), "aaa");
    }
}
