//! Batch execution: drive a session until the machine stops.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::log::StateLog;
use super::session::{Cycle, Session, StepEvent};
use crate::core::Markov;

/// Slowest auto-step speed (500 ms per step).
pub const MIN_SPEED: u32 = 1;

/// Fastest auto-step speed (20 ms per step).
pub const MAX_SPEED: u32 = 25;

/// Run configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Stop after this many steps (`None` = unlimited).
    /// Prepend-forever programs never repeat a state, so only this
    /// limit stops them.
    pub max_steps: Option<usize>,

    /// Stop when a step revisits an earlier state.
    pub detect_cycles: bool,

    /// Auto-step speed for animated hosts, `MIN_SPEED..=MAX_SPEED`.
    /// Ignored by [`Runner::run`].
    pub speed: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(100_000),
            detect_cycles: true,
            speed: 5,
        }
    }
}

impl RunConfig {
    /// Set the step limit.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Enable or disable cycle detection.
    #[must_use]
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    /// Set the auto-step speed (clamped to the supported range).
    #[must_use]
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self
    }

    /// Delay between auto-steps at the configured speed.
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(500) / self.speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

/// Why a run stopped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// A terminating rule fired.
    Terminated,

    /// No rule applied.
    Halted,

    /// The machine was terminated before the run started.
    AlreadyTerminated,

    /// A state repeated.
    Cycle(Cycle),

    /// The step limit was reached with the machine still running.
    StepLimit(usize),
}

impl RunOutcome {
    /// True for outcomes where the algorithm finished on its own.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            RunOutcome::Terminated | RunOutcome::Halted | RunOutcome::AlreadyTerminated
        )
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Terminated => write!(f, "terminated by rule"),
            RunOutcome::Halted => write!(f, "halted, no rule applies"),
            RunOutcome::AlreadyTerminated => write!(f, "already terminated"),
            RunOutcome::Cycle(cycle) => write!(f, "{cycle}"),
            RunOutcome::StepLimit(n) => write!(f, "stopped after {n} steps"),
        }
    }
}

/// Result of a run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Why the run stopped.
    pub outcome: RunOutcome,

    /// Final snapshot.
    pub markov: Markov,

    /// Every state visited, starting with the input.
    pub log: StateLog,

    /// Steps that changed the state.
    pub steps: usize,
}

/// Runs a machine to completion.
#[derive(Clone, Debug, Default)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    /// Create a runner with the given configuration.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Step `markov` from its current state until it stops.
    #[must_use]
    pub fn run(&self, markov: Markov) -> RunReport {
        let mut session =
            Session::from_markov(markov).with_cycle_detection(self.config.detect_cycles);
        let mut steps = 0;

        let outcome = loop {
            if self.config.max_steps.is_some_and(|max| steps >= max) {
                break RunOutcome::StepLimit(steps);
            }

            match session.step() {
                StepEvent::Moved => steps += 1,
                StepEvent::Terminated => {
                    steps += 1;
                    break RunOutcome::Terminated;
                }
                StepEvent::Halted => break RunOutcome::Halted,
                StepEvent::Idle => break RunOutcome::AlreadyTerminated,
                StepEvent::Cycle(cycle) => {
                    steps += 1;
                    break RunOutcome::Cycle(cycle);
                }
            }
        };

        tracing::debug!(steps, %outcome, "run finished");

        let (markov, log) = session.into_parts();
        RunReport {
            outcome,
            markov,
            log,
            steps,
        }
    }
}
