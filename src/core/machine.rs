//! The Markov machine: an ordered rule list applied to a working string.
//!
//! ## Snapshots
//!
//! `Markov` is a persistent value. Every transition (`parse_rules`,
//! `set_initial_state`, `reset`, `step`) returns a new machine and leaves
//! the receiver untouched, so hosts can keep every visited snapshot in a
//! log and compare them by value.
//!
//! Rules live in an `im::Vector`, so cloning a snapshot shares the rule
//! sequence instead of copying it.
//!
//! ## Step Semantics
//!
//! One step fires the first rule (in order) that applies, rewriting the
//! leftmost occurrence of its pattern. A terminating rule halts the machine
//! after its rewrite. If no rule applies the machine halts unchanged.
//!
//! ```
//! use markov_engine::core::Markov;
//!
//! let machine = Markov::new()
//!     .parse_source("ab:ba\na:b")
//!     .unwrap()
//!     .set_initial_state("aab");
//!
//! let (moved, next) = machine.step();
//! assert!(moved);
//! assert_eq!(next.state(), "aba");
//! assert_eq!(machine.state(), "aab"); // Untouched
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::rule::Rule;

/// A snapshot of a Markov machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Markov {
    /// Rules in priority order (first match wins).
    rules: Vector<Rule>,

    /// State restored by `reset`.
    initial_state: String,

    /// Current working string.
    state: String,

    /// Set once a terminating rule fired or no rule matched.
    terminated: bool,
}

impl Markov {
    /// Create an empty machine: no rules, empty state, not terminated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a machine from an already-parsed rule sequence.
    #[must_use]
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            ..Self::default()
        }
    }

    // === Observation ===

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &Vector<Rule> {
        &self.rules
    }

    /// State that `reset` restores.
    #[must_use]
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Current working string.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// True once the machine has halted.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Index of the rule the next `step` would fire.
    ///
    /// `None` when the machine is terminated or no rule applies.
    #[must_use]
    pub fn matching_rule(&self) -> Option<usize> {
        if self.terminated {
            return None;
        }
        self.rules.iter().position(|rule| rule.matches(&self.state))
    }

    // === Transitions ===

    /// Replace the rule set with rules parsed from `lines`.
    ///
    /// Lines without a colon are skipped. State, initial state and the
    /// terminated flag carry over; call [`reset`](Self::reset) to restart.
    ///
    /// # Errors
    ///
    /// The first malformed line aborts parsing. `self` is left as it was,
    /// so the caller can keep running the previous rule set.
    pub fn parse_rules<I, S>(&self, lines: I) -> Result<Markov>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vector::new();
        for (index, line) in lines.into_iter().enumerate() {
            match Rule::parse(line.as_ref()) {
                Ok(Some(rule)) => rules.push_back(rule),
                Ok(None) => {}
                Err(err) => return Err(err.at_line(index + 1)),
            }
        }

        tracing::debug!(rules = rules.len(), "parsed rule set");

        Ok(Markov {
            rules,
            initial_state: self.initial_state.clone(),
            state: self.state.clone(),
            terminated: self.terminated,
        })
    }

    /// Parse a whole program, one rule per line.
    ///
    /// Line endings are `\n` or `\r\n`.
    ///
    /// # Errors
    ///
    /// See [`parse_rules`](Self::parse_rules).
    pub fn parse_source(&self, source: &str) -> Result<Markov> {
        self.parse_rules(source.lines())
    }

    /// Start over from a new initial state. Always un-terminates.
    #[must_use]
    pub fn set_initial_state(&self, initial_state: impl Into<String>) -> Markov {
        let initial_state = initial_state.into();
        Markov {
            rules: self.rules.clone(),
            state: initial_state.clone(),
            initial_state,
            terminated: false,
        }
    }

    /// Return to the initial state.
    #[must_use]
    pub fn reset(&self) -> Markov {
        Markov {
            rules: self.rules.clone(),
            initial_state: self.initial_state.clone(),
            state: self.initial_state.clone(),
            terminated: false,
        }
    }

    /// Advance one step.
    ///
    /// Returns `(moved, next)`:
    /// - terminated machine: `(false, self)`, a no-op
    /// - a rule applied: `(true, next)`, with `next` terminated if the rule was
    /// - nothing applied: `(false, next)` with `next` terminated, state unchanged
    #[must_use]
    pub fn step(&self) -> (bool, Markov) {
        if self.terminated {
            return (false, self.clone());
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(state) = rule.rewrite(&self.state) {
                tracing::trace!(index, %rule, %state, "rule fired");
                return (
                    true,
                    Markov {
                        rules: self.rules.clone(),
                        initial_state: self.initial_state.clone(),
                        state,
                        terminated: rule.is_terminating,
                    },
                );
            }
        }

        tracing::trace!(state = %self.state, "no rule applies");
        (
            false,
            Markov {
                rules: self.rules.clone(),
                initial_state: self.initial_state.clone(),
                state: self.state.clone(),
                terminated: true,
            },
        )
    }
}
