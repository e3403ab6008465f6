//! Log of visited states.
//!
//! Entry 0 is the initial state; entry `n` is the state after step `n`.
//! An index from state to its first step makes "seen before?" O(1),
//! which is what cycle detection asks after every step.

use rustc_hash::FxHashMap;

/// Ordered log of visited states with a first-occurrence index.
#[derive(Clone, Debug, Default)]
pub struct StateLog {
    /// States in visit order.
    entries: Vec<String>,

    /// First step at which each state was visited.
    first_seen: FxHashMap<String, usize>,
}

impl StateLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log whose step 0 is `initial`.
    #[must_use]
    pub fn starting_at(initial: impl Into<String>) -> Self {
        let mut log = Self::new();
        log.push(initial);
        log
    }

    /// Append a state, returning its step number.
    pub fn push(&mut self, state: impl Into<String>) -> usize {
        let state = state.into();
        let step = self.entries.len();
        self.first_seen.entry(state.clone()).or_insert(step);
        self.entries.push(state);
        step
    }

    /// First step at which `state` was visited.
    #[must_use]
    pub fn first_occurrence(&self, state: &str) -> Option<usize> {
        self.first_seen.get(state).copied()
    }

    /// Check if `state` has been visited.
    #[must_use]
    pub fn contains(&self, state: &str) -> bool {
        self.first_seen.contains_key(state)
    }

    /// State at a given step.
    #[must_use]
    pub fn get(&self, step: usize) -> Option<&str> {
        self.entries.get(step).map(String::as_str)
    }

    /// Most recent state.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Number of entries (steps taken + 1 once started).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over states in visit order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.first_seen.clear();
    }
}

/// One `step: state` line per entry.
impl std::fmt::Display for StateLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (step, state) in self.entries.iter().enumerate() {
            writeln!(f, "{step}: {state}")?;
        }
        Ok(())
    }
}
