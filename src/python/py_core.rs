//! Engine bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Markov, ParseError, Rule};

pub(crate) fn syntax_error(err: ParseError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for Rule.
#[pyclass(name = "Rule", frozen)]
#[derive(Clone, Debug)]
pub struct PyRule(pub Rule);

#[pymethods]
impl PyRule {
    /// Create a rule.
    #[new]
    #[pyo3(signature = (left, right, is_terminating = false))]
    fn new(left: String, right: String, is_terminating: bool) -> Self {
        if is_terminating {
            Self(Rule::terminating(left, right))
        } else {
            Self(Rule::new(left, right))
        }
    }

    /// Parse one line. Returns None for lines without a colon.
    #[staticmethod]
    fn parse(line: &str) -> PyResult<Option<Self>> {
        Rule::parse(line).map(|rule| rule.map(Self)).map_err(syntax_error)
    }

    /// Try the rule on a state, returning (applied, new_state).
    fn apply(&self, state: &str) -> (bool, String) {
        self.0.apply(state)
    }

    #[getter]
    fn left(&self) -> String {
        self.0.left.clone()
    }

    #[getter]
    fn right(&self) -> String {
        self.0.right.clone()
    }

    #[getter]
    fn is_terminating(&self) -> bool {
        self.0.is_terminating
    }

    fn __str__(&self) -> String {
        self.0.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Rule({:?})", self.0.to_string())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        hash_of(&self.0)
    }
}

/// Python wrapper for a Markov snapshot.
///
/// Every transition returns a new object; the receiver never changes.
#[pyclass(name = "Markov", frozen)]
#[derive(Clone, Debug)]
pub struct PyMarkov(pub Markov);

#[pymethods]
impl PyMarkov {
    /// Create an empty machine.
    #[new]
    fn new() -> Self {
        Self(Markov::new())
    }

    /// Replace the rules with ones parsed from a list of lines.
    fn parse_rules(&self, lines: Vec<String>) -> PyResult<Self> {
        self.0.parse_rules(lines).map(Self).map_err(syntax_error)
    }

    /// Replace the rules with ones parsed from program text.
    fn parse_source(&self, source: &str) -> PyResult<Self> {
        self.0.parse_source(source).map(Self).map_err(syntax_error)
    }

    fn set_initial_state(&self, initial_state: String) -> Self {
        Self(self.0.set_initial_state(initial_state))
    }

    fn reset(&self) -> Self {
        Self(self.0.reset())
    }

    /// Advance one step, returning (moved, next).
    fn step(&self) -> (bool, Self) {
        let (moved, next) = self.0.step();
        (moved, Self(next))
    }

    /// Index of the rule the next step would fire, if any.
    fn matching_rule(&self) -> Option<usize> {
        self.0.matching_rule()
    }

    #[getter]
    fn rules(&self) -> Vec<PyRule> {
        self.0.rules().iter().cloned().map(PyRule).collect()
    }

    #[getter]
    fn state(&self) -> String {
        self.0.state().to_string()
    }

    #[getter]
    fn initial_state(&self) -> String {
        self.0.initial_state().to_string()
    }

    #[getter]
    fn terminated(&self) -> bool {
        self.0.is_terminated()
    }

    fn __repr__(&self) -> String {
        format!(
            "Markov(rules={}, state={:?}, terminated={})",
            self.0.rules().len(),
            self.0.state(),
            self.0.is_terminated()
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        hash_of(&self.0)
    }
}

fn hash_of<T: std::hash::Hash>(value: &T) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hasher;

    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
