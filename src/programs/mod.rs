//! Sample Markov algorithms.
//!
//! Small, well-known programs used by the tests, the benches, and the
//! command-line `--example` flag. Each comes with an input it is meant to
//! be run on.
//!
//! Lines without a colon are comments, so programs can carry notes.

use crate::core::{Markov, ParseError};

/// A named sample program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Program {
    /// Short identifier (used by `--example`).
    pub name: &'static str,

    /// One-line description.
    pub description: &'static str,

    /// Rule text.
    pub source: &'static str,

    /// Input the program is meant to run on.
    pub sample_input: &'static str,
}

impl Program {
    /// Parse the program into a fresh machine set to `input`.
    ///
    /// # Errors
    ///
    /// Only if the program text is malformed.
    pub fn load(&self, input: &str) -> Result<Markov, ParseError> {
        Ok(Markov::new()
            .parse_source(self.source)?
            .set_initial_state(input))
    }
}

/// Binary numeral to unary tally, e.g. `101` to `|||||`.
pub const BINARY_TO_UNARY: Program = Program {
    name: "binary-to-unary",
    description: "convert a binary numeral to a unary tally",
    source: "\
# each | left of a 0 doubles
|0:0||
1:0|
0:
",
    sample_input: "101",
};

/// Unary addition, e.g. `||+|||` to `|||||`.
pub const UNARY_ADDITION: Program = Program {
    name: "unary-addition",
    description: "add two unary numbers separated by +",
    source: "+::\n",
    sample_input: "||+|||",
};

/// Reverse a word over `{a, b}`.
pub const REVERSE: Program = Program {
    name: "reverse",
    description: "reverse a word over the alphabet {a, b}",
    source: "\
# carry a letter left to the front
aA:Aa
bA:Ab
aB:Ba
bB:Bb
%A:%a
%B:%b
# pick up the next letter after the cursor
#a:A#
#b:B#
# done, drop the markers
#:
%::
:%#
",
    sample_input: "abbab",
};

/// Two rules that undo each other; only cycle detection stops it.
pub const PING_PONG: Program = Program {
    name: "ping-pong",
    description: "swap ab and ba forever",
    source: "ab:ba\nba:ab\n",
    sample_input: "ab",
};

/// Prepends forever without ever repeating a state.
pub const GROW: Program = Program {
    name: "grow",
    description: "prepend x forever (never repeats, needs a step limit)",
    source: ":x\n",
    sample_input: "",
};

/// All sample programs.
#[must_use]
pub fn all() -> &'static [Program] {
    &[BINARY_TO_UNARY, UNARY_ADDITION, REVERSE, PING_PONG, GROW]
}

/// Look up a sample program by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Program> {
    all().iter().find(|program| program.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{RunOutcome, Runner};

    fn run(program: &Program, input: &str) -> (RunOutcome, String) {
        let report = Runner::default().run(program.load(input).unwrap());
        (report.outcome, report.markov.state().to_string())
    }

    #[test]
    fn test_all_parse() {
        for program in all() {
            assert!(program.load(program.sample_input).is_ok(), "{}", program.name);
        }
    }

    #[test]
    fn test_binary_to_unary() {
        assert_eq!(run(&BINARY_TO_UNARY, "101"), (RunOutcome::Halted, "|||||".to_string()));
        assert_eq!(run(&BINARY_TO_UNARY, "0"), (RunOutcome::Halted, String::new()));
    }

    #[test]
    fn test_unary_addition() {
        assert_eq!(run(&UNARY_ADDITION, "||+|||"), (RunOutcome::Terminated, "|||||".to_string()));
    }

    #[test]
    fn test_reverse() {
        assert_eq!(run(&REVERSE, "ab"), (RunOutcome::Terminated, "ba".to_string()));
        assert_eq!(run(&REVERSE, "abbab"), (RunOutcome::Terminated, "babba".to_string()));
        assert_eq!(run(&REVERSE, ""), (RunOutcome::Terminated, String::new()));
    }

    #[test]
    fn test_ping_pong_cycles() {
        let (outcome, _) = run(&PING_PONG, "ab");
        assert!(matches!(outcome, RunOutcome::Cycle(_)));
    }

    #[test]
    fn test_find() {
        assert_eq!(find("reverse"), Some(&REVERSE));
        assert_eq!(find("missing"), None);
    }
}
