use std::fmt;

use serde::{Deserialize, Serialize};

/// Named keys and modifiers that keep a raw answer in one piece.
const NAMED_KEYS: &[&str] = &[
    "Ctrl", "Shift", "Alt", "Space", "Home", "End", "Esc", "PgUp", "PgDn",
];

//
// ─── ANSWER TOKEN ──────────────────────────────────────────────────────────────
//

/// One accepted answer for an action.
///
/// `Single` is one key combination (`Ctrl+s`, `x`) or one command (`:wq`).
/// `Sequence` is an ordered list of combinations typed one after another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerToken {
    Single(String),
    Sequence(Vec<String>),
}

impl AnswerToken {
    /// Normalizes a raw textual answer.
    ///
    /// A raw answer stays whole when it is a single character, a command
    /// (contains `:`), names a modifier or special key, or looks like a
    /// function key (`F5`). Anything else is split into one-character steps,
    /// so `dd` becomes the sequence `d`, `d`.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if is_kept_whole(raw) {
            return Self::Single(raw.to_owned());
        }
        Self::from_steps(raw.chars().map(String::from).collect())
    }

    /// Builds a token from explicit steps; a one-step list collapses to `Single`.
    #[must_use]
    pub fn from_steps(mut steps: Vec<String>) -> Self {
        if steps.len() == 1 {
            if let Some(only) = steps.pop() {
                return Self::Single(only);
            }
        }
        Self::Sequence(steps)
    }

    /// The ordered steps of this answer.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        match self {
            Self::Single(step) => std::slice::from_ref(step),
            Self::Sequence(steps) => steps,
        }
    }

    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// True if any step uses the `Ctrl` modifier.
    #[must_use]
    pub fn uses_ctrl(&self) -> bool {
        self.steps().iter().any(|step| step.contains("Ctrl"))
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        match self {
            Self::Single(step) => !step.is_empty(),
            Self::Sequence(steps) => !steps.is_empty() && steps.iter().all(|s| !s.is_empty()),
        }
    }
}

impl fmt::Display for AnswerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(step) => f.write_str(step),
            Self::Sequence(steps) => f.write_str(&steps.join(",")),
        }
    }
}

fn is_kept_whole(raw: &str) -> bool {
    raw.chars().count() == 1
        || raw.contains(':')
        || NAMED_KEYS.iter().any(|name| raw.contains(name))
        || has_function_key(raw)
}

fn has_function_key(raw: &str) -> bool {
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == 'F' && chars.peek().is_some_and(char::is_ascii_digit) {
            return true;
        }
    }
    false
}

//
// ─── USER ANSWER ───────────────────────────────────────────────────────────────
//

/// A user's parsed answer: the ordered list of combinations they entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    steps: Vec<String>,
}

impl Answer {
    #[must_use]
    pub fn new(steps: Vec<String>) -> Self {
        Self { steps }
    }

    /// Parses a line typed in the plain console.
    ///
    /// Several combinations are separated by commas (`Ctrl+x,Ctrl+s`). A
    /// single entry goes through the same normalization as catalog answers,
    /// so typing `dd` is the same as typing `d,d`.
    #[must_use]
    pub fn parse_typed(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Self::default();
        }

        let parts: Vec<&str> = line.split(',').collect();
        if let [only] = parts.as_slice() {
            let only = only.trim();
            if only.is_empty() {
                return Self::default();
            }
            return Self::new(AnswerToken::from_raw(only).steps().to_vec());
        }

        Self::new(
            parts
                .into_iter()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Builds an answer from captured keystrokes.
    ///
    /// Keystrokes starting with `:` are folded into a single command token.
    #[must_use]
    pub fn from_keystrokes(keys: Vec<String>) -> Self {
        if keys.len() > 1 && keys[0] == ":" {
            return Self::new(vec![keys.concat()]);
        }
        Self::new(keys)
    }

    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Exact set-membership check against the accepted answers.
    ///
    /// A multi-step answer only matches a `Sequence` with the same ordered
    /// steps; a single-step answer only matches a `Single`.
    #[must_use]
    pub fn matches(&self, accepted: &[AnswerToken]) -> bool {
        match self.steps.as_slice() {
            [] => false,
            [only] => accepted
                .iter()
                .any(|token| matches!(token, AnswerToken::Single(s) if s == only)),
            steps => accepted
                .iter()
                .any(|token| matches!(token, AnswerToken::Sequence(seq) if seq.as_slice() == steps)),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.steps.join(", "))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(steps: &[&str]) -> AnswerToken {
        AnswerToken::Sequence(steps.iter().map(|s| (*s).to_owned()).collect())
    }

    #[test]
    fn raw_answers_with_named_keys_stay_whole() {
        for raw in ["Ctrl+s", "Shift+Tab", "Alt+F4", "Esc", "PgDn", "F12", ":wq", "x"] {
            assert_eq!(AnswerToken::from_raw(raw), AnswerToken::Single(raw.to_owned()));
        }
    }

    #[test]
    fn plain_words_split_into_characters() {
        assert_eq!(AnswerToken::from_raw("dd"), seq(&["d", "d"]));
        assert_eq!(AnswerToken::from_raw("gg"), seq(&["g", "g"]));
        assert_eq!(AnswerToken::from_raw("Fa"), seq(&["F", "a"]));
    }

    #[test]
    fn one_step_list_collapses_to_single() {
        assert_eq!(
            AnswerToken::from_steps(vec!["Ctrl+w".into()]),
            AnswerToken::Single("Ctrl+w".into())
        );
    }

    #[test]
    fn sequence_answer_requires_full_order() {
        let accepted = vec![seq(&["Ctrl+x", "Ctrl+x"])];

        let full = Answer::new(vec!["Ctrl+x".into(), "Ctrl+x".into()]);
        let partial = Answer::new(vec!["Ctrl+x".into()]);

        assert!(full.matches(&accepted));
        assert!(!partial.matches(&accepted));
    }

    #[test]
    fn shapes_never_cross_match() {
        let accepted = vec![AnswerToken::Single("d".into()), seq(&["g", "g"])];

        assert!(Answer::new(vec!["d".into()]).matches(&accepted));
        assert!(!Answer::new(vec!["g".into()]).matches(&accepted));
        assert!(!Answer::new(vec!["d".into(), "d".into()]).matches(&accepted));
    }

    #[test]
    fn order_matters_for_sequences() {
        let accepted = vec![seq(&["Ctrl+x", "Ctrl+s"])];
        let reversed = Answer::new(vec!["Ctrl+s".into(), "Ctrl+x".into()]);
        assert!(!reversed.matches(&accepted));
    }

    #[test]
    fn empty_answer_never_matches() {
        let accepted = vec![AnswerToken::Single("x".into())];
        assert!(!Answer::default().matches(&accepted));
    }

    #[test]
    fn typed_answer_uses_catalog_normalization() {
        assert_eq!(Answer::parse_typed("dd").steps(), ["d", "d"]);
        assert_eq!(Answer::parse_typed("Ctrl+s").steps(), ["Ctrl+s"]);
        assert_eq!(Answer::parse_typed(":wq\n").steps(), [":wq"]);
        assert_eq!(
            Answer::parse_typed("Ctrl+x, Ctrl+s").steps(),
            ["Ctrl+x", "Ctrl+s"]
        );
        assert!(Answer::parse_typed("").is_empty());
        assert!(Answer::parse_typed("   ").is_empty());
    }

    #[test]
    fn keystrokes_fold_commands() {
        let keys = [":", "w", "q"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(Answer::from_keystrokes(keys).steps(), [":wq"]);

        let keys = ["Ctrl+x", "Ctrl+s"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(Answer::from_keystrokes(keys).steps(), ["Ctrl+x", "Ctrl+s"]);
    }

    #[test]
    fn display_joins_steps() {
        assert_eq!(seq(&["Ctrl+x", "Ctrl+s"]).to_string(), "Ctrl+x,Ctrl+s");
        assert_eq!(AnswerToken::Single(":w".into()).to_string(), ":w");
    }
}
