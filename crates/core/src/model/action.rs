use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::answer::AnswerToken;
use crate::model::ids::ActionKey;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("action `{key}` has an empty description")]
    EmptyDescription { key: ActionKey },

    #[error("action `{key}` has no accepted answers")]
    NoAnswers { key: ActionKey },

    #[error("action `{key}` has an empty accepted answer")]
    EmptyAnswer { key: ActionKey },

    #[error("unknown answer type `{raw}`")]
    UnknownKind { raw: String },
}

//
// ─── ANSWER KIND ───────────────────────────────────────────────────────────────
//

/// Shape of the input expected for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    /// One key combination, e.g. `Ctrl+s`.
    SingleKeyCombo,
    /// Several combinations typed one after another, e.g. `Ctrl+x, Ctrl+s`.
    KeySequence,
    /// Free-form command text, conventionally prefixed with `:`.
    Command,
}

impl AnswerKind {
    /// Word used when asking the question ("What is hotkey for ...").
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnswerKind::SingleKeyCombo => "hotkey",
            AnswerKind::KeySequence => "key sequence",
            AnswerKind::Command => "command",
        }
    }
}

impl FromStr for AnswerKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hotkey" | "single-key-combo" => Ok(Self::SingleKeyCombo),
            "sequence" | "key-sequence" => Ok(Self::KeySequence),
            "command" => Ok(Self::Command),
            other => Err(ActionError::UnknownKind {
                raw: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── ACTION ────────────────────────────────────────────────────────────────────
//

/// A single learnable operation of the target application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    key: ActionKey,
    description: String,
    kinds: Vec<AnswerKind>,
    accepted: Vec<AnswerToken>,
}

impl Action {
    /// Creates a validated action.
    ///
    /// When `kinds` is empty the kind is inferred from the answers: all
    /// multi-step answers make a key sequence, anything else a single combo.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the description is blank, no answers are
    /// given, or one of the answers is empty.
    pub fn new(
        key: ActionKey,
        description: impl Into<String>,
        mut kinds: Vec<AnswerKind>,
        accepted: Vec<AnswerToken>,
    ) -> Result<Self, ActionError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ActionError::EmptyDescription { key });
        }
        if accepted.is_empty() {
            return Err(ActionError::NoAnswers { key });
        }
        if !accepted.iter().all(AnswerToken::is_well_formed) {
            return Err(ActionError::EmptyAnswer { key });
        }

        if kinds.is_empty() {
            let kind = if accepted.iter().all(AnswerToken::is_sequence) {
                AnswerKind::KeySequence
            } else {
                AnswerKind::SingleKeyCombo
            };
            kinds.push(kind);
        }
        let mut seen = Vec::with_capacity(kinds.len());
        kinds.retain(|kind| {
            if seen.contains(kind) {
                false
            } else {
                seen.push(*kind);
                true
            }
        });

        Ok(Self {
            key,
            description,
            kinds,
            accepted,
        })
    }

    #[must_use]
    pub fn key(&self) -> &ActionKey {
        &self.key
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Primary kind of the expected answer.
    #[must_use]
    pub fn answer_kind(&self) -> AnswerKind {
        self.kinds[0]
    }

    /// Every declared kind, in definition order.
    #[must_use]
    pub fn kinds(&self) -> &[AnswerKind] {
        &self.kinds
    }

    #[must_use]
    pub fn accepted_answers(&self) -> &[AnswerToken] {
        &self.accepted
    }

    #[must_use]
    pub fn is_command(&self) -> bool {
        self.kinds.contains(&AnswerKind::Command)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
