use hotkeys_core::model::{Action, ActionKey, AnswerToken};

pub const COMMAND_NOTE: &str = "Commands should be prepended with \":\"";

/// One quiz question, ready for a front end to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub key: ActionKey,
    pub description: String,
    pub kind_labels: Vec<&'static str>,
    pub is_command: bool,
    /// At least one accepted answer is a multi-step sequence.
    pub has_sequence_answer: bool,
    /// At least one accepted answer uses the Ctrl modifier.
    pub uses_ctrl: bool,
}

impl QuizQuestion {
    pub(crate) fn from_action(action: &Action) -> Self {
        let accepted = action.accepted_answers();
        Self {
            key: action.key().clone(),
            description: action.description().to_string(),
            kind_labels: action.kinds().iter().map(|kind| kind.label()).collect(),
            is_command: action.is_command(),
            has_sequence_answer: accepted.iter().any(AnswerToken::is_sequence),
            uses_ctrl: accepted.iter().any(AnswerToken::uses_ctrl),
        }
    }

    /// The question line, upper-cased: `WHAT IS HOTKEY FOR "SAVE FILE"?`.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "What is {} for \"{}\"?",
            self.kind_labels.join(" or "),
            self.description
        )
        .to_uppercase()
    }

    /// Notes that depend only on the action.
    #[must_use]
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.is_command {
            notes.push(COMMAND_NOTE.to_string());
        }
        notes
    }

    /// Prompt followed by the action notes and any front-end specific notes.
    #[must_use]
    pub fn render(&self, extra_notes: &[String]) -> String {
        let mut notes = self.notes();
        notes.extend(extra_notes.iter().cloned());
        let mut text = self.prompt();
        let rendered = render_notes(&notes);
        if !rendered.is_empty() {
            text.push('\n');
            text.push_str(&rendered);
        }
        text
    }
}

/// `NOTE: x` for one note, a numbered `NOTES:` block for several.
#[must_use]
pub fn render_notes(notes: &[String]) -> String {
    match notes {
        [] => String::new(),
        [only] => format!("NOTE: {only}"),
        many => {
            let mut text = String::from("NOTES:");
            for (i, note) in many.iter().enumerate() {
                text.push_str(&format!("\n{}. {note}", i + 1));
            }
            text
        }
    }
}
