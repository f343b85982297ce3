use std::collections::VecDeque;
use std::sync::Arc;

use hotkeys_core::model::{Action, ActionKey, Answer, AnswerToken, Catalog, LearningStats};
use hotkeys_core::time::fixed_clock;
use services::{QuizQuestion, SessionLoopService};
use storage::repository::InMemoryRepository;

use crate::error::FrontendError;
use crate::frontend::{AnswerInput, Frontend, Pause, Tone};

/// Everything the tutor asked a front end to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Shown {
    Stats(LearningStats),
    Question(String),
    Message(String, Tone),
    Choice(String),
    Pause(Pause),
}

/// Front end fed from scripted answers; runs out into `Exit`.
#[derive(Default)]
pub struct ScriptedFrontend {
    answers: VecDeque<AnswerInput>,
    choices: VecDeque<String>,
    pub shown: Vec<Shown>,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, line: &str) -> Self {
        self.answers
            .push_back(AnswerInput::Answer(Answer::parse_typed(line)));
        self
    }

    pub fn input(mut self, input: AnswerInput) -> Self {
        self.answers.push_back(input);
        self
    }

    pub fn choice(mut self, reply: &str) -> Self {
        self.choices.push_back(reply.to_string());
        self
    }

    pub fn messages(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|shown| match shown {
                Shown::Message(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Frontend for ScriptedFrontend {
    fn input_notes(&self, _question: &QuizQuestion) -> Vec<String> {
        vec!["scripted".to_string()]
    }

    fn show_stats(&mut self, stats: &LearningStats) -> Result<(), FrontendError> {
        self.shown.push(Shown::Stats(*stats));
        Ok(())
    }

    fn show_question(&mut self, text: &str) -> Result<(), FrontendError> {
        self.shown.push(Shown::Question(text.to_string()));
        Ok(())
    }

    fn show_message(&mut self, text: &str, tone: Tone) -> Result<(), FrontendError> {
        self.shown.push(Shown::Message(text.to_string(), tone));
        Ok(())
    }

    fn read_answer(&mut self) -> Result<AnswerInput, FrontendError> {
        Ok(self.answers.pop_front().unwrap_or(AnswerInput::Exit))
    }

    fn read_choice(&mut self, prompt: &str) -> Result<Option<String>, FrontendError> {
        self.shown.push(Shown::Choice(prompt.to_string()));
        Ok(self.choices.pop_front())
    }

    fn pause(&mut self, at: Pause) -> Result<(), FrontendError> {
        self.shown.push(Shown::Pause(at));
        Ok(())
    }
}

/// One-action catalog: "Save file", answered with `Ctrl+s`.
pub fn save_catalog() -> Catalog {
    let save = Action::new(
        ActionKey::new("save"),
        "Save file",
        Vec::new(),
        vec![AnswerToken::from_raw("Ctrl+s")],
    )
    .unwrap();
    Catalog::new("Editor", [save])
}

pub fn loop_service(repo: &InMemoryRepository) -> SessionLoopService {
    SessionLoopService::new(fixed_clock(), Arc::new(repo.clone()), Arc::new(repo.clone()))
        .with_seed(3)
}
